//! Options file support.
//!
//! A workspace may carry `update-ts-references.yaml` at its root. Every key is
//! optional; flags given on the command line take precedence over the file.
//!
//! ```yaml
//! configName: tsconfig.dev.json
//! createPathMappings: true
//! packages:
//!   - packages/*
//!   - '!packages/legacy'
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default options file name, looked up at the workspace root.
pub const DEFAULT_OPTIONS_FILE: &str = "update-ts-references.yaml";

/// Contents of the options file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolConfig {
    /// Workspace patterns; overrides every other package source
    pub packages: Option<Vec<String>>,

    /// Preferred config document name for packages
    pub config_name: Option<String>,

    /// Config document name at the workspace root
    pub root_config_name: Option<String>,

    /// Create missing configs for packages with a TypeScript entry point
    pub create_ts_config: bool,

    /// Maintain `compilerOptions.paths`
    pub create_path_mappings: bool,

    /// Leave the root config alone
    pub without_root_config: bool,

    /// Fail on missing or unreadable config documents
    pub strict: bool,

    /// Report instead of writing
    pub check: bool,

    /// Rewrite documents as plain JSON
    pub discard_comments: bool,

    /// Package names never emitted into `compilerOptions.paths`
    pub ignore_path_mappings: Vec<String>,
}

impl ToolConfig {
    /// Load an options file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read options file: {}", path.display()))?;

        // An empty file is a valid, empty options file.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse options file: {}", path.display()))
    }

    /// Load `file_name` from `root` if it exists.
    pub fn find(root: &Path, file_name: &str) -> Result<Option<Self>> {
        let path = root.join(file_name);
        if !path.is_file() {
            tracing::debug!("no options file at {}", path.display());
            return Ok(None);
        }
        tracing::debug!("reading options from {}", path.display());
        Self::load(&path).map(Some)
    }
}
