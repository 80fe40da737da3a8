//! Finding (and creating) the config document that governs a directory.
//!
//! Lookup and creation are separate calls: `locate` never touches the disk
//! beyond existence checks, `create_default` is the only writer.

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::package_index::PackageEntry;
use crate::core::tsconfig::{default_config, BASE_CONFIG_NAME, TSCONFIG_NAME};
use crate::util::fs;

/// Anything that can tell which config document a package uses.
pub trait ConfigSource {
    /// Name of the config document governing `package`, if it has one.
    fn config_name(&self, package: &PackageEntry) -> Option<String>;
}

/// Filesystem lookup with a preferred name and a `tsconfig.json` fallback.
#[derive(Debug, Clone)]
pub struct ConfigLocator {
    preferred_name: String,
}

impl ConfigLocator {
    pub fn new(preferred_name: impl Into<String>) -> Self {
        ConfigLocator {
            preferred_name: preferred_name.into(),
        }
    }

    pub fn preferred_name(&self) -> &str {
        &self.preferred_name
    }

    /// The preferred name if present in `directory`, else `tsconfig.json` if
    /// present, else `None`.
    pub fn locate(&self, directory: &Path) -> Option<String> {
        if directory.join(&self.preferred_name).is_file() {
            return Some(self.preferred_name.clone());
        }
        if self.preferred_name != TSCONFIG_NAME && directory.join(TSCONFIG_NAME).is_file() {
            return Some(TSCONFIG_NAME.to_string());
        }
        None
    }

    /// Write a minimal config under the preferred name and return that name.
    ///
    /// The new document extends the workspace's `tsconfig.base.json` when one
    /// exists at `workspace_root`.
    pub fn create_default(&self, directory: &Path, workspace_root: &Path) -> Result<String> {
        let extends = workspace_root
            .join(BASE_CONFIG_NAME)
            .is_file()
            .then(|| {
                fs::join_posix(
                    &fs::relative_posix(directory, workspace_root),
                    BASE_CONFIG_NAME,
                )
            });

        let path = directory.join(&self.preferred_name);
        let mut content = serde_json::to_string_pretty(&default_config(extends.as_deref()))
            .context("failed to serialize default config")?;
        content.push('\n');
        fs::write_string(&path, &content)?;

        tracing::info!("created {}", path.display());
        Ok(self.preferred_name.clone())
    }
}

impl ConfigSource for ConfigLocator {
    fn config_name(&self, package: &PackageEntry) -> Option<String> {
        self.locate(&package.directory)
    }
}
