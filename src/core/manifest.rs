//! `package.json` parsing.
//!
//! Only the handful of fields that shape the build graph are read; everything
//! else in the manifest is ignored.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::util::fs;

/// File name of a package manifest.
pub const MANIFEST_NAME: &str = "package.json";

/// The parts of a `package.json` this tool cares about.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    /// Declared package name
    pub name: Option<String>,

    /// Primary entry point
    pub main: Option<String>,

    #[serde(default)]
    pub dependencies: Map<String, Value>,

    #[serde(default)]
    pub peer_dependencies: Map<String, Value>,

    #[serde(default)]
    pub dev_dependencies: Map<String, Value>,

    /// Workspace globs (root manifest only)
    pub workspaces: Option<WorkspacesField>,
}

/// The `workspaces` field accepts either a bare list of globs or an object
/// with a `packages` list (yarn's nohoist form).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WorkspacesField {
    Array(Vec<String>),
    Object {
        #[serde(default)]
        packages: Vec<String>,
    },
}

impl WorkspacesField {
    /// The glob patterns, whichever form was used.
    pub fn patterns(&self) -> &[String] {
        match self {
            WorkspacesField::Array(patterns) => patterns,
            WorkspacesField::Object { packages } => packages,
        }
    }
}

impl PackageManifest {
    /// Load a manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Parse manifest text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Names from `dependencies`, `peerDependencies` and `devDependencies`,
    /// in that order, each name once.
    pub fn dependency_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for table in [
            &self.dependencies,
            &self.peer_dependencies,
            &self.dev_dependencies,
        ] {
            for name in table.keys() {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Whether `main` points at TypeScript source rather than compiled output.
    pub fn has_typed_entry(&self) -> bool {
        self.main
            .as_deref()
            .is_some_and(|main| main.ends_with(".ts") || main.ends_with(".tsx"))
    }
}
