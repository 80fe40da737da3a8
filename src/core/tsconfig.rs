//! TypeScript config documents (`tsconfig.json` and named variants).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};

use crate::core::reference::{references_to_value, ReferenceEntry};
use crate::util::fs;
use crate::util::jsonc::JsoncDocument;

/// Canonical config document name.
pub const TSCONFIG_NAME: &str = "tsconfig.json";

/// Shared base config looked up at the workspace root when creating configs.
pub const BASE_CONFIG_NAME: &str = "tsconfig.base.json";

const REFERENCES: &str = "references";
const COMPILER_OPTIONS: &str = "compilerOptions";
const PATHS: &str = "paths";

/// A config document loaded from disk, comments and layout intact.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    path: PathBuf,
    doc: JsoncDocument,
}

impl ConfigDocument {
    /// Load and parse a config document.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(path, content)
    }

    /// Parse config text that belongs at `path`.
    pub fn parse(path: &Path, content: impl Into<String>) -> Result<Self> {
        let doc = JsoncDocument::parse(content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(ConfigDocument {
            path: path.to_path_buf(),
            doc,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current document text.
    pub fn text(&self) -> &str {
        self.doc.text()
    }

    /// Existing `references`, as written (an absent key reads as `[]`).
    pub fn references_value(&self) -> Value {
        self.doc
            .get(&[REFERENCES])
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()))
    }

    /// Existing references that carry a string `path`.
    pub fn references(&self) -> Vec<ReferenceEntry> {
        self.doc
            .get(&[REFERENCES])
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(ReferenceEntry::from_value).collect())
            .unwrap_or_default()
    }

    /// The `compilerOptions` object, if any.
    pub fn compiler_options(&self) -> Option<&Map<String, Value>> {
        self.doc.get(&[COMPILER_OPTIONS]).and_then(Value::as_object)
    }

    /// Declared `compilerOptions.rootDir`.
    pub fn root_dir(&self) -> Option<&str> {
        self.compiler_options()?.get("rootDir")?.as_str()
    }

    /// Existing `compilerOptions.paths` (an absent key reads as `{}`).
    pub fn paths_value(&self) -> Value {
        self.doc
            .get(&[COMPILER_OPTIONS, PATHS])
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }

    /// Replace `references`; an empty list removes the key.
    pub fn set_references(&mut self, references: &[ReferenceEntry]) -> Result<()> {
        if references.is_empty() {
            self.doc.remove(&[REFERENCES])?;
        } else {
            self.doc.set(&[REFERENCES], &references_to_value(references))?;
        }
        Ok(())
    }

    /// Replace `compilerOptions.paths`; an empty map removes the key.
    pub fn set_paths(&mut self, paths: &Map<String, Value>) -> Result<()> {
        if paths.is_empty() {
            self.doc.remove(&[COMPILER_OPTIONS, PATHS])?;
        } else {
            self.doc
                .set(&[COMPILER_OPTIONS, PATHS], &Value::Object(paths.clone()))?;
        }
        Ok(())
    }

    /// Write the document back. With `discard_comments` the document is
    /// re-serialized as plain JSON instead of edited in place.
    pub fn save(&self, discard_comments: bool) -> Result<()> {
        if discard_comments {
            fs::write_string(&self.path, &self.doc.to_plain_string()?)
        } else {
            fs::write_string(&self.path, self.doc.text())
        }
    }
}

/// Content of a freshly created package config.
pub fn default_config(extends: Option<&str>) -> Value {
    let mut config = Map::new();
    if let Some(extends) = extends {
        config.insert("extends".to_string(), Value::String(extends.to_string()));
    }
    config.insert(
        COMPILER_OPTIONS.to_string(),
        json!({ "outDir": "dist", "rootDir": "src" }),
    );
    config.insert(REFERENCES.to_string(), json!([]));
    Value::Object(config)
}
