//! Project references and path mappings.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Default `compilerOptions.rootDir` when a package does not declare one.
pub const DEFAULT_ROOT_DIR: &str = "src";

/// One entry of a config document's `references` array.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceEntry {
    /// POSIX path to the referenced directory or config file
    pub path: String,

    /// Referenced package name, used to key path mappings
    pub name: Option<String>,

    /// POSIX path to the referenced package directory
    pub folder: Option<String>,

    /// Fields carried over from an existing entry with the same `path`
    pub extra: Map<String, Value>,
}

impl ReferenceEntry {
    /// A reference to a workspace package.
    pub fn new(
        path: impl Into<String>,
        name: impl Into<String>,
        folder: impl Into<String>,
    ) -> Self {
        ReferenceEntry {
            path: path.into(),
            name: Some(name.into()),
            folder: Some(folder.into()),
            extra: Map::new(),
        }
    }

    /// Parse an entry from an existing document. Entries without a string
    /// `path` are not references this tool can reason about.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let path = object.get("path")?.as_str()?.to_string();
        let extra = object
            .iter()
            .filter(|(key, _)| key.as_str() != "path")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Some(ReferenceEntry {
            path,
            name: None,
            folder: None,
            extra,
        })
    }

    /// Document form: `path` first, carried-over fields after it.
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("path".to_string(), Value::String(self.path.clone()));
        for (key, value) in &self.extra {
            if key != "path" {
                object.insert(key.clone(), value.clone());
            }
        }
        Value::Object(object)
    }
}

/// Sort references by `path` and drop duplicates, the last duplicate winning.
pub fn sort_and_dedup(references: Vec<ReferenceEntry>) -> Vec<ReferenceEntry> {
    let mut unique: Vec<ReferenceEntry> = Vec::with_capacity(references.len());
    for reference in references {
        match unique.iter_mut().find(|r| r.path == reference.path) {
            Some(existing) => *existing = reference,
            None => unique.push(reference),
        }
    }
    unique.sort_by(|a, b| a.path.cmp(&b.path));
    unique
}

/// Render references as the document's `references` array.
pub fn references_to_value(references: &[ReferenceEntry]) -> Value {
    Value::Array(references.iter().map(ReferenceEntry::to_value).collect())
}

/// Derive `compilerOptions.paths` from a reference list.
///
/// Each named reference maps to `<folder>/<rootDir>` where `rootDir` is the
/// referenced package's own `compilerOptions.rootDir` (defaulting to `src`);
/// a `rootDir` of `.` maps to the folder itself.
pub fn path_mappings(
    references: &[ReferenceEntry],
    root_dirs: &HashMap<String, String>,
    ignored: &[String],
) -> Map<String, Value> {
    let mut paths = Map::new();
    for reference in references {
        let (Some(name), Some(folder)) = (&reference.name, &reference.folder) else {
            continue;
        };
        if ignored.contains(name) {
            continue;
        }

        let root_dir = root_dirs
            .get(name)
            .map(String::as_str)
            .unwrap_or(DEFAULT_ROOT_DIR);
        let target = match root_dir.trim_start_matches("./").trim_end_matches('/') {
            "." | "" => folder.clone(),
            dir => format!("{}/{}", folder, dir),
        };
        paths.insert(name.clone(), Value::Array(vec![Value::String(target)]));
    }
    paths
}
