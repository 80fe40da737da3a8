//! Name → directory index over the workspace's packages.
//!
//! The index is built once per pass from the discovered manifest list and is
//! read-only afterwards; resolvers receive it by reference.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::errors::SyncError;
use crate::core::manifest::{PackageManifest, MANIFEST_NAME};
use crate::util::fs;

/// A package participating in the pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    /// Declared package name
    pub name: String,

    /// Absolute package directory
    pub directory: PathBuf,

    /// `main` points at `.ts`/`.tsx` source
    pub has_typed_entry: bool,
}

impl PackageEntry {
    /// Path of this package's manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.directory.join(MANIFEST_NAME)
    }
}

/// Packages keyed by name, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct PackageIndex {
    entries: Vec<PackageEntry>,
}

impl PackageIndex {
    /// Build the index from manifest paths, resolving relative paths against
    /// the process working directory.
    pub fn build(manifest_paths: &[PathBuf]) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::build_in(&cwd, manifest_paths)
    }

    /// Build the index from manifest paths, resolving relative paths against
    /// `base`.
    pub fn build_in(base: &Path, manifest_paths: &[PathBuf]) -> Result<Self> {
        let mut index = PackageIndex::default();

        for manifest_path in manifest_paths {
            let manifest_path = fs::absolutize(base, manifest_path);
            let directory = manifest_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| base.to_path_buf());

            if index.entries.iter().any(|e| e.directory == directory) {
                tracing::debug!("skipping duplicate manifest {}", manifest_path.display());
                continue;
            }

            let manifest = PackageManifest::load(&manifest_path)?;
            let name = match manifest.name.as_deref() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => {
                    return Err(SyncError::MissingPackageName {
                        manifest: manifest_path,
                    }
                    .into())
                }
            };

            if let Some(existing) = index.get(&name) {
                return Err(SyncError::DuplicatePackageName {
                    name,
                    first: existing.directory.clone(),
                    second: directory,
                }
                .into());
            }

            index.entries.push(PackageEntry {
                name,
                directory,
                has_typed_entry: manifest.has_typed_entry(),
            });
        }

        tracing::debug!("indexed {} packages", index.len());
        Ok(index)
    }

    /// Look up a package by name.
    pub fn get(&self, name: &str) -> Option<&PackageEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Whether `name` is a workspace package.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate packages in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &PackageEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
