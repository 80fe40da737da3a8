//! Per-package reference resolution.
//!
//! A package references every workspace sibling it depends on (runtime, peer
//! or dev) that has a config document of its own. Siblings without one are
//! published-only packages and drop out silently.

use std::path::Path;

use anyhow::Result;

use crate::core::errors::SyncError;
use crate::core::locator::{ConfigLocator, ConfigSource};
use crate::core::manifest::PackageManifest;
use crate::core::package_index::{PackageEntry, PackageIndex};
use crate::core::reference::{sort_and_dedup, ReferenceEntry};
use crate::core::tsconfig::TSCONFIG_NAME;
use crate::util::fs;

/// Resolves package references against a package index.
pub struct DependencyResolver<'a, S: ConfigSource + ?Sized> {
    index: &'a PackageIndex,
    configs: &'a S,
}

impl<'a, S: ConfigSource + ?Sized> DependencyResolver<'a, S> {
    pub fn new(index: &'a PackageIndex, configs: &'a S) -> Self {
        DependencyResolver { index, configs }
    }

    /// References for `package`, sorted by path.
    ///
    /// Fails if the package lists itself as a dependency.
    pub fn resolve(&self, package: &PackageEntry) -> Result<Vec<ReferenceEntry>> {
        let manifest_path = package.manifest_path();
        let manifest = PackageManifest::load(&manifest_path)?;
        let dependencies = manifest.dependency_names();
        tracing::debug!("all deps from {}: {:?}", package.name, dependencies);

        if dependencies.contains(&package.name.as_str()) {
            return Err(SyncError::SelfReference {
                package: package.name.clone(),
                manifest: manifest_path,
            }
            .into());
        }

        let mut references = Vec::new();
        for dependency in dependencies {
            let Some(entry) = self.index.get(dependency) else {
                continue;
            };
            match self.configs.config_name(entry) {
                Some(config_name) => {
                    references.push(reference_to(&package.directory, entry, &config_name));
                }
                None => {
                    tracing::debug!(
                        "{} depends on {}, which has no config document",
                        package.name,
                        dependency
                    );
                }
            }
        }

        let references = sort_and_dedup(references);
        tracing::debug!(
            "references of {}: {:?}",
            package.name,
            references.iter().map(|r| r.path.as_str()).collect::<Vec<_>>()
        );
        Ok(references)
    }
}

/// Resolve `package` with plain filesystem lookup under `preferred_config_name`.
pub fn resolve_references(
    preferred_config_name: &str,
    package: &PackageEntry,
    index: &PackageIndex,
) -> Result<Vec<ReferenceEntry>> {
    let locator = ConfigLocator::new(preferred_config_name);
    DependencyResolver::new(index, &locator).resolve(package)
}

/// Reference from directory `from` to `target`, whose config is `config_name`.
///
/// The canonical config name is referenced by directory, any other name by
/// file.
pub fn reference_to(from: &Path, target: &PackageEntry, config_name: &str) -> ReferenceEntry {
    let folder = fs::relative_posix(from, &target.directory);
    let path = if config_name == TSCONFIG_NAME {
        fs::join_posix(&folder, "")
    } else {
        fs::join_posix(&folder, config_name)
    };
    ReferenceEntry::new(path, target.name.clone(), fs::join_posix(&folder, ""))
}
