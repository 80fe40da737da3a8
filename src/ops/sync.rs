//! Synchronizing every config document in a workspace.
//!
//! One pass runs in three stages:
//!
//! 1. locate each package's config document (planning creation where allowed)
//!    and record its declared `rootDir`;
//! 2. resolve the references of every package that has a config, so that a
//!    self-referencing manifest (or, in strict mode, a package without a
//!    config) aborts the pass before anything is written;
//! 3. create planned configs, merge each package document, then the root.
//!
//! Check mode runs the same pass without writing and returns the same count.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::{Map, Value};

use crate::core::errors::SyncError;
use crate::core::locator::{ConfigLocator, ConfigSource};
use crate::core::package_index::{PackageEntry, PackageIndex};
use crate::core::reference::{path_mappings, ReferenceEntry};
use crate::core::resolver::{reference_to, DependencyResolver};
use crate::core::tsconfig::{ConfigDocument, TSCONFIG_NAME};
use crate::ops::merge::{merge_references, MergeOptions, MergeRequest};
use crate::util::config::ToolConfig;
use crate::util::fs;

/// Options for a sync pass.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Preferred config document name for packages
    pub config_name: String,

    /// Config document name at the workspace root
    pub root_config_name: String,

    /// Skip the root document entirely
    pub without_root_config: bool,

    /// Create configs for packages with a TypeScript entry point
    pub create_ts_config: bool,

    /// Maintain `compilerOptions.paths` alongside references
    pub create_path_mappings: bool,

    /// Missing or unreadable documents are fatal
    pub strict: bool,

    /// Count changes without writing
    pub check: bool,

    /// Debug logging (consumed by the binary)
    pub verbose: bool,

    /// Rewrite documents as plain JSON
    pub discard_comments: bool,

    /// Package names never emitted into `compilerOptions.paths`
    pub ignore_path_mappings: Vec<String>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions {
            config_name: TSCONFIG_NAME.to_string(),
            root_config_name: TSCONFIG_NAME.to_string(),
            without_root_config: false,
            create_ts_config: false,
            create_path_mappings: false,
            strict: false,
            check: false,
            verbose: false,
            discard_comments: false,
            ignore_path_mappings: Vec::new(),
        }
    }
}

impl SyncOptions {
    /// Defaults overlaid with an options file.
    pub fn from_tool_config(config: &ToolConfig) -> Self {
        let defaults = SyncOptions::default();
        SyncOptions {
            config_name: config.config_name.clone().unwrap_or(defaults.config_name),
            root_config_name: config
                .root_config_name
                .clone()
                .unwrap_or(defaults.root_config_name),
            without_root_config: config.without_root_config,
            create_ts_config: config.create_ts_config,
            create_path_mappings: config.create_path_mappings,
            strict: config.strict,
            check: config.check,
            verbose: false,
            discard_comments: config.discard_comments,
            ignore_path_mappings: config.ignore_path_mappings.clone(),
        }
    }

    fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            dry_run: self.check,
            create_path_mappings: self.create_path_mappings,
            strict: self.strict,
            discard_comments: self.discard_comments,
        }
    }
}

/// Config documents located during one pass.
///
/// Packages planned for creation count as located under the preferred name,
/// whether or not the file exists yet.
#[derive(Debug, Default)]
struct LocatedConfigs {
    names: HashMap<String, String>,
    root_dirs: HashMap<String, String>,
    planned: HashSet<String>,
}

impl ConfigSource for LocatedConfigs {
    fn config_name(&self, package: &PackageEntry) -> Option<String> {
        self.names.get(&package.name).cloned()
    }
}

struct PackagePlan<'a> {
    package: &'a PackageEntry,
    config_name: String,
    references: Vec<ReferenceEntry>,
    paths: Map<String, Value>,
}

/// Bring every config document in the workspace in line with the package
/// graph. Returns the number of documents that changed (or, in check mode,
/// would change).
pub fn sync_workspace(root: &Path, manifests: &[PathBuf], opts: &SyncOptions) -> Result<usize> {
    let root = fs::normalize_path(root);
    let index = PackageIndex::build_in(&root, manifests)?;
    let locator = ConfigLocator::new(opts.config_name.clone());
    let merge_opts = opts.merge_options();

    tracing::debug!("syncing {} packages under {}", index.len(), root.display());

    let configs = locate_configs(&index, &locator, opts);

    let resolver = DependencyResolver::new(&index, &configs);
    let mut plans = Vec::new();
    let mut unlocated = Vec::new();
    for package in index.iter() {
        let Some(config_name) = configs.names.get(&package.name) else {
            if opts.strict {
                return Err(SyncError::ConfigMissing {
                    config: locator.preferred_name().to_string(),
                    directory: package.directory.clone(),
                    reason: "no config document found".to_string(),
                }
                .into());
            }
            tracing::info!("no {} for {}", locator.preferred_name(), package.name);
            unlocated.push(package);
            continue;
        };
        let references = resolver.resolve(package)?;
        let paths = path_mappings(&references, &configs.root_dirs, &opts.ignore_path_mappings);
        plans.push(PackagePlan {
            package,
            config_name: config_name.clone(),
            references,
            paths,
        });
    }

    let mut changes = 0;
    for plan in &plans {
        let planned = configs.planned.contains(&plan.package.name);
        if planned {
            changes += 1;
            if opts.check {
                tracing::info!(
                    "{} would be created for {}",
                    plan.config_name,
                    plan.package.name
                );
                continue;
            }
            locator.create_default(&plan.package.directory, &root)?;
        }

        let request = MergeRequest {
            directory: &plan.package.directory,
            config_name: &plan.config_name,
            references: &plan.references,
            paths: &plan.paths,
        };
        let changed = merge_references(&request, &merge_opts)?;
        // A created document already counts once.
        if !planned {
            changes += changed;
        }
    }

    if opts.without_root_config {
        tracing::debug!("skipping root config");
    } else {
        let references: Vec<ReferenceEntry> = plans
            .iter()
            .map(|plan| reference_to(&root, plan.package, &plan.config_name))
            .collect();
        let unlocated_references: Vec<ReferenceEntry> = unlocated
            .iter()
            .map(|package| reference_to(&root, package, TSCONFIG_NAME))
            .collect();
        let paths = path_mappings(
            &unlocated_references,
            &configs.root_dirs,
            &opts.ignore_path_mappings,
        );

        let request = MergeRequest {
            directory: &root,
            config_name: &opts.root_config_name,
            references: &references,
            paths: &paths,
        };
        changes += merge_references(&request, &merge_opts)?;
    }

    Ok(changes)
}

fn locate_configs(
    index: &PackageIndex,
    locator: &ConfigLocator,
    opts: &SyncOptions,
) -> LocatedConfigs {
    let mut configs = LocatedConfigs::default();

    for package in index.iter() {
        if let Some(name) = locator.locate(&package.directory) {
            let path = package.directory.join(&name);
            match ConfigDocument::load(&path) {
                Ok(doc) => {
                    if let Some(root_dir) = doc.root_dir() {
                        configs
                            .root_dirs
                            .insert(package.name.clone(), root_dir.to_string());
                    }
                }
                Err(e) => tracing::warn!("{:#}", e),
            }
            configs.names.insert(package.name.clone(), name);
        } else if opts.create_ts_config && package.has_typed_entry {
            configs.planned.insert(package.name.clone());
            configs
                .names
                .insert(package.name.clone(), locator.preferred_name().to_string());
        }
    }

    configs
}
