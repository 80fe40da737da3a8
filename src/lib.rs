//! tsrefs - keeps TypeScript project references in sync with a JS monorepo
//!
//! Every workspace package that has a `tsconfig.json` gets a `references`
//! entry for each sibling it depends on, and the root config references every
//! package. Optional `compilerOptions.paths` mappings follow the same graph.
//! Documents are edited in place; comments and formatting survive.

pub mod core;
pub mod ops;
pub mod util;

/// Test utilities for tsrefs unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It writes fixture workspaces to temporary directories.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    errors::SyncError, package_index::PackageIndex, reference::ReferenceEntry,
    tsconfig::ConfigDocument,
};
pub use crate::ops::{discover_manifests, sync_workspace, SyncOptions};
pub use crate::util::config::ToolConfig;
