//! Core data structures for tsrefs.
//!
//! This module contains the foundational types the sync pass works with:
//! - Package manifests and the package index
//! - Config documents and how they are located
//! - References, path mappings and their resolution
//! - Typed errors

pub mod errors;
pub mod locator;
pub mod manifest;
pub mod package_index;
pub mod reference;
pub mod resolver;
pub mod tsconfig;

pub use errors::SyncError;
pub use locator::{ConfigLocator, ConfigSource};
pub use manifest::{PackageManifest, MANIFEST_NAME};
pub use package_index::{PackageEntry, PackageIndex};
pub use reference::ReferenceEntry;
pub use resolver::{resolve_references, DependencyResolver};
pub use tsconfig::{ConfigDocument, TSCONFIG_NAME};
