//! High-level operations.
//!
//! This module contains the implementation of the `tsrefs` command.

pub mod discover;
pub mod merge;
pub mod sync;

pub use discover::discover_manifests;
pub use merge::{merge_references, MergeOptions, MergeRequest};
pub use sync::{sync_workspace, SyncOptions};
