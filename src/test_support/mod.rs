//! Test utilities for tsrefs unit tests.
//!
//! Builds throwaway workspaces on disk so resolvers and mergers can be
//! exercised against real files.
//!
//! # Example
//!
//! ```rust,ignore
//! use tsrefs::test_support::WorkspaceFixture;
//!
//! let ws = WorkspaceFixture::new()
//!     .package("packages/a", r#"{ "name": "a", "dependencies": { "b": "*" } }"#)
//!     .package("packages/b", r#"{ "name": "b" }"#)
//!     .tsconfig("packages/a", "{}")
//!     .create();
//! ```

pub mod fixtures;

pub use fixtures::*;
