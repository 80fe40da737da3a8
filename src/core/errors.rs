//! Errors that abort a synchronization pass.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Fatal conditions. Anything recoverable is logged instead of returned.
#[derive(Debug, Error, Diagnostic)]
pub enum SyncError {
    #[error("package `{package}` references itself in {}", .manifest.display())]
    #[diagnostic(
        code(tsrefs::self_reference),
        help("remove `{package}` from its own dependencies, peerDependencies and devDependencies")
    )]
    SelfReference { package: String, manifest: PathBuf },

    #[error(
        "package name `{name}` is declared by both {} and {}",
        .first.display(),
        .second.display()
    )]
    #[diagnostic(
        code(tsrefs::duplicate_name),
        help("package names must be unique across the workspace")
    )]
    DuplicatePackageName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("manifest {} has no `name`", .manifest.display())]
    #[diagnostic(code(tsrefs::missing_name))]
    MissingPackageName { manifest: PathBuf },

    #[error("could not detect yarn/npm/pnpm workspaces or lerna in {}", .root.display())]
    #[diagnostic(
        code(tsrefs::no_workspaces),
        help("declare `workspaces` in package.json or list `packages` in update-ts-references.yaml")
    )]
    NoWorkspaces { root: PathBuf },

    #[error("expected {config} in {}: {reason}", .directory.display())]
    #[diagnostic(
        code(tsrefs::config_missing),
        help("strict mode requires every package to carry a readable {config}")
    )]
    ConfigMissing {
        config: String,
        directory: PathBuf,
        reason: String,
    },
}
