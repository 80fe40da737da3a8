//! Reconciling computed references with a config document on disk.

use std::path::Path;

use anyhow::Result;
use serde_json::{Map, Value};

use crate::core::errors::SyncError;
use crate::core::reference::{references_to_value, ReferenceEntry};
use crate::core::tsconfig::ConfigDocument;

/// What to merge into which document.
#[derive(Debug, Clone, Copy)]
pub struct MergeRequest<'a> {
    /// Directory holding the document
    pub directory: &'a Path,

    /// Document file name within `directory`
    pub config_name: &'a str,

    /// Computed references, already in their final order
    pub references: &'a [ReferenceEntry],

    /// Computed `compilerOptions.paths`
    pub paths: &'a Map<String, Value>,
}

/// How to merge.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// Compare only; never write
    pub dry_run: bool,

    /// Also reconcile `compilerOptions.paths`
    pub create_path_mappings: bool,

    /// Treat an unreadable document as fatal
    pub strict: bool,

    /// Rewrite as plain JSON instead of editing in place
    pub discard_comments: bool,
}

/// Merge computed references (and optionally path mappings) into a document.
///
/// Returns 1 when the document differs from the computed state (and, unless
/// `dry_run`, has been rewritten), 0 when it already matches or could not be
/// read outside strict mode.
pub fn merge_references(request: &MergeRequest<'_>, opts: &MergeOptions) -> Result<usize> {
    let path = request.directory.join(request.config_name);
    let mut doc = match ConfigDocument::load(&path) {
        Ok(doc) => doc,
        Err(err) if opts.strict => {
            return Err(SyncError::ConfigMissing {
                config: request.config_name.to_string(),
                directory: request.directory.to_path_buf(),
                reason: format!("{:#}", err),
            }
            .into());
        }
        Err(err) => {
            tracing::error!("could not read {}: {:#}", path.display(), err);
            return Ok(0);
        }
    };

    let merged = carry_over(request.references, &doc.references());

    let references_match = doc.references_value() == references_to_value(&merged);
    let paths_match =
        !opts.create_path_mappings || doc.paths_value() == Value::Object(request.paths.clone());
    if references_match && paths_match {
        tracing::debug!("{} is up to date", path.display());
        return Ok(0);
    }

    if opts.dry_run {
        tracing::info!("{} is out of date", path.display());
        return Ok(1);
    }

    doc.set_references(&merged)?;
    if opts.create_path_mappings {
        doc.set_paths(request.paths)?;
    }
    doc.save(opts.discard_comments)?;

    tracing::info!("updated {}", path.display());
    Ok(1)
}

/// Copy extra fields of existing references onto computed ones with the same
/// `path`. Existing fields win over computed extras; `path` is never touched.
pub fn carry_over(computed: &[ReferenceEntry], existing: &[ReferenceEntry]) -> Vec<ReferenceEntry> {
    computed
        .iter()
        .map(|reference| {
            let mut merged = reference.clone();
            if let Some(previous) = existing.iter().rev().find(|e| e.path == reference.path) {
                for (key, value) in &previous.extra {
                    merged.extra.insert(key.clone(), value.clone());
                }
            }
            merged
        })
        .collect()
}
