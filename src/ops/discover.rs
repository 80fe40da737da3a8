//! Workspace package discovery.
//!
//! Package patterns come from the first source that declares any:
//!
//! 1. `packages` in the options file
//! 2. `workspaces` in the root `package.json` (yarn, npm)
//! 3. `packages` in `lerna.json`
//! 4. `packages` in `pnpm-workspace.yaml`

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use serde::Deserialize;
use walkdir::WalkDir;

use crate::core::errors::SyncError;
use crate::core::manifest::{PackageManifest, MANIFEST_NAME};
use crate::util::config::ToolConfig;
use crate::util::fs;

pub const LERNA_CONFIG: &str = "lerna.json";
pub const PNPM_WORKSPACE: &str = "pnpm-workspace.yaml";

/// Lerna's default when `lerna.json` has no `packages` key.
const LERNA_DEFAULT_PACKAGES: &str = "packages/*";

/// Directories never descended into.
const PRUNED_DIRS: &[&str] = &["node_modules", ".git"];

#[derive(Debug, Deserialize)]
struct LernaConfig {
    packages: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct PnpmWorkspace {
    #[serde(default)]
    packages: Vec<String>,
}

/// Find the `package.json` of every workspace package under `root`.
pub fn discover_manifests(root: &Path, tool_config: Option<&ToolConfig>) -> Result<Vec<PathBuf>> {
    let patterns = workspace_patterns(root, tool_config)?;
    tracing::debug!("workspace patterns: {:?}", patterns);

    let manifests = resolve_patterns(root, &patterns)?;
    tracing::debug!("found {} workspace packages", manifests.len());
    Ok(manifests)
}

/// Workspace patterns declared at `root`, from the first source that has any.
pub fn workspace_patterns(root: &Path, tool_config: Option<&ToolConfig>) -> Result<Vec<String>> {
    if let Some(packages) = tool_config.and_then(|c| c.packages.as_ref()) {
        if !packages.is_empty() {
            return Ok(packages.clone());
        }
    }

    let manifest_path = root.join(MANIFEST_NAME);
    if manifest_path.is_file() {
        let manifest = PackageManifest::load(&manifest_path)?;
        if let Some(workspaces) = manifest.workspaces {
            return Ok(workspaces.patterns().to_vec());
        }
    }

    let lerna_path = root.join(LERNA_CONFIG);
    if lerna_path.is_file() {
        let content = fs::read_to_string(&lerna_path)?;
        let lerna: LernaConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", lerna_path.display()))?;
        return Ok(lerna
            .packages
            .unwrap_or_else(|| vec![LERNA_DEFAULT_PACKAGES.to_string()]));
    }

    let pnpm_path = root.join(PNPM_WORKSPACE);
    if pnpm_path.is_file() {
        let content = fs::read_to_string(&pnpm_path)?;
        let pnpm: PnpmWorkspace = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse {}", pnpm_path.display()))?;
        return Ok(pnpm.packages);
    }

    Err(SyncError::NoWorkspaces {
        root: root.to_path_buf(),
    }
    .into())
}

/// Expand workspace patterns into manifest paths.
///
/// Patterns prefixed with `!` exclude. Matches keep pattern order: each
/// pattern's matches are sorted, and a directory matched by several patterns
/// stays at its first match.
pub fn resolve_patterns(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut inclusions = Vec::new();
    let mut exclusions = Vec::new();
    for raw in patterns {
        let (negated, pattern) = match raw.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, raw.as_str()),
        };
        let pattern = normalize_pattern(pattern);
        let compiled = Pattern::new(&pattern)
            .with_context(|| format!("invalid workspace pattern `{}`", raw))?;
        if negated {
            exclusions.push(compiled);
        } else {
            inclusions.push(compiled);
        }
    }

    let candidates = package_dirs(root);
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let mut matched: Vec<&str> = Vec::new();
    for pattern in &inclusions {
        for candidate in &candidates {
            if !pattern.matches_with(candidate, options) || matched.contains(&candidate.as_str()) {
                continue;
            }
            if exclusions.iter().any(|e| e.matches_with(candidate, options)) {
                tracing::debug!("excluding {}", candidate);
                continue;
            }
            matched.push(candidate);
        }
    }

    Ok(matched
        .into_iter()
        .map(|rel| root.join(rel).join(MANIFEST_NAME))
        .collect())
}

fn normalize_pattern(pattern: &str) -> String {
    let pattern = pattern.trim();
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    let pattern = pattern.strip_suffix(MANIFEST_NAME).unwrap_or(pattern);
    pattern.trim_end_matches('/').to_string()
}

/// Directories below `root` (relative, `/`-separated, sorted) holding a
/// `package.json`.
fn package_dirs(root: &Path) -> Vec<String> {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_str().unwrap_or("");
            !(e.file_type().is_dir() && PRUNED_DIRS.contains(&name))
        })
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_dir() && e.path() != root)
        .filter(|e| e.path().join(MANIFEST_NAME).is_file())
        .filter_map(|e| {
            let rel = e.path().strip_prefix(root).ok()?;
            Some(fs::to_posix(rel))
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
