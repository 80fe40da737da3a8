//! `tsrefs` sync command

use anyhow::{Context, Result};

use crate::cli::Cli;
use tsrefs::ops::{discover_manifests, sync_workspace, SyncOptions};
use tsrefs::util::config::{ToolConfig, DEFAULT_OPTIONS_FILE};
use tsrefs::util::fs;

/// Largest count representable as a process exit code.
const MAX_EXIT_CODE: usize = 255;

/// Run one sync pass. Returns the process exit code.
pub fn execute(cli: Cli) -> Result<i32> {
    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    let root = fs::absolutize(&cwd, &cli.cwd);

    let options_file = cli.usecase.as_deref().unwrap_or(DEFAULT_OPTIONS_FILE);
    let tool_config = ToolConfig::find(&root, options_file)?;
    if cli.usecase.is_some() && tool_config.is_none() {
        tracing::warn!("options file {} not found in {}", options_file, root.display());
    }

    let opts = merge_options(&cli, tool_config.as_ref());
    tracing::debug!("options: {:?}", opts);

    let manifests = discover_manifests(&root, tool_config.as_ref())?;
    let changes = sync_workspace(&root, &manifests, &opts)?;

    if opts.check {
        if changes == 0 {
            eprintln!("    Checked all config documents, up to date");
            return Ok(0);
        }
        eprintln!("    Checked {} config documents out of date", changes);
        return Ok(changes.min(MAX_EXIT_CODE) as i32);
    }

    eprintln!("    Updated {} config documents", changes);
    Ok(0)
}

/// Command-line values win over the options file; switches can only be
/// turned on.
fn merge_options(cli: &Cli, tool_config: Option<&ToolConfig>) -> SyncOptions {
    let mut opts = tool_config
        .map(SyncOptions::from_tool_config)
        .unwrap_or_default();

    if let Some(name) = &cli.config_name {
        opts.config_name = name.clone();
    }
    if let Some(name) = &cli.root_config_name {
        opts.root_config_name = name.clone();
    }
    opts.without_root_config |= cli.without_root_config;
    opts.create_ts_config |= cli.create_ts_config;
    opts.create_path_mappings |= cli.create_path_mappings;
    opts.strict |= cli.strict;
    opts.check |= cli.check;
    opts.discard_comments |= cli.discard_comments;
    opts.verbose = cli.verbose;
    opts
}
