//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;

/// tsrefs - Keep TypeScript project references in sync with workspace dependencies
#[derive(Parser)]
#[command(name = "tsrefs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Workspace root
    #[arg(long, default_value = ".")]
    pub cwd: PathBuf,

    /// Config document name to maintain in each package
    #[arg(long = "configName", visible_alias = "config-name", value_name = "NAME")]
    pub config_name: Option<String>,

    /// Config document name to maintain at the workspace root
    #[arg(long = "rootConfigName", visible_alias = "root-config-name", value_name = "NAME")]
    pub root_config_name: Option<String>,

    /// Leave the root config document alone
    #[arg(long = "withoutRootConfig", visible_alias = "without-root-config")]
    pub without_root_config: bool,

    /// Create a config for packages with a TypeScript `main` but no config
    #[arg(long = "createTsConfig", visible_alias = "create-ts-config")]
    pub create_ts_config: bool,

    /// Maintain `compilerOptions.paths` alongside references
    #[arg(long = "createPathMappings", visible_alias = "create-path-mappings")]
    pub create_path_mappings: bool,

    /// Fail when a config document is missing or cannot be read
    #[arg(long)]
    pub strict: bool,

    /// Report out-of-date documents without writing; exits with their count
    #[arg(long)]
    pub check: bool,

    /// Rewrite documents as plain JSON, dropping comments
    #[arg(long = "discardComments", visible_alias = "discard-comments")]
    pub discard_comments: bool,

    /// Options file to read instead of update-ts-references.yaml
    #[arg(long, value_name = "FILE")]
    pub usecase: Option<String>,
}
