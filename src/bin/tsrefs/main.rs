//! tsrefs CLI - Keep TypeScript project references in sync

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

use tsrefs::SyncError;

mod cli;
mod commands;

use cli::Cli;

fn main() {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("tsrefs=debug")
    } else {
        EnvFilter::new("tsrefs=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match commands::sync::execute(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            if let Some(help) = e.downcast_ref::<SyncError>().and_then(|err| err.help()) {
                eprintln!("help: {}", help);
            }
            std::process::exit(1);
        }
    }
}
