//! Purpose: `tokenstage` CLI entry point.
//! Role: Binary crate root; parses args, runs one staging pass, prints the report.
//! Invariants: The summary report goes to stdout; diagnostics go to stderr.
//! Invariants: Process exit code is derived from `core::to_exit_code`.
//! Invariants: A completed pass exits 0 even when images were missing.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tokenstage::core::{Error, ErrorKind, StageConfig, render_report, stage, to_exit_code};

const DEFAULT_WORKSPACE: &str = "/workspace";

/// Stage character token images from JSON manifests into a content workspace.
///
/// Reads `tokens.json` and `characters.json` under the workspace root, copies
/// each character's token image to its destination, and substitutes the
/// placeholder image when a source is missing.
#[derive(Debug, Parser)]
#[command(name = "tokenstage", version)]
struct Cli {
    /// Workspace root containing the manifests, images, and placeholder.
    #[arg(long, default_value = DEFAULT_WORKSPACE, value_name = "DIR")]
    workspace: PathBuf,
}

fn main() {
    let exit_code = match run() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("ERROR: {err}");
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<(), Error> {
    init_tracing();
    let cli = Cli::parse();
    let config = StageConfig::for_workspace(cli.workspace);
    let outcome = stage(&config)?;
    let report = render_report(&outcome);
    io::stdout().write_all(report.as_bytes()).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to write report")
            .with_source(err)
    })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
