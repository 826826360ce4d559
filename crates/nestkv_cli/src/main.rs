//! NestKV CLI
//!
//! Line-oriented shell over an in-memory NestKV store.
//!
//! Commands are read from stdin, or from a script with `--script`. Replies go
//! to stdout, logs to stderr. Run `HELP` inside the shell for the command list.

mod command;
mod error;
mod session;

use clap::Parser;
use nestkv_core::{Store, StoreConfig};
use session::{OutputFormat, Session};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// NestKV interactive shell.
#[derive(Parser)]
#[command(name = "nestkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format for STATS
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// End the session with an error on the first failed line
    #[arg(long)]
    stop_on_error: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let store = Store::with_config(StoreConfig::default());
    let mut session = Session::new(store, io::stdout().lock(), cli.format)
        .stop_on_error(cli.stop_on_error);

    let summary = match &cli.script {
        Some(path) => {
            info!("Running script {:?}", path);
            let file = File::open(path)?;
            session.run(BufReader::new(file))?
        }
        None => session.run(io::stdin().lock())?,
    };

    info!(
        lines = summary.lines,
        errors = summary.errors,
        keys = session.store().base_len(),
        "session finished"
    );
    Ok(())
}
