//! scoopscan CLI
//!
//! Shabal-256 sums and proof-of-capacity deadline scans.

mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{check_mode, hash_files, list_backends, scan_file, scoop_number, ScanArgs};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// =============================================================================
// CLI DEFINITION
// =============================================================================

#[derive(Parser)]
#[command(name = "scoopscan")]
#[command(about = "Shabal-256 and minimum-deadline scoop scanning", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print Shabal-256 sums of files
    Hash {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
    /// Verify Shabal-256 sums from file (like sha256sum -c)
    Check {
        #[arg(value_name = "FILE")]
        checksum_file: PathBuf,
    },
    /// Find the smallest deadline in a file of 64-byte scoops
    Scan(ScanArgs),
    /// Print the scoop number for a block height
    Scoop {
        /// Generation signature (64 hex characters)
        #[arg(long)]
        gensig: String,
        /// Block height
        #[arg(long)]
        height: u64,
    },
    /// List scan backends and whether this CPU supports them
    Backends,
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Hash { files } => hash_files(files)?,
        Commands::Check { checksum_file } => check_mode(checksum_file)?,
        Commands::Scan(args) => scan_file(args)?,
        Commands::Scoop { gensig, height } => scoop_number(gensig, *height)?,
        Commands::Backends => list_backends(),
    }

    Ok(())
}
