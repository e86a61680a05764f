//! taxi CLI - Tabular Q-learning agents for the taxi grid world
//!
//! This CLI provides:
//! - Training flat, heuristic and decomposed agents
//! - Decoding state identifiers

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taxi")]
#[command(version, about = "Tabular Q-learning agents for the taxi grid world", long_about = None)]
struct Cli {
    /// Log every episode (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent and report its best moving-average return
    Train(Box<taxi_decomp::cli::commands::train::TrainArgs>),

    /// Decode a state identifier into its fields
    Decode(taxi_decomp::cli::commands::decode::DecodeArgs),
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "taxi_decomp=debug"
    } else {
        "taxi_decomp=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Train(args) => taxi_decomp::cli::commands::train::execute(*args),
        Commands::Decode(args) => taxi_decomp::cli::commands::decode::execute(args),
    }
}
