//! Hive CLI - Command-line front end for the rules engine
//!
//! Commands:
//! - replay: Replay an action script and show the resulting position
//! - moves: List legal actions (or one piece's destinations) after a script
//! - pieces: Show the piece catalog

mod moves_cmd;
mod replay_cmd;

use clap::{Parser, Subcommand};
use hive_core::PieceKind;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hive")]
#[command(about = "Hive rules engine front end")]
struct Cli {
    /// Log filter, e.g. "debug" or "hive_core=trace" (defaults to RUST_LOG, then info)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a script and print the position
    Replay(replay_cmd::ReplayArgs),
    /// List legal actions after a script
    Moves(moves_cmd::MovesArgs),
    /// Show the piece catalog
    Pieces,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_level.as_deref());

    match cli.command {
        Commands::Replay(args) => replay_cmd::run(args),
        Commands::Moves(args) => moves_cmd::run(args),
        Commands::Pieces => {
            print_catalog();
            Ok(())
        }
    }
}

fn init_logging(level: Option<&str>) {
    let filter = level
        .and_then(|l| EnvFilter::try_new(l).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_catalog() {
    println!("{:<12} {:>6} {:>6}", "Kind", "Symbol", "Count");
    for kind in PieceKind::ALL {
        println!(
            "{:<12} {:>6} {:>6}",
            format!("{:?}", kind),
            kind.symbol(),
            kind.starting_count()
        );
    }
}
