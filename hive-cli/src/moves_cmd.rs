//! Moves command - list legal actions after a script
//!
//! With `--cell`, lists the destinations of the piece on that cell;
//! otherwise lists every legal action for the player to act.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use hive_core::{Action, Cell};

use crate::replay_cmd::load_position;

#[derive(Args)]
pub struct MovesArgs {
    /// Action script JSON file
    #[arg(long, value_name = "FILE")]
    pub script: PathBuf,

    /// Only list destinations for the piece at ROW,COL
    #[arg(long, value_name = "ROW,COL")]
    pub cell: Option<Cell>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: MovesArgs) -> Result<()> {
    let (_, mut board) = load_position(&args.script)?;
    let player = board.current_player();

    let actions: Vec<Action> = match args.cell {
        Some(from) => {
            let Some(piece) = board.top_piece_at(from) else {
                bail!("No piece at {}", from);
            };
            tracing::debug!("Listing destinations for {} at {}", piece, from);
            let mut targets: Vec<Cell> = board.moves_for(from).into_iter().collect();
            targets.sort_unstable();
            targets
                .into_iter()
                .map(|to| Action::Move { from, to })
                .collect()
        }
        None => board.legal_actions(player),
    };

    tracing::info!("{} legal action(s) for {}", actions.len(), player);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&actions)?);
    } else {
        for action in &actions {
            println!("{}", action);
        }
    }

    Ok(())
}
