//! Replay command - apply a script and report the position
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_position(), report_position()
//! - Level 3: print_text_position(), print_json_position()
//! - Level 4: formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use hive_core::{Board, Color, GameResult, PieceKind, Script};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ReplayArgs {
    /// Action script JSON file
    #[arg(long, value_name = "FILE")]
    pub script: PathBuf,

    /// Output the position as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run replay command
///
/// 1. Load and replay the script
/// 2. Report the final position
pub fn run(args: ReplayArgs) -> Result<()> {
    let (script, mut board) = load_position(&args.script)?;

    tracing::info!(
        "Replayed {:?}: {} actions, move {}",
        script.name,
        script.actions.len(),
        board.move_count()
    );

    report_position(&mut board, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load a script and replay it on a fresh board
pub fn load_position(path: &Path) -> Result<(Script, Board)> {
    let script = Script::load(path)?;
    let board = script
        .replay()
        .with_context(|| format!("Failed to replay script: {}", path.display()))?;
    Ok((script, board))
}

fn report_position(board: &mut Board, json: bool) -> Result<()> {
    if json {
        print_json_position(board)
    } else {
        print_text_position(board);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - OUTPUT
// ============================================================================

fn print_json_position(board: &mut Board) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput {
        result: GameResult,
        can_act: bool,
        board: hive_core::BoardView,
    }

    let player = board.current_player();
    let output = JsonOutput {
        result: board.result(),
        can_act: board.has_any_action(player),
        board: board.view(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_text_position(board: &mut Board) {
    let player = board.current_player();

    println!("\n=== Position ===");
    println!("Move:   {}", board.move_count());
    println!("To act: {}", player);
    println!("Result: {:?}", board.result());

    println!("\nStacks (bottom to top):");
    let view = board.view();
    if view.stacks.is_empty() {
        println!("  (empty)");
    }
    for stack in &view.stacks {
        let pieces: Vec<String> = stack.pieces.iter().map(|p| p.to_string()).collect();
        println!("  {:>7}  {}", stack.cell.to_string(), pieces.join(" "));
    }

    println!("\nIn hand:");
    for color in Color::ALL {
        println!("  {:<6} {}", color.to_string(), format_hand(board, color));
    }

    if board.result() == GameResult::Ongoing && !board.has_any_action(player) {
        println!("\n{} has no legal action and must pass", player);
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn format_hand(board: &Board, color: Color) -> String {
    PieceKind::ALL
        .iter()
        .map(|&kind| format!("{}x{}", kind.symbol(), board.remaining(color, kind)))
        .collect::<Vec<_>>()
        .join(" ")
}
