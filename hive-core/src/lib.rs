//! Hive Core - Rules engine for the Hive board game
//!
//! This crate provides the game logic front ends call into:
//! - Hex geometry (offset coordinates on a fixed 51x51 grid)
//! - Piece catalog and per-color inventories
//! - Board state with stacked cells
//! - One-Hive connectivity oracle
//! - Per-kind move generation
//! - Placement/move legality, turn order, and the surround loss

pub mod hex;
pub mod pieces;
pub mod board;
mod trial;
pub mod connectivity;
pub mod movegen;
pub mod rules;
pub mod script;

// Re-exports for convenient access
pub use hex::{Bounds, Cell, Direction, GRID_SIDE, ORIGIN};
pub use pieces::{Color, Inventory, Piece, PieceKind, PIECES_PER_SIDE, STARTING_COUNTS};
pub use board::{Board, BoardView, StackView};
pub use connectivity::{component_count, is_connected};
pub use movegen::{moves_for, slip_moves};
pub use rules::{Action, GameResult, RuleViolation, QUEEN_DEADLINE};
pub use script::{Script, ScriptError};
