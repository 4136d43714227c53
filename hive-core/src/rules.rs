//! Legality and turn control: placements, moves, and the loss condition

use crate::board::Board;
use crate::connectivity::is_connected;
use crate::hex::{Cell, ORIGIN};
use crate::movegen::moves_for;
use crate::pieces::{Color, Piece, PieceKind};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CONSTANTS
// ============================================================================

/// A color's queen must be down by its turn number `QUEEN_DEADLINE`
pub const QUEEN_DEADLINE: u16 = 4;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    WhiteWins,
    BlackWins,
    /// Both queens surrounded by the same action
    Draw,
}

/// A player action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Put a piece from the current player's hand on `cell`
    Place { cell: Cell, kind: PieceKind },
    /// Move the top piece of `from` to `to`
    Move { from: Cell, to: Cell },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Place { cell, kind } => write!(f, "place {kind} at {cell}"),
            Action::Move { from, to } => write!(f, "move {from} -> {to}"),
        }
    }
}

/// Why an action was refused. The board is untouched whenever one of these
/// is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("the game is over: {0:?}")]
    GameOver(GameResult),

    #[error("cell {0} is off the grid")]
    OutOfGrid(Cell),

    #[error("it is {0}'s turn")]
    NotYourTurn(Color),

    #[error("cell {0} is already occupied")]
    CellOccupied(Cell),

    #[error("the hive would split")]
    BreaksHive,

    #[error("cell {0} touches an opposing piece")]
    TouchesOpponent(Cell),

    #[error("{0} must place the queen by its fourth turn")]
    QueenRequired(Color),

    #[error("{0} has no {1} left in hand")]
    NoneRemaining(Color, PieceKind),

    #[error("no piece at {0}")]
    EmptySource(Cell),

    #[error("{0} cannot move pieces before placing the queen")]
    QueenNotPlaced(Color),

    #[error("piece at {from} cannot reach {to}")]
    IllegalDestination { from: Cell, to: Cell },
}

// ============================================================================
// COMMITTING OPERATIONS
// ============================================================================

impl Board {
    /// Place `piece` on `cell`. True and turn handed over on success;
    /// false with the board unchanged otherwise.
    pub fn place(&mut self, cell: Cell, piece: Piece) -> bool {
        self.try_place(cell, piece).is_ok()
    }

    /// Move the top piece of `from` to `to`. True and turn handed over on
    /// success; false with the board unchanged otherwise.
    pub fn play_move(&mut self, from: Cell, to: Cell) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// Apply an action for the current player
    pub fn apply(&mut self, action: Action) -> Result<(), RuleViolation> {
        match action {
            Action::Place { cell, kind } => {
                let piece = Piece::new(self.current_player(), kind);
                self.try_place(cell, piece)
            }
            Action::Move { from, to } => self.try_move(from, to),
        }
    }

    /// `place`, reporting why a placement was refused
    pub fn try_place(&mut self, cell: Cell, piece: Piece) -> Result<(), RuleViolation> {
        if let Err(violation) = self.check_place(cell, piece) {
            tracing::debug!(%cell, %piece, %violation, "placement rejected");
            return Err(violation);
        }

        self.add_piece(cell, piece);
        // check_place verified the count, so this always succeeds
        self.take_from_hand(piece);
        if piece.kind == PieceKind::Queen {
            self.mark_queen_placed(piece.owner);
        }

        tracing::trace!(%cell, %piece, move_count = self.move_count(), "placed");
        self.commit();
        Ok(())
    }

    /// `play_move`, reporting why a move was refused
    pub fn try_move(&mut self, from: Cell, to: Cell) -> Result<(), RuleViolation> {
        if let Err(violation) = self.check_move(from, to) {
            tracing::debug!(%from, %to, %violation, "move rejected");
            return Err(violation);
        }

        if let Some(piece) = self.remove_top_piece(from) {
            self.add_piece(to, piece);
            tracing::trace!(%from, %to, %piece, move_count = self.move_count(), "moved");
        }
        self.commit();
        Ok(())
    }

    /// Finish a committed action: verify the hive, hand over the turn
    fn commit(&mut self) {
        assert!(
            is_connected(self),
            "hive split after a committed action at move {}",
            self.move_count()
        );
        self.end_turn();

        let result = self.result();
        if result != GameResult::Ongoing {
            tracing::info!(?result, move_count = self.move_count(), "game decided");
        }
    }

    // ========================================================================
    // LEGALITY CHECKS
    // ========================================================================

    fn check_place(&mut self, cell: Cell, piece: Piece) -> Result<(), RuleViolation> {
        let color = piece.owner;

        self.check_ongoing()?;
        if !cell.is_valid() {
            return Err(RuleViolation::OutOfGrid(cell));
        }
        if color != self.current_player() {
            return Err(RuleViolation::NotYourTurn(self.current_player()));
        }
        if self.is_occupied(cell) {
            return Err(RuleViolation::CellOccupied(cell));
        }
        if !is_connected(&self.trial_insert(cell, piece)) {
            return Err(RuleViolation::BreaksHive);
        }
        // Both colors' opening placements may touch the other color
        if self.move_count() > 1 && self.touches(cell, color.opponent()) {
            return Err(RuleViolation::TouchesOpponent(cell));
        }
        if self.move_count() >= QUEEN_DEADLINE
            && !self.queen_placed(color)
            && piece.kind != PieceKind::Queen
        {
            return Err(RuleViolation::QueenRequired(color));
        }
        if self.remaining(color, piece.kind) == 0 {
            return Err(RuleViolation::NoneRemaining(color, piece.kind));
        }
        Ok(())
    }

    fn check_move(&mut self, from: Cell, to: Cell) -> Result<(), RuleViolation> {
        self.check_ongoing()?;
        let piece = self
            .top_piece_at(from)
            .ok_or(RuleViolation::EmptySource(from))?;

        if piece.owner != self.current_player() {
            return Err(RuleViolation::NotYourTurn(self.current_player()));
        }
        if !self.queen_placed(piece.owner) {
            return Err(RuleViolation::QueenNotPlaced(piece.owner));
        }
        if !to.is_valid() {
            return Err(RuleViolation::OutOfGrid(to));
        }
        if !self.moves_for(from).contains(&to) {
            return Err(RuleViolation::IllegalDestination { from, to });
        }
        Ok(())
    }

    /// Nothing may be played once a queen is surrounded
    fn check_ongoing(&self) -> Result<(), RuleViolation> {
        match self.result() {
            GameResult::Ongoing => Ok(()),
            decided => Err(RuleViolation::GameOver(decided)),
        }
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Legal destinations of the top piece at `cell`
    pub fn moves_for(&mut self, cell: Cell) -> rustc_hash::FxHashSet<Cell> {
        moves_for(self, cell)
    }

    /// `color`'s queen is down and all six neighbours are occupied
    pub fn has_lost(&self, color: Color) -> bool {
        self.queen_position(color)
            .map_or(false, |cell| self.occupied_adjacent_cells(cell).len() == 6)
    }

    pub fn result(&self) -> GameResult {
        match (self.has_lost(Color::White), self.has_lost(Color::Black)) {
            (true, true) => GameResult::Draw,
            (true, false) => GameResult::BlackWins,
            (false, true) => GameResult::WhiteWins,
            (false, false) => GameResult::Ongoing,
        }
    }

    /// Every (cell, kind) `color` could place right now
    pub fn legal_placements(&mut self, color: Color) -> Vec<(Cell, PieceKind)> {
        if color != self.current_player() || self.result() != GameResult::Ongoing {
            return vec![];
        }

        // Any cell works on an empty board; the centre stands for all of them
        let candidates: Vec<Cell> = if self.is_empty() {
            vec![ORIGIN]
        } else if self.move_count() == 1 {
            let mut cells: Vec<Cell> = self
                .occupied_cells()
                .flat_map(|c| self.free_adjacent_cells(c))
                .collect();
            cells.sort_unstable();
            cells.dedup();
            cells
        } else {
            self.spawn_cells(color)
        };

        let kinds: Vec<PieceKind> = self.inventory(color).available().collect();
        let mut placements = Vec::new();
        for cell in candidates {
            for &kind in &kinds {
                if self.check_place(cell, Piece::new(color, kind)).is_ok() {
                    placements.push((cell, kind));
                }
            }
        }
        placements
    }

    /// Every (from, to) move `color` could make right now
    pub fn legal_moves(&mut self, color: Color) -> Vec<(Cell, Cell)> {
        if color != self.current_player()
            || !self.queen_placed(color)
            || self.result() != GameResult::Ongoing
        {
            return vec![];
        }

        let mut moves = Vec::new();
        for from in self.cells_of_color(color) {
            let mut targets: Vec<Cell> = self.moves_for(from).into_iter().collect();
            targets.sort_unstable();
            moves.extend(targets.into_iter().map(|to| (from, to)));
        }
        moves
    }

    /// All legal actions for `color`
    pub fn legal_actions(&mut self, color: Color) -> Vec<Action> {
        let placements = self
            .legal_placements(color)
            .into_iter()
            .map(|(cell, kind)| Action::Place { cell, kind });
        let moves = self
            .legal_moves(color)
            .into_iter()
            .map(|(from, to)| Action::Move { from, to });
        placements.chain(moves).collect()
    }

    /// Whether `color` can act at all. The rules engine has no pass;
    /// front ends use this to offer one.
    pub fn has_any_action(&mut self, color: Color) -> bool {
        !self.legal_placements(color).is_empty() || !self.legal_moves(color).is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
