//! Board state: stacked cells, turn bookkeeping, and inventories

use crate::hex::{Bounds, Cell, Direction};
use crate::pieces::{Color, Inventory, Piece, PieceKind};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

// ============================================================================
// BOARD
// ============================================================================

/// The whole game: grid of stacks plus turn state.
///
/// Only `place`/`play_move` (see `rules`) commit changes that respect the
/// rules. `add_piece`/`remove_top_piece` are raw stack operations for
/// front ends that set up positions and for tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// Cell -> stack, bottom to top. Only non-empty stacks are stored.
    stacks: FxHashMap<Cell, Vec<Piece>>,

    /// Occupied extent; `None` until the first piece lands
    bounds: Option<Bounds>,

    /// Color to act
    current_player: Color,

    /// Increments after black's turn, starts at 1
    move_count: u16,

    /// Pieces in hand, indexed by `Color::index`
    inventories: [Inventory; 2],

    /// Whether each color has placed its queen
    queen_placed: [bool; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Empty board, white to move, full inventories
    pub fn new() -> Self {
        Self {
            stacks: FxHashMap::default(),
            bounds: None,
            current_player: Color::White,
            move_count: 1,
            inventories: [Inventory::default(); 2],
            queen_placed: [false; 2],
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn move_count(&self) -> u16 {
        self.move_count
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn inventory(&self, color: Color) -> &Inventory {
        &self.inventories[color.index()]
    }

    pub fn remaining(&self, color: Color, kind: PieceKind) -> u8 {
        self.inventory(color).remaining(kind)
    }

    pub fn queen_placed(&self, color: Color) -> bool {
        self.queen_placed[color.index()]
    }

    /// Whether no piece has been put down yet
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    // ========================================================================
    // CELL QUERIES
    // ========================================================================

    /// Topmost piece at `cell`
    pub fn top_piece_at(&self, cell: Cell) -> Option<Piece> {
        self.stacks.get(&cell).and_then(|stack| stack.last().copied())
    }

    /// Full stack at `cell`, bottom to top
    pub fn stack_at(&self, cell: Cell) -> &[Piece] {
        self.stacks.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.stacks.contains_key(&cell)
    }

    /// The six neighbours of `cell`; `None` where the grid ends
    pub fn adjacent_cells(&self, cell: Cell) -> [(Direction, Option<Cell>); 6] {
        cell.neighbors()
    }

    /// Empty on-grid neighbours
    pub fn free_adjacent_cells(&self, cell: Cell) -> Vec<Cell> {
        self.neighbors_where(cell, false)
    }

    /// Occupied on-grid neighbours
    pub fn occupied_adjacent_cells(&self, cell: Cell) -> Vec<Cell> {
        self.neighbors_where(cell, true)
    }

    fn neighbors_where(&self, cell: Cell, occupied: bool) -> Vec<Cell> {
        cell.neighbors()
            .into_iter()
            .filter_map(|(_, n)| n)
            .filter(|&n| self.is_occupied(n) == occupied)
            .collect()
    }

    /// Occupied cells, in no particular order
    pub fn occupied_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.stacks.keys().copied()
    }

    pub fn all_occupied_cells(&self) -> FxHashSet<Cell> {
        self.occupied_cells().collect()
    }

    /// Number of occupied cells (stacks count once)
    pub fn occupied_count(&self) -> usize {
        self.stacks.len()
    }

    /// Cells whose top piece belongs to `color`
    pub fn cells_of_color(&self, color: Color) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self
            .stacks
            .iter()
            .filter(|(_, stack)| stack.last().map(|p| p.owner) == Some(color))
            .map(|(&cell, _)| cell)
            .collect();
        cells.sort_unstable();
        cells
    }

    /// Empty cells touching `color` and not touching the opponent
    pub fn spawn_cells(&self, color: Color) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self
            .cells_of_color(color)
            .into_iter()
            .flat_map(|cell| self.free_adjacent_cells(cell))
            .filter(|&cell| !self.touches(cell, color.opponent()))
            .collect::<FxHashSet<_>>()
            .into_iter()
            .collect();
        cells.sort_unstable();
        cells
    }

    /// Whether any occupied neighbour of `cell` is topped by `color`
    pub fn touches(&self, cell: Cell, color: Color) -> bool {
        self.occupied_adjacent_cells(cell)
            .into_iter()
            .any(|n| self.top_piece_at(n).map(|p| p.owner) == Some(color))
    }

    /// Where `color`'s queen sits, on top or buried under beetles
    pub fn queen_position(&self, color: Color) -> Option<Cell> {
        if !self.queen_placed(color) {
            return None;
        }
        let queen = Piece::new(color, PieceKind::Queen);
        self.stacks
            .iter()
            .find(|(_, stack)| stack.contains(&queen))
            .map(|(&cell, _)| cell)
    }

    // ========================================================================
    // RAW MUTATION
    // ========================================================================

    /// Push `piece` on `cell` and grow the bounding box. No rule checks,
    /// no inventory change.
    pub fn add_piece(&mut self, cell: Cell, piece: Piece) {
        self.stacks.entry(cell).or_default().push(piece);
        match &mut self.bounds {
            Some(bounds) => bounds.extend(cell),
            None => self.bounds = Some(Bounds::at(cell)),
        }
    }

    /// Pop the top piece of `cell`. The bounding box never shrinks.
    pub fn remove_top_piece(&mut self, cell: Cell) -> Option<Piece> {
        let stack = self.stacks.get_mut(&cell)?;
        let piece = stack.pop();
        if stack.is_empty() {
            self.stacks.remove(&cell);
        }
        piece
    }

    pub(crate) fn set_bounds(&mut self, bounds: Option<Bounds>) {
        self.bounds = bounds;
    }

    // ========================================================================
    // TURN BOOKKEEPING
    // ========================================================================

    pub(crate) fn take_from_hand(&mut self, piece: Piece) -> bool {
        self.inventories[piece.owner.index()].take(piece.kind)
    }

    pub(crate) fn mark_queen_placed(&mut self, color: Color) {
        self.queen_placed[color.index()] = true;
    }

    /// Hand the turn over; the counter advances after black
    pub(crate) fn end_turn(&mut self) {
        if self.current_player == Color::Black {
            self.move_count = self.move_count.saturating_add(1);
        }
        self.current_player = self.current_player.opponent();
    }

    // ========================================================================
    // VIEW
    // ========================================================================

    /// Serializable snapshot for front ends
    pub fn view(&self) -> BoardView {
        let mut stacks: Vec<StackView> = self
            .stacks
            .iter()
            .map(|(&cell, pieces)| StackView {
                cell,
                pieces: pieces.clone(),
            })
            .collect();
        stacks.sort_unstable_by_key(|s| s.cell);

        let hand = |color: Color| -> Vec<(PieceKind, u8)> {
            PieceKind::ALL
                .into_iter()
                .map(|kind| (kind, self.remaining(color, kind)))
                .collect()
        };

        BoardView {
            current_player: self.current_player,
            move_count: self.move_count,
            bounds: self.bounds,
            white_hand: hand(Color::White),
            black_hand: hand(Color::Black),
            white_queen_placed: self.queen_placed(Color::White),
            black_queen_placed: self.queen_placed(Color::Black),
            stacks,
        }
    }
}

/// One occupied cell in a `BoardView`
#[derive(Clone, Debug, Serialize)]
pub struct StackView {
    pub cell: Cell,
    pub pieces: Vec<Piece>,
}

/// Display snapshot of a board (not a save format)
#[derive(Clone, Debug, Serialize)]
pub struct BoardView {
    pub current_player: Color,
    pub move_count: u16,
    pub bounds: Option<Bounds>,
    pub white_hand: Vec<(PieceKind, u8)>,
    pub black_hand: Vec<(PieceKind, u8)>,
    pub white_queen_placed: bool,
    pub black_queen_placed: bool,
    pub stacks: Vec<StackView>,
}
