//! Hex grid geometry with offset (row, col) coordinates
//!
//! Columns are vertical zig-zags; odd columns sit half a cell lower than
//! even ones:
//!
//! ```text
//! +-----+     +-----+
//! | 0,0 +-----+ 0,2 +-----+
//! +-----+ 0,1 +-----+ 0,3 +
//! | 1,0 +-----+ 1,2 +-----+
//! +-----+ 1,1 +-----+ 1,3 +
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grid side length. A full game has 22 pieces, so no chain can run 25
/// cells from `ORIGIN` and legal play never reaches the edge.
pub const GRID_SIDE: i16 = 51;

/// Centre of the grid, where the first piece of a game goes
pub const ORIGIN: Cell = Cell::new(GRID_SIDE / 2, GRID_SIDE / 2);

/// Offset hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: i16,
    pub col: i16,
}

impl Cell {
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// Check if this cell is on the grid
    pub fn is_valid(&self) -> bool {
        (0..GRID_SIDE).contains(&self.row) && (0..GRID_SIDE).contains(&self.col)
    }

    /// Neighbour in `direction`, or `None` off the grid
    pub fn neighbor(&self, direction: Direction) -> Option<Cell> {
        let (dr, dc) = direction.offset(self.col);
        let cell = Cell::new(self.row + dr, self.col + dc);
        cell.is_valid().then_some(cell)
    }

    /// All six neighbours in `Direction::ALL` order
    pub fn neighbors(&self) -> [(Direction, Option<Cell>); 6] {
        Direction::ALL.map(|d| (d, self.neighbor(d)))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Error returned when a `row,col` string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid cell {0:?}, expected ROW,COL")]
pub struct InvalidCell(pub String);

impl FromStr for Cell {
    type Err = InvalidCell;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| InvalidCell(s.to_string()))?;
        let row = row.trim().parse().map_err(|_| InvalidCell(s.to_string()))?;
        let col = col.trim().parse().map_err(|_| InvalidCell(s.to_string()))?;
        Ok(Cell::new(row, col))
    }
}

/// The six hex directions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    North,
    South,
    NorthWest,
    SouthWest,
    NorthEast,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::South,
        Direction::NorthWest,
        Direction::SouthWest,
        Direction::NorthEast,
        Direction::SouthEast,
    ];

    /// (d_row, d_col) for a step from a cell in column `col`.
    /// Diagonal offsets depend on column parity.
    fn offset(self, col: i16) -> (i16, i16) {
        let even = col.rem_euclid(2) == 0;
        match (self, even) {
            (Direction::North, _) => (-1, 0),
            (Direction::South, _) => (1, 0),
            (Direction::NorthWest, true) => (-1, -1),
            (Direction::SouthWest, true) => (0, -1),
            (Direction::NorthEast, true) => (-1, 1),
            (Direction::SouthEast, true) => (0, 1),
            (Direction::NorthWest, false) => (0, -1),
            (Direction::SouthWest, false) => (1, -1),
            (Direction::NorthEast, false) => (0, 1),
            (Direction::SouthEast, false) => (1, 1),
        }
    }
}

/// Occupied extent of the board (inclusive on all sides)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub top: i16,
    pub bottom: i16,
    pub left: i16,
    pub right: i16,
}

impl Bounds {
    /// Bounds covering a single cell
    pub fn at(cell: Cell) -> Self {
        Self {
            top: cell.row,
            bottom: cell.row,
            left: cell.col,
            right: cell.col,
        }
    }

    /// Grow to include `cell`
    pub fn extend(&mut self, cell: Cell) {
        self.top = self.top.min(cell.row);
        self.bottom = self.bottom.max(cell.row);
        self.left = self.left.min(cell.col);
        self.right = self.right.max(cell.col);
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (self.top..=self.bottom).contains(&cell.row) && (self.left..=self.right).contains(&cell.col)
    }
}
