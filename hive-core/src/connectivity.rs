//! One-Hive check: all occupied cells form a single connected cluster

use crate::board::Board;
use crate::hex::Cell;
use rustc_hash::FxHashSet;

/// True when the occupied cells form one component (trivially for 0 or 1)
pub fn is_connected(board: &Board) -> bool {
    let Some(seed) = board.occupied_cells().next() else {
        return true;
    };
    flood(board, seed).len() == board.occupied_count()
}

/// Number of connected components among occupied cells
pub fn component_count(board: &Board) -> usize {
    let mut seen: FxHashSet<Cell> = FxHashSet::default();
    let mut count = 0;
    for cell in board.occupied_cells() {
        if seen.contains(&cell) {
            continue;
        }
        seen.extend(flood(board, cell));
        count += 1;
    }
    count
}

/// Occupied cells reachable from `seed` across occupied neighbours
fn flood(board: &Board, seed: Cell) -> FxHashSet<Cell> {
    let mut reached = FxHashSet::default();
    reached.insert(seed);
    let mut stack = vec![seed];

    while let Some(cell) = stack.pop() {
        for next in board.occupied_adjacent_cells(cell) {
            if reached.insert(next) {
                stack.push(next);
            }
        }
    }

    reached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::{Direction, ORIGIN};
    use crate::pieces::{Color, Piece, PieceKind};

    fn ant(color: Color) -> Piece {
        Piece::new(color, PieceKind::Ant)
    }

    /// Cell reached by stepping `n` times from `from`
    fn walk(from: Cell, dir: Direction, n: usize) -> Cell {
        (0..n).fold(from, |c, _| c.neighbor(dir).unwrap())
    }

    #[test]
    fn test_empty_and_single() {
        let mut board = Board::new();
        assert!(is_connected(&board));
        assert_eq!(component_count(&board), 0);

        board.add_piece(ORIGIN, ant(Color::White));
        assert!(is_connected(&board));
        assert_eq!(component_count(&board), 1);
    }

    #[test]
    fn test_line_is_connected() {
        let mut board = Board::new();
        for i in 0..5 {
            board.add_piece(walk(ORIGIN, Direction::NorthEast, i), ant(Color::White));
        }
        assert!(is_connected(&board));
        assert_eq!(component_count(&board), 1);
    }

    #[test]
    fn test_gap_splits_hive() {
        let mut board = Board::new();
        board.add_piece(ORIGIN, ant(Color::White));
        board.add_piece(walk(ORIGIN, Direction::South, 2), ant(Color::Black));
        assert!(!is_connected(&board));
        assert_eq!(component_count(&board), 2);

        board.add_piece(walk(ORIGIN, Direction::South, 1), ant(Color::Black));
        assert!(is_connected(&board));
    }

    #[test]
    fn test_stack_counts_once() {
        let mut board = Board::new();
        board.add_piece(ORIGIN, ant(Color::White));
        board.add_piece(ORIGIN, Piece::new(Color::Black, PieceKind::Beetle));
        board.add_piece(walk(ORIGIN, Direction::SouthWest, 1), ant(Color::Black));
        assert!(is_connected(&board));
    }

    #[test]
    fn test_removing_bridge_disconnects() {
        let mut board = Board::new();
        for i in 0..3 {
            board.add_piece(walk(ORIGIN, Direction::North, i), ant(Color::White));
        }
        board.remove_top_piece(walk(ORIGIN, Direction::North, 1));
        assert!(!is_connected(&board));
        assert_eq!(component_count(&board), 2);
    }
}
