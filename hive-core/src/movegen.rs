//! Move generation per piece kind
//!
//! Every candidate destination is validated by relocating the piece with a
//! `Trial`, asking the connectivity oracle, and letting the trial undo
//! itself.

use crate::board::Board;
use crate::connectivity::is_connected;
use crate::hex::{Cell, Direction};
use crate::pieces::PieceKind;
use rustc_hash::FxHashSet;

/// Steps a spider must take, no more, no less
const SPIDER_STEPS: usize = 3;

// ============================================================================
// DISPATCH
// ============================================================================

/// Legal destinations for the top piece of `cell`. Empty for an empty cell.
pub fn moves_for(board: &mut Board, cell: Cell) -> FxHashSet<Cell> {
    let Some(piece) = board.top_piece_at(cell) else {
        return FxHashSet::default();
    };

    match piece.kind {
        PieceKind::Queen => queen_moves(board, cell),
        PieceKind::Beetle => step_moves(board, cell, piece.kind),
        PieceKind::Grasshopper => grasshopper_moves(board, cell),
        PieceKind::Spider => spider_moves(board, cell),
        PieceKind::Ant => ant_moves(board, cell),
    }
}

// ============================================================================
// PRIMITIVES
// ============================================================================

/// One-cell slides out of `from`.
///
/// A destination must be empty, leave a two-cell gap to squeeze through
/// (a free cell shared with `from`), and keep contact with the hive (an
/// occupied cell shared with `from`).
pub fn slip_moves(board: &Board, from: Cell) -> Vec<Cell> {
    let free_here = board.free_adjacent_cells(from);
    let occupied_here = board.occupied_adjacent_cells(from);

    free_here
        .iter()
        .copied()
        .filter(|&dest| {
            let wide_enough = board
                .free_adjacent_cells(dest)
                .iter()
                .any(|c| free_here.contains(c));
            let in_contact = board
                .occupied_adjacent_cells(dest)
                .iter()
                .any(|c| occupied_here.contains(c));
            wide_enough && in_contact
        })
        .collect()
}

/// Whether moving the top piece of `from` to `to` keeps one hive
fn keeps_hive(board: &mut Board, from: Cell, to: Cell) -> bool {
    board
        .trial_relocate(from, to)
        .map_or(false, |trial| is_connected(&trial))
}

/// Slides available from `at` while the piece from `origin` stands there
fn slips_from(board: &mut Board, origin: Cell, at: Cell) -> Vec<Cell> {
    board
        .trial_relocate(origin, at)
        .map(|trial| slip_moves(&trial, at))
        .unwrap_or_default()
}

// ============================================================================
// PER-KIND GENERATORS
// ============================================================================

/// Queen: one slide
fn queen_moves(board: &mut Board, from: Cell) -> FxHashSet<Cell> {
    slip_moves(board, from)
        .into_iter()
        .filter(|&to| keeps_hive(board, from, to))
        .collect()
}

/// Beetle: one step in any direction, onto pieces when `kind` can stack
fn step_moves(board: &mut Board, from: Cell, kind: PieceKind) -> FxHashSet<Cell> {
    from.neighbors()
        .into_iter()
        .filter_map(|(_, n)| n)
        .filter(|&to| (kind.can_stack() || !board.is_occupied(to)) && keeps_hive(board, from, to))
        .collect()
}

/// Grasshopper: jump a straight run of at least one piece, landing on the
/// first empty cell beyond it
fn grasshopper_moves(board: &mut Board, from: Cell) -> FxHashSet<Cell> {
    let landings: Vec<Cell> = Direction::ALL
        .into_iter()
        .filter_map(|dir| jump_landing(board, from, dir))
        .collect();
    landings
        .into_iter()
        .filter(|&to| keeps_hive(board, from, to))
        .collect()
}

fn jump_landing(board: &Board, from: Cell, dir: Direction) -> Option<Cell> {
    let mut current = from.neighbor(dir)?;
    if !board.is_occupied(current) {
        return None;
    }
    while board.is_occupied(current) {
        current = current.neighbor(dir)?;
    }
    Some(current)
}

/// Spider: exactly three slides, never revisiting a cell of its path
fn spider_moves(board: &mut Board, from: Cell) -> FxHashSet<Cell> {
    let mut paths: Vec<Vec<Cell>> = vec![vec![from]];

    for _ in 0..SPIDER_STEPS {
        let mut extended = Vec::new();
        for path in &paths {
            let Some(&last) = path.last() else {
                continue;
            };
            for next in slips_from(board, from, last) {
                if !path.contains(&next) && keeps_hive(board, from, next) {
                    let mut longer = path.clone();
                    longer.push(next);
                    extended.push(longer);
                }
            }
        }
        paths = extended;
    }

    paths.iter().filter_map(|path| path.last().copied()).collect()
}

/// Ant: any number of slides, each stop keeping one hive
fn ant_moves(board: &mut Board, from: Cell) -> FxHashSet<Cell> {
    let mut reached: FxHashSet<Cell> = FxHashSet::default();
    let mut rejected: FxHashSet<Cell> = FxHashSet::default();
    reached.insert(from);
    let mut frontier = vec![from];

    while let Some(cell) = frontier.pop() {
        for next in slips_from(board, from, cell) {
            if reached.contains(&next) || rejected.contains(&next) {
                continue;
            }
            if keeps_hive(board, from, next) {
                reached.insert(next);
                frontier.push(next);
            } else {
                rejected.insert(next);
            }
        }
    }

    reached.remove(&from);
    reached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::ORIGIN;
    use crate::pieces::{Color, Piece};

    fn piece(color: Color, kind: PieceKind) -> Piece {
        Piece::new(color, kind)
    }

    fn step(cell: Cell, dir: Direction) -> Cell {
        cell.neighbor(dir).unwrap()
    }

    fn walk(from: Cell, dir: Direction, n: usize) -> Cell {
        (0..n).fold(from, |c, _| step(c, dir))
    }

    fn sorted(set: FxHashSet<Cell>) -> Vec<Cell> {
        let mut v: Vec<Cell> = set.into_iter().collect();
        v.sort_unstable();
        v
    }

    /// The six neighbours of ORIGIN form a ring; ORIGIN left empty
    fn ring_board(kind_at_north: PieceKind) -> Board {
        let mut board = Board::new();
        for dir in Direction::ALL {
            let kind = if dir == Direction::North { kind_at_north } else { PieceKind::Ant };
            board.add_piece(step(ORIGIN, dir), piece(Color::White, kind));
        }
        board
    }

    #[test]
    fn test_empty_cell_has_no_moves() {
        let mut board = Board::new();
        assert!(moves_for(&mut board, ORIGIN).is_empty());
    }

    #[test]
    fn test_slip_needs_contact() {
        // Two pieces: the mover can slide to the two cells touching both
        let mut board = Board::new();
        let north = step(ORIGIN, Direction::North);
        board.add_piece(ORIGIN, piece(Color::White, PieceKind::Queen));
        board.add_piece(north, piece(Color::Black, PieceKind::Queen));

        let slips = slip_moves(&board, ORIGIN);
        let expected = [step(ORIGIN, Direction::NorthWest), step(ORIGIN, Direction::NorthEast)];
        assert_eq!(slips.len(), 2);
        for cell in expected {
            assert!(slips.contains(&cell));
        }
    }

    #[test]
    fn test_slip_blocked_by_narrow_gap() {
        // Piece inside a ring with one opening cannot squeeze out
        let mut board = ring_board(PieceKind::Ant);
        board.remove_top_piece(step(ORIGIN, Direction::North));
        board.add_piece(ORIGIN, piece(Color::Black, PieceKind::Queen));
        assert!(slip_moves(&board, ORIGIN).is_empty());
    }

    #[test]
    fn test_queen_moves() {
        let mut board = Board::new();
        let north = step(ORIGIN, Direction::North);
        board.add_piece(ORIGIN, piece(Color::White, PieceKind::Queen));
        board.add_piece(north, piece(Color::Black, PieceKind::Queen));

        let moves = sorted(moves_for(&mut board, ORIGIN));
        let mut expected = vec![step(ORIGIN, Direction::NorthWest), step(ORIGIN, Direction::NorthEast)];
        expected.sort_unstable();
        assert_eq!(moves, expected);
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        // Middle of a straight line holds the hive together
        let mut board = Board::new();
        let north = step(ORIGIN, Direction::North);
        let south = step(ORIGIN, Direction::South);
        board.add_piece(north, piece(Color::White, PieceKind::Ant));
        board.add_piece(ORIGIN, piece(Color::White, PieceKind::Queen));
        board.add_piece(south, piece(Color::Black, PieceKind::Ant));
        assert!(moves_for(&mut board, ORIGIN).is_empty());
    }

    #[test]
    fn test_beetle_climbs() {
        let mut board = Board::new();
        let north = step(ORIGIN, Direction::North);
        board.add_piece(ORIGIN, piece(Color::White, PieceKind::Beetle));
        board.add_piece(north, piece(Color::Black, PieceKind::Queen));

        let moves = moves_for(&mut board, ORIGIN);
        assert!(moves.contains(&north));
        assert!(moves.contains(&step(ORIGIN, Direction::NorthWest)));
        assert!(moves.contains(&step(ORIGIN, Direction::NorthEast)));
        // Detached cells break the hive
        assert!(!moves.contains(&step(ORIGIN, Direction::South)));
        assert_eq!(moves.len(), 3);
    }

    #[test]
    fn test_step_onto_pieces_only_when_stacking() {
        let mut board = Board::new();
        let north = step(ORIGIN, Direction::North);
        board.add_piece(ORIGIN, piece(Color::White, PieceKind::Beetle));
        board.add_piece(north, piece(Color::Black, PieceKind::Queen));

        let climbing = step_moves(&mut board, ORIGIN, PieceKind::Beetle);
        assert!(climbing.contains(&north));
        let walking = step_moves(&mut board, ORIGIN, PieceKind::Queen);
        assert!(!walking.contains(&north));
        assert_eq!(walking.len(), 2);
    }

    #[test]
    fn test_beetle_steps_off_stack() {
        let mut board = Board::new();
        let north = step(ORIGIN, Direction::North);
        board.add_piece(ORIGIN, piece(Color::White, PieceKind::Queen));
        board.add_piece(north, piece(Color::Black, PieceKind::Queen));
        board.add_piece(north, piece(Color::White, PieceKind::Beetle));

        let moves = moves_for(&mut board, north);
        // The queen stays below, so every neighbour touching the hive is fine
        assert!(moves.contains(&ORIGIN));
        assert!(moves.contains(&walk(ORIGIN, Direction::North, 2)));
        assert_eq!(moves.len(), 6);
    }

    #[test]
    fn test_grasshopper_jumps_run() {
        let mut board = Board::new();
        board.add_piece(ORIGIN, piece(Color::White, PieceKind::Grasshopper));
        for i in 1..=3 {
            board.add_piece(walk(ORIGIN, Direction::SouthEast, i), piece(Color::Black, PieceKind::Ant));
        }

        let moves = moves_for(&mut board, ORIGIN);
        assert!(moves.contains(&walk(ORIGIN, Direction::SouthEast, 4)));
        for i in 1..=3 {
            assert!(!moves.contains(&walk(ORIGIN, Direction::SouthEast, i)));
        }
        // Only one direction has a run to jump
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn test_grasshopper_needs_adjacent_piece() {
        let mut board = Board::new();
        board.add_piece(ORIGIN, piece(Color::White, PieceKind::Grasshopper));
        board.add_piece(step(ORIGIN, Direction::North), piece(Color::Black, PieceKind::Ant));

        let moves = moves_for(&mut board, ORIGIN);
        assert_eq!(sorted(moves), vec![walk(ORIGIN, Direction::North, 2)]);
    }

    #[test]
    fn test_spider_moves_three() {
        // Spider beside a straight line of three: it walks three cells
        // along either side of the line
        let mut board = Board::new();
        let spider_at = step(ORIGIN, Direction::SouthWest);
        for i in 0..3 {
            board.add_piece(walk(ORIGIN, Direction::North, i), piece(Color::Black, PieceKind::Ant));
        }
        board.add_piece(spider_at, piece(Color::White, PieceKind::Spider));

        let moves = sorted(moves_for(&mut board, spider_at));
        let mut expected = vec![
            step(walk(ORIGIN, Direction::North, 2), Direction::NorthWest),
            step(ORIGIN, Direction::NorthEast),
        ];
        expected.sort_unstable();
        assert_eq!(moves, expected);
        assert_eq!(expected, vec![Cell::new(23, 24), Cell::new(25, 26)]);
    }

    #[test]
    fn test_ant_circles_hive() {
        let mut board = Board::new();
        let north = step(ORIGIN, Direction::North);
        board.add_piece(ORIGIN, piece(Color::White, PieceKind::Ant));
        board.add_piece(north, piece(Color::Black, PieceKind::Queen));

        let moves = moves_for(&mut board, ORIGIN);
        // Every free neighbour of the lone queen
        let mut expected = board.free_adjacent_cells(north);
        expected.sort_unstable();
        assert_eq!(sorted(moves), expected);
    }

    #[test]
    fn test_ant_cannot_enter_ring() {
        // Ring around ORIGIN with the north piece missing; ant outside
        let mut board = ring_board(PieceKind::Ant);
        let north = step(ORIGIN, Direction::North);
        board.remove_top_piece(north);
        let ant_at = walk(ORIGIN, Direction::South, 2);
        board.add_piece(ant_at, piece(Color::Black, PieceKind::Ant));

        let moves = moves_for(&mut board, ant_at);
        assert!(moves.contains(&north));
        assert!(!moves.contains(&ORIGIN));
    }

    #[test]
    fn test_move_generation_leaves_board_untouched() {
        let mut board = ring_board(PieceKind::Spider);
        board.add_piece(walk(ORIGIN, Direction::North, 2), piece(Color::Black, PieceKind::Grasshopper));
        let before = board.clone();
        for cell in board.all_occupied_cells() {
            moves_for(&mut board, cell);
        }
        assert_eq!(board, before);
    }
}
