//! Piece catalog: colors, kinds, and per-color inventories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Index into per-color tables
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// The five bug kinds of the base game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Queen = 0,
    Beetle = 1,
    Spider = 2,
    Ant = 3,
    Grasshopper = 4,
}

/// Starting counts, indexed by `PieceKind::index`
pub const STARTING_COUNTS: [u8; 5] = [1, 2, 2, 3, 3];

/// Pieces per side when every kind is still in hand
pub const PIECES_PER_SIDE: u8 = 11;

impl PieceKind {
    pub const ALL: [PieceKind; 5] = [
        PieceKind::Queen,
        PieceKind::Beetle,
        PieceKind::Spider,
        PieceKind::Ant,
        PieceKind::Grasshopper,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn starting_count(self) -> u8 {
        STARTING_COUNTS[self.index()]
    }

    /// One-letter symbol used by text front ends
    pub fn symbol(self) -> char {
        match self {
            PieceKind::Queen => 'Q',
            PieceKind::Beetle => 'B',
            PieceKind::Spider => 'S',
            PieceKind::Ant => 'A',
            PieceKind::Grasshopper => 'G',
        }
    }

    /// Only beetles may climb onto an occupied cell
    pub fn can_stack(self) -> bool {
        self == PieceKind::Beetle
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Error returned when a piece kind name cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown piece kind: {0:?}")]
pub struct UnknownPieceKind(pub String);

impl FromStr for PieceKind {
    type Err = UnknownPieceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "q" | "queen" => Ok(PieceKind::Queen),
            "b" | "beetle" => Ok(PieceKind::Beetle),
            "s" | "spider" => Ok(PieceKind::Spider),
            "a" | "ant" => Ok(PieceKind::Ant),
            "g" | "grasshopper" => Ok(PieceKind::Grasshopper),
            _ => Err(UnknownPieceKind(s.to_string())),
        }
    }
}

/// A piece: immutable owner and kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub owner: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(owner: Color, kind: PieceKind) -> Self {
        Self { owner, kind }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner {
            Color::White => write!(f, "w{}", self.kind.symbol()),
            Color::Black => write!(f, "b{}", self.kind.symbol()),
        }
    }
}

/// Pieces a color still holds in hand
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    counts: [u8; 5],
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            counts: STARTING_COUNTS,
        }
    }
}

impl Inventory {
    pub fn remaining(&self, kind: PieceKind) -> u8 {
        self.counts[kind.index()]
    }

    /// Total pieces still in hand
    pub fn total(&self) -> u8 {
        self.counts.iter().sum()
    }

    /// Kinds with at least one piece left
    pub fn available(&self) -> impl Iterator<Item = PieceKind> + '_ {
        PieceKind::ALL
            .into_iter()
            .filter(move |&kind| self.remaining(kind) > 0)
    }

    /// Remove one piece of `kind` from hand; false if none left
    pub(crate) fn take(&mut self, kind: PieceKind) -> bool {
        let slot = &mut self.counts[kind.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_inventory() {
        let inv = Inventory::default();
        assert_eq!(inv.remaining(PieceKind::Queen), 1);
        assert_eq!(inv.remaining(PieceKind::Beetle), 2);
        assert_eq!(inv.remaining(PieceKind::Spider), 2);
        assert_eq!(inv.remaining(PieceKind::Ant), 3);
        assert_eq!(inv.remaining(PieceKind::Grasshopper), 3);
        assert_eq!(inv.total(), PIECES_PER_SIDE);
    }

    #[test]
    fn test_take_until_empty() {
        let mut inv = Inventory::default();
        assert!(inv.take(PieceKind::Queen));
        assert!(!inv.take(PieceKind::Queen));
        assert_eq!(inv.remaining(PieceKind::Queen), 0);
        assert!(inv.available().all(|k| k != PieceKind::Queen));
    }

    #[test]
    fn test_kind_lookup() {
        assert_eq!("Q".parse::<PieceKind>(), Ok(PieceKind::Queen));
        assert_eq!("grasshopper".parse::<PieceKind>(), Ok(PieceKind::Grasshopper));
        assert!("X".parse::<PieceKind>().is_err());
        for kind in PieceKind::ALL {
            assert_eq!(kind.symbol().to_string().parse::<PieceKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_only_beetle_stacks() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.can_stack(), kind == PieceKind::Beetle);
        }
    }
}
