//! Reversible trial mutations used to probe legality
//!
//! A `Trial` borrows the board mutably, applies one change, and undoes it
//! when dropped, on every exit path. The bounding box is restored too, so
//! a probe never leaves a trace in committed state.

use crate::board::Board;
use crate::hex::{Bounds, Cell};
use crate::pieces::Piece;
use std::ops::Deref;

enum Undo {
    /// Move the top piece of `to` back onto `from`
    Relocate { from: Cell, to: Cell },
    /// Pop the probe piece from `cell`
    Remove { cell: Cell },
}

pub(crate) struct Trial<'a> {
    board: &'a mut Board,
    undo: Undo,
    bounds: Option<Bounds>,
}

impl Board {
    /// Move the top piece of `from` onto `to` until the guard drops.
    /// `None` if `from` is empty.
    pub(crate) fn trial_relocate(&mut self, from: Cell, to: Cell) -> Option<Trial<'_>> {
        let bounds = self.bounds();
        let piece = self.remove_top_piece(from)?;
        self.add_piece(to, piece);
        Some(Trial {
            board: self,
            undo: Undo::Relocate { from, to },
            bounds,
        })
    }

    /// Push `piece` on `cell` until the guard drops
    pub(crate) fn trial_insert(&mut self, cell: Cell, piece: Piece) -> Trial<'_> {
        let bounds = self.bounds();
        self.add_piece(cell, piece);
        Trial {
            board: self,
            undo: Undo::Remove { cell },
            bounds,
        }
    }
}

impl Deref for Trial<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        match self.undo {
            Undo::Relocate { from, to } => {
                if let Some(piece) = self.board.remove_top_piece(to) {
                    self.board.add_piece(from, piece);
                }
            }
            Undo::Remove { cell } => {
                self.board.remove_top_piece(cell);
            }
        }
        self.board.set_bounds(self.bounds);
    }
}
