//! Moves and the game journal.

use std::fmt;

use crate::board::Cell;
use crate::piece::{PieceId, PieceKind};

/// A single displacement of one piece.
///
/// `capture` names the captured piece itself rather than a cell, so undo can
/// bring back exactly that unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    /// Cell the piece leaves.
    pub from: Cell,
    /// Cell the piece lands on.
    pub to: Cell,
    /// Piece removed by this move, if it is a capture.
    pub capture: Option<PieceId>,
    /// Kind the piece becomes on landing, set when a checker reaches the far row.
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Cell, to: Cell) -> Self {
        Self {
            from,
            to,
            capture: None,
            promotion: None,
        }
    }

    pub fn capturing(from: Cell, to: Cell, target: PieceId) -> Self {
        Self {
            capture: Some(target),
            ..Self::new(from, to)
        }
    }

    pub fn with_promotion(self, kind: PieceKind) -> Self {
        Self {
            promotion: Some(kind),
            ..self
        }
    }

    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{sep}{}", self.from, self.to)
    }
}

/// Ordered log of every applied move, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Journal {
    moves: Vec<Move>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn push_move(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub fn pop_move(&mut self) -> Option<Move> {
        self.moves.pop()
    }

    /// The move `offset` entries from the end (`1` is the most recent).
    pub fn last_move(&self, offset: usize) -> Option<&Move> {
        if offset == 0 {
            return None;
        }
        let idx = self.moves.len().checked_sub(offset)?;
        self.moves.get(idx)
    }

    /// Forget every move. Pieces keep their own history, so callers must
    /// unwind those separately.
    pub fn clear(&mut self) {
        self.moves.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_display() {
        let simple = Move::new(Cell::new(3, 1), Cell::new(4, 2));
        assert_eq!(simple.to_string(), "a3-b4");

        let capture = Move::capturing(Cell::new(3, 1), Cell::new(5, 3), PieceId(0));
        assert_eq!(capture.to_string(), "a3xc5");
    }

    #[test]
    fn test_last_move_offsets() {
        let mut journal = Journal::new();
        assert!(journal.last_move(1).is_none());

        let a = Move::new(Cell::new(3, 1), Cell::new(4, 2));
        let b = Move::new(Cell::new(6, 2), Cell::new(5, 1));
        journal.push_move(a);
        journal.push_move(b);

        assert_eq!(journal.last_move(1), Some(&b));
        assert_eq!(journal.last_move(2), Some(&a));
        assert_eq!(journal.last_move(3), None);
        assert_eq!(journal.last_move(0), None);
    }

    #[test]
    fn test_pop_and_clear() {
        let mut journal = Journal::new();
        assert_eq!(journal.pop_move(), None);

        let a = Move::new(Cell::new(3, 1), Cell::new(4, 2));
        journal.push_move(a);
        journal.push_move(a);
        assert_eq!(journal.pop_move(), Some(a));
        assert_eq!(journal.len(), 1);

        journal.clear();
        assert!(journal.is_empty());
    }
}
