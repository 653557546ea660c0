//! Pieces and their move history.
//!
//! A piece never stores its position. The current cell is derived from the
//! last move it made, which is also what makes undo a simple pop.

use std::fmt;

use crate::board::Cell;
use crate::journal::Move;

/// Side a piece belongs to. White starts on row 1 and moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    /// Moves up the board, towards higher rows.
    White,
    /// Moves down the board, towards row 1.
    Black,
}

impl Color {
    /// The opposing side.
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Movement rules a piece currently follows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// Moves one step forward, captures one step in any direction.
    Checker,
    /// Flying king: slides and captures along whole diagonals.
    Queen,
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Checker => write!(f, "C"),
            PieceKind::Queen => write!(f, "Q"),
        }
    }
}

/// Index of a piece in its game's piece arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub usize);

/// A single unit on the board, captured or not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    /// Current kind, changed by promotions.
    kind: PieceKind,
    /// Owning side, fixed for the whole game.
    pub color: Color,
    /// Cell the piece was placed on before any move.
    pub starting: Cell,
    /// Applied moves, oldest first.
    moves: Vec<Move>,
    /// Kinds held before each still-applied promotion, most recent last.
    previous_kinds: Vec<PieceKind>,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, starting: Cell) -> Self {
        Self {
            kind,
            color,
            starting,
            moves: Vec::new(),
            previous_kinds: Vec::new(),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn is_queen(&self) -> bool {
        self.kind == PieceKind::Queen
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Number of promotions currently applied to this piece.
    pub fn promotion_depth(&self) -> usize {
        self.previous_kinds.len()
    }

    /// Destination of the last move, or the starting cell.
    pub fn current(&self) -> Cell {
        self.moves.last().map_or(self.starting, |m| m.to)
    }

    pub fn push_move(&mut self, mv: Move) {
        if let Some(kind) = mv.promotion {
            self.previous_kinds.push(self.kind);
            self.kind = kind;
        }
        self.moves.push(mv);
    }

    /// Remove the last move, restoring the kind if it promoted.
    ///
    /// Returns `None` when the piece has not moved.
    pub fn pop_move(&mut self) -> Option<Move> {
        let mv = self.moves.pop()?;
        if mv.promotion.is_some() {
            if let Some(kind) = self.previous_kinds.pop() {
                self.kind = kind;
            }
        }
        Some(mv)
    }
}
