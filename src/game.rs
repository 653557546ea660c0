//! Game state and the turn state machine.
//!
//! A [`Game`] owns the board, both players, an arena of every piece ever in
//! play, the ordered capture list and the journal. Captured pieces stay in the
//! arena and are only filtered out of board queries, so undo can restore them
//! by id.
//!
//! The "mid capture chain" state is never stored. After a capturing move the
//! mover's captures are recomputed, and the turn passes only if none remain.

use std::fmt;

use thiserror::Error;
use tracing::{debug, warn};

use crate::board::{Board, Cell};
use crate::calculator;
use crate::constants::{DEFAULT_COLS, DEFAULT_ROWS, home_rows};
use crate::journal::{Journal, Move};
use crate::piece::{Color, Piece, PieceId, PieceKind};
use crate::player::Player;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// No live piece stands on the move's source cell.
    #[error("there is no piece at {0}")]
    NoPieceAtSource(Cell),
    /// A journal could not be replayed onto a fresh game.
    #[error("replay failed at move {index}: {source}")]
    Replay {
        /// Position of the rejected move in the journal, from 0.
        index: usize,
        #[source]
        source: Box<GameError>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    board: Board,
    players: [Player; 2],
    pieces: Vec<Piece>,
    captures: Vec<PieceId>,
    active: Color,
    journal: Journal,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A game on the default board with the standard formation.
    pub fn new() -> Self {
        Self::with_size(DEFAULT_ROWS, DEFAULT_COLS)
    }

    /// A game on a `rows x cols` board with the standard formation.
    ///
    /// White fills the bottom home rows, Black the top ones, both on the dark
    /// squares (`row + col` even).
    pub fn with_size(rows: usize, cols: usize) -> Self {
        let mut game = Self::empty(rows, cols);
        let depth = home_rows(rows);

        for row in 1..=depth {
            game.fill_row(row, Color::White);
        }
        for row in (rows + 1 - depth..=rows).rev() {
            game.fill_row(row, Color::Black);
        }
        game
    }

    /// A game with no pieces, White to move. Used to set up custom positions.
    pub fn empty(rows: usize, cols: usize) -> Self {
        let players = Player::pair();
        let active = players[0].color;
        Self {
            board: Board::new(rows, cols),
            players,
            pieces: Vec::new(),
            captures: Vec::new(),
            active,
            journal: Journal::new(),
        }
    }

    /// Rebuild a game by applying `moves` in order to a fresh formation.
    ///
    /// Piece ids are assigned deterministically, so a journal taken from a game
    /// of the same size replays onto the same units.
    pub fn replay<'a>(
        rows: usize,
        cols: usize,
        moves: impl IntoIterator<Item = &'a Move>,
    ) -> Result<Self, GameError> {
        let mut game = Self::with_size(rows, cols);
        for (index, mv) in moves.into_iter().enumerate() {
            game.play_move(*mv)
                .map_err(|err| GameError::Replay {
                    index,
                    source: Box::new(err),
                })?;
        }
        Ok(game)
    }

    fn fill_row(&mut self, row: usize, color: Color) {
        for col in 1..=self.board.cols {
            let cell = Cell::new(row, col);
            if self.board.is_dark(cell) {
                self.add_piece(PieceKind::Checker, color, cell);
            }
        }
    }

    /// Put a new piece on the board and return its id.
    ///
    /// The caller is responsible for `cell` being on the board and empty.
    pub fn add_piece(&mut self, kind: PieceKind, color: Color, cell: Cell) -> PieceId {
        debug_assert!(self.piece_at(cell).is_none(), "{cell} is occupied");
        self.pieces.push(Piece::new(kind, color, cell));
        PieceId(self.pieces.len() - 1)
    }

    /// Hand the move to `color`. Only meaningful while setting up a position.
    pub fn set_active_color(&mut self, color: Color) {
        self.active = color;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Every piece ever in play, captured ones included.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0)
    }

    /// Captured pieces, in capture order.
    pub fn captures(&self) -> &[PieceId] {
        &self.captures
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn active_color(&self) -> Color {
        self.active
    }

    pub fn is_captured(&self, id: PieceId) -> bool {
        self.captures.contains(&id)
    }

    pub fn player_of(&self, color: Color) -> &Player {
        let idx = self.seat(color);
        &self.players[idx]
    }

    /// The player whose turn it is.
    pub fn player(&self) -> &Player {
        self.player_of(self.active)
    }

    pub fn next_player(&self) -> &Player {
        let idx = self.seat(self.active);
        &self.players[(idx + 1) % self.players.len()]
    }

    pub fn prev_player(&self) -> &Player {
        let idx = self.seat(self.active);
        &self.players[(idx + self.players.len() - 1) % self.players.len()]
    }

    fn seat(&self, color: Color) -> usize {
        self.players
            .iter()
            .position(|p| p.color == color)
            .unwrap_or(0)
    }

    /// Pieces still on the board.
    pub fn live_pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .map(|(i, p)| (PieceId(i), p))
            .filter(|(id, _)| !self.is_captured(*id))
    }

    /// The live piece standing on `cell`.
    pub fn piece_at(&self, cell: Cell) -> Option<PieceId> {
        self.live_pieces()
            .find(|(_, p)| p.current() == cell)
            .map(|(id, _)| id)
    }

    /// All pieces of `color`, captured ones included.
    pub fn pieces_of(&self, color: Color) -> Vec<PieceId> {
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_, p)| p.color == color)
            .map(|(i, _)| PieceId(i))
            .collect()
    }

    /// Pieces of `color` that have been captured.
    pub fn captures_of(&self, color: Color) -> Vec<PieceId> {
        self.captures
            .iter()
            .copied()
            .filter(|id| self.pieces[id.0].color == color)
            .collect()
    }

    /// The piece that must keep capturing, if a capture chain is in progress.
    ///
    /// A chain is in progress when the last move was a capture and its mover
    /// still has the turn.
    pub fn chain_piece(&self) -> Option<PieceId> {
        let last = self.journal.last_move(1)?;
        last.capture?;
        let id = self.piece_at(last.to)?;
        (self.pieces[id.0].color == self.active).then_some(id)
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Apply `mv` to the piece on `mv.from`.
    ///
    /// Legality is not checked; moves should come from [`calculator::moves`].
    /// After a capture the turn stays with the mover while the same piece can
    /// capture again.
    pub fn play_move(&mut self, mv: Move) -> Result<(), GameError> {
        let id = self
            .piece_at(mv.from)
            .ok_or(GameError::NoPieceAtSource(mv.from))?;

        self.pieces[id.0].push_move(mv);
        self.journal.push_move(mv);

        if let Some(target) = mv.capture {
            self.captures.push(target);

            if calculator::has_capture(self, id) {
                debug!(%mv, color = %self.active, "capture chain continues");
                return Ok(());
            }
        }

        debug!(%mv, color = %self.active, "move applied");
        self.active = self.next_player().color;
        Ok(())
    }

    /// Take back the last move. A no-op on an empty journal.
    ///
    /// When the undone move was a capture and the move before it captured a
    /// piece of the same color, that move is taken back too, so a whole capture
    /// chain unwinds in one call. The turn then goes back to whoever made the
    /// undone moves.
    pub fn undo(&mut self) {
        while let Some(mv) = self.journal.last_move(1).copied() {
            let Some(mover) = self.piece_at(mv.to) else {
                warn!(%mv, "journal move has no piece on its destination");
                return;
            };
            self.journal.pop_move();
            self.pieces[mover.0].pop_move();
            let color = self.pieces[mover.0].color;

            if let Some(target) = mv.capture {
                self.captures.pop();

                let captured = self.pieces[target.0].color;
                let chained = self
                    .journal
                    .last_move(1)
                    .and_then(|last| last.capture)
                    .is_some_and(|prev| self.pieces[prev.0].color == captured);
                if chained {
                    debug!(%mv, "undo continues through capture chain");
                    continue;
                }
            }

            debug!(%mv, color = %color, "move undone");
            self.active = color;
            return;
        }
    }

    /// Take back every move, returning to the position before the first one.
    pub fn restart(&mut self) {
        if let Some(first) = self.journal.moves().first() {
            if let Some(piece) = self.pieces.iter().find(|p| p.moves().first() == Some(first)) {
                self.active = piece.color;
            }
        }
        for piece in &mut self.pieces {
            while piece.pop_move().is_some() {}
        }
        self.captures.clear();
        self.journal.clear();
        debug!("game restarted");
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=self.board.rows).rev() {
            write!(f, "{row:>2} ")?;
            for col in 1..=self.board.cols {
                let ch = match self.piece_at(Cell::new(row, col)).map(|id| &self.pieces[id.0]) {
                    Some(p) => match (p.color, p.kind()) {
                        (Color::White, PieceKind::Checker) => 'w',
                        (Color::White, PieceKind::Queen) => 'W',
                        (Color::Black, PieceKind::Checker) => 'b',
                        (Color::Black, PieceKind::Queen) => 'B',
                    },
                    None => '.',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for col in 1..=self.board.cols {
            write!(f, " {}", Cell::new(1, col).col_name())?;
        }
        writeln!(f)
    }
}
