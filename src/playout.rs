//! Random playouts.
//!
//! A playout picks uniformly among the legal moves of the side to move until
//! one side runs out of moves or a ply limit is reached. Used by the demo
//! command and by the randomised invariant tests.

use fastrand::Rng;
use tracing::{info, warn};

use crate::calculator::{legal_moves, outcome};
use crate::game::Game;
use crate::journal::Move;
use crate::piece::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayoutResult {
    /// Winning color, or `None` if the ply limit was hit first.
    pub winner: Option<Color>,
    /// Moves applied during the playout (each capture step counts).
    pub plies: usize,
    /// Captures made during the playout.
    pub captures: usize,
}

/// Pick a random legal move for the side to move.
pub fn choose_random_move(game: &Game, rng: &mut Rng) -> Option<Move> {
    let candidates = legal_moves(game);
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.usize(..candidates.len())])
}

/// Play random moves on `game` until it ends or `max_plies` moves are applied.
pub fn random_game(game: &mut Game, rng: &mut Rng, max_plies: usize) -> PlayoutResult {
    let start_captures = game.captures().len();
    let mut plies = 0;

    while plies < max_plies {
        let Some(mv) = choose_random_move(game, rng) else {
            break;
        };
        if let Err(err) = game.play_move(mv) {
            warn!(%mv, %err, "generated move could not be applied");
            break;
        }
        plies += 1;
    }

    let result = PlayoutResult {
        winner: outcome(game),
        plies,
        captures: game.captures().len() - start_captures,
    };
    info!(winner = ?result.winner, plies, captures = result.captures, "playout finished");
    result
}
