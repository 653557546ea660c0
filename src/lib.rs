//! Draughts-Rust: a rules engine for draughts with flying queens.
//!
//! This crate tracks board state, generates legal moves under the
//! forced-capture rule, and applies or takes back moves, including capture
//! chains and promotion to queen. Rendering and input handling are left to the
//! caller.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and formation parameters
//! - [`board`] - Cells, diagonal directions and bounds-checked lookup
//! - [`piece`] - Colors, piece kinds and per-piece move history
//! - [`journal`] - Moves and the game-wide move log
//! - [`player`] - The two sides
//! - [`game`] - Game state, turn passing and undo
//! - [`calculator`] - Legal move generation
//! - [`playout`] - Random self-play
//! - [`console`] - Text command loop
//!
//! ## Example
//!
//! ```
//! use draughts_rust::calculator;
//! use draughts_rust::game::Game;
//!
//! let mut game = Game::new();
//!
//! // Pick the first legal move for White and play it
//! let mv = calculator::legal_moves(&game)[0];
//! game.play_move(mv).unwrap();
//! println!("{mv}\n{game}");
//!
//! // Take it back
//! game.undo();
//! assert!(game.journal().is_empty());
//! ```

pub mod board;
pub mod calculator;
pub mod console;
pub mod constants;
pub mod game;
pub mod journal;
pub mod piece;
pub mod player;
pub mod playout;
