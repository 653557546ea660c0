//! Constants for board geometry and the starting formation.
//!
//! # Board Size Configuration
//!
//! The default board size is controlled by Cargo features:
//! - `board8x8` (default): 8x8 board
//! - `board10x10`: 10x10 board
//!
//! ```sh
//! cargo build                                               # 8x8 (default)
//! cargo build --no-default-features --features board10x10   # 10x10
//! ```
//!
//! Any other rectangular size can still be requested at runtime through
//! [`Game::with_size`](crate::game::Game::with_size).

use crate::board::Direction;

// =============================================================================
// Board Geometry
// =============================================================================

/// Default number of rows.
#[cfg(feature = "board8x8")]
pub const DEFAULT_ROWS: usize = 8;

#[cfg(feature = "board10x10")]
pub const DEFAULT_ROWS: usize = 10;

/// Default number of columns.
pub const DEFAULT_COLS: usize = DEFAULT_ROWS;

#[cfg(all(feature = "board8x8", feature = "board10x10"))]
compile_error!("Cannot enable both 'board8x8' and 'board10x10' features at the same time");

#[cfg(not(any(feature = "board8x8", feature = "board10x10")))]
compile_error!("Must enable exactly one board size feature: 'board8x8' or 'board10x10'");

/// Smallest board edge accepted by the command line.
pub const MIN_EDGE: usize = 4;

/// Largest board edge accepted by the command line (columns are lettered a..z).
pub const MAX_EDGE: usize = 26;

// =============================================================================
// Starting Formation
// =============================================================================

/// Rows filled with checkers for each side on a full-size board.
pub const HOME_ROWS: usize = 3;

/// Number of home rows per side for a board with `rows` rows.
///
/// Shrinks on short boards so that at least two empty rows separate the sides.
pub fn home_rows(rows: usize) -> usize {
    HOME_ROWS.min((rows / 2).saturating_sub(1))
}

// =============================================================================
// Diagonals
// =============================================================================

/// Diagonal steps, forward-first from White's point of view.
/// Order: up-right, up-left, down-right, down-left.
pub const WHITE_DIRECTIONS: [Direction; 4] = [
    Direction::new(1, 1),
    Direction::new(1, -1),
    Direction::new(-1, 1),
    Direction::new(-1, -1),
];

/// Diagonal steps, forward-first from Black's point of view.
/// Order: down-right, down-left, up-right, up-left.
pub const BLACK_DIRECTIONS: [Direction; 4] = [
    Direction::new(-1, 1),
    Direction::new(-1, -1),
    Direction::new(1, 1),
    Direction::new(1, -1),
];

/// Safety cap on plies for random playouts.
pub const MAX_PLAYOUT_PLIES: usize = 400;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_rows_full_board() {
        assert_eq!(home_rows(8), 3);
        assert_eq!(home_rows(10), 3);
    }

    #[test]
    fn test_home_rows_short_board() {
        assert_eq!(home_rows(6), 2);
        assert_eq!(home_rows(4), 1);
        assert_eq!(home_rows(1), 0);
    }
}
