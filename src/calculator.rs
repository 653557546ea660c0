//! Legal move generation.
//!
//! Rules implemented:
//! - A checker steps one cell along its two forward diagonals and captures by
//!   jumping an adjacent enemy in any of the four diagonals.
//! - A queen slides any distance along all four diagonals and captures an
//!   enemy anywhere on an open ray, landing on any empty cell beyond it.
//! - Capturing is compulsory, both per piece and across all pieces of a side.
//! - A checker reaching the far row is promoted to queen.
//!
//! Multi-jumps are not compound moves. Each capture is one move, and
//! [`Game::play_move`] keeps the turn with the mover while it can capture again.

use std::collections::BTreeMap;

use tracing::trace;

use crate::board::{Board, Cell, Direction};
use crate::constants::{BLACK_DIRECTIONS, WHITE_DIRECTIONS};
use crate::game::Game;
use crate::journal::Move;
use crate::piece::{Color, Piece, PieceId, PieceKind};

/// Legal moves per piece, ordered by piece id.
pub type MoveMap = BTreeMap<PieceId, Vec<Move>>;

/// Legal moves for every live piece of `color` (the active side if `None`).
///
/// If any piece can capture, only capturing pieces and their captures are
/// returned. While a capture chain is in progress only the chaining piece
/// may move.
pub fn moves(game: &Game, color: Option<Color>) -> MoveMap {
    let color = color.unwrap_or(game.active_color());

    if color == game.active_color() {
        if let Some(id) = game.chain_piece() {
            let mut map = MoveMap::new();
            let attacks = captures_for(game, id);
            if !attacks.is_empty() {
                map.insert(id, attacks);
            }
            return map;
        }
    }

    let mut all = MoveMap::new();
    let mut attacks = MoveMap::new();

    for (id, _) in game.live_pieces().filter(|(_, p)| p.color == color) {
        let list = moves_for(game, id);
        if list.is_empty() {
            continue;
        }
        let caps: Vec<Move> = list.iter().copied().filter(Move::is_capture).collect();
        if !caps.is_empty() {
            attacks.insert(id, caps);
        }
        all.insert(id, list);
    }

    trace!(%color, pieces = all.len(), capturing = attacks.len(), "moves generated");

    if attacks.is_empty() { all } else { attacks }
}

/// Flattened [`moves`], in piece order.
pub fn legal_moves(game: &Game) -> Vec<Move> {
    moves(game, None).into_values().flatten().collect()
}

/// Legal moves of a single piece, ignoring the other pieces' captures.
///
/// If the piece can capture, only its captures are returned. Destinations on
/// the far row carry a promotion when the piece is a checker. A captured piece
/// has no moves.
pub fn moves_for(game: &Game, id: PieceId) -> Vec<Move> {
    let Some(piece) = game.piece(id).filter(|_| !game.is_captured(id)) else {
        return Vec::new();
    };
    let origin = piece.current();
    let mut moves = Vec::new();

    for (i, dir) in directions(piece.color).into_iter().enumerate() {
        let forward = i < 2;
        let Some(next) = game.board().step(origin, dir) else {
            continue;
        };

        match game.piece_at(next) {
            None if piece.is_queen() => moves.extend(slide_from(game, piece, origin, dir)),
            None if forward => moves.push(Move::new(origin, next)),
            None => {}
            Some(other) if is_ally(game, piece, other) => {}
            Some(other) => moves.extend(attack_at(game, piece, origin, other)),
        }
    }

    if moves.iter().any(Move::is_capture) {
        moves.retain(Move::is_capture);
    }

    if piece.kind() == PieceKind::Checker {
        let row = promotion_row(game.board(), piece.color);
        for mv in moves.iter_mut().filter(|m| m.to.row == row) {
            *mv = mv.with_promotion(PieceKind::Queen);
        }
    }

    moves
}

/// Whether the piece has at least one capture available.
pub fn has_capture(game: &Game, id: PieceId) -> bool {
    moves_for(game, id).iter().any(Move::is_capture)
}

fn captures_for(game: &Game, id: PieceId) -> Vec<Move> {
    let mut list = moves_for(game, id);
    list.retain(Move::is_capture);
    list
}

/// Captures of `target` by `piece`, jumping from the cell `from` next to it.
///
/// The landing cell is the next cell past the target on the same diagonal;
/// no capture exists if it is off the board or occupied. A queen may also stop
/// on any further empty cell along that diagonal, up to the first occupied
/// one. Every returned move starts at the piece's current cell.
pub fn attack_at(game: &Game, piece: &Piece, from: Cell, target: PieceId) -> Vec<Move> {
    let Some(target_cell) = game.piece(target).map(Piece::current) else {
        return Vec::new();
    };
    let Some(dir) = Direction::between(from, target_cell) else {
        return Vec::new();
    };
    let Some(landing) = game.board().step(target_cell, dir) else {
        return Vec::new();
    };
    if game.piece_at(landing).is_some() {
        return Vec::new();
    }

    let origin = piece.current();
    let mut attacks = vec![Move::capturing(origin, landing, target)];

    if piece.is_queen() {
        let mut cell = landing;
        while let Some(next) = game.board().step(cell, dir) {
            if game.piece_at(next).is_some() {
                break;
            }
            attacks.push(Move::capturing(origin, next, target));
            cell = next;
        }
    }

    attacks
}

/// Queen moves along `dir` starting past `from`.
///
/// One simple move per empty cell until the ray is blocked. If the blocker is
/// an enemy, its captures are appended.
pub fn slide_from(game: &Game, piece: &Piece, from: Cell, dir: Direction) -> Vec<Move> {
    let origin = piece.current();
    let mut moves = Vec::new();
    let mut cell = from;

    while let Some(next) = game.board().step(cell, dir) {
        match game.piece_at(next) {
            None => {
                moves.push(Move::new(origin, next));
                cell = next;
            }
            Some(other) => {
                if !is_ally(game, piece, other) {
                    moves.extend(attack_at(game, piece, cell, other));
                }
                break;
            }
        }
    }

    moves
}

/// The winner, once the side to move has no legal move left.
pub fn outcome(game: &Game) -> Option<Color> {
    if moves(game, None).is_empty() {
        Some(game.active_color().other())
    } else {
        None
    }
}

/// The row on which `color`'s checkers are promoted.
pub fn promotion_row(board: &Board, color: Color) -> usize {
    match color {
        Color::White => board.rows,
        Color::Black => 1,
    }
}

fn directions(color: Color) -> [Direction; 4] {
    match color {
        Color::White => WHITE_DIRECTIONS,
        Color::Black => BLACK_DIRECTIONS,
    }
}

fn is_ally(game: &Game, piece: &Piece, other: PieceId) -> bool {
    game.piece(other).is_some_and(|p| p.color == piece.color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(map: &MoveMap) -> usize {
        map.values().map(Vec::len).sum()
    }

    #[test]
    fn test_opening_moves() {
        let game = Game::with_size(8, 8);
        let map = moves(&game, None);

        assert_eq!(map.len(), 4);
        assert_eq!(total(&map), 7);
        for (id, list) in &map {
            let from = game.piece(*id).unwrap().current();
            assert_eq!(from.row, 3);
            for mv in list {
                assert!(!mv.is_capture());
                assert_eq!(mv.to.row, 4);
                assert_eq!(mv.to.col.abs_diff(from.col), 1);
            }
        }
    }

    #[test]
    fn test_black_opening_moves() {
        let game = Game::with_size(8, 8);
        let map = moves(&game, Some(Color::Black));
        assert_eq!(map.len(), 4);
        assert_eq!(total(&map), 7);
        assert!(map.values().flatten().all(|m| m.to.row == 5));
    }

    #[test]
    fn test_lone_queen_slides() {
        let mut game = Game::empty(8, 8);
        let queen = game.add_piece(PieceKind::Queen, Color::White, Cell::new(4, 4));
        let list = moves_for(&game, queen);

        assert_eq!(list.len(), 13);
        assert!(list.iter().all(|m| m.from == Cell::new(4, 4)));
        assert!(list.iter().all(|m| m.promotion.is_none()));
        assert!(list.iter().any(|m| m.to == Cell::new(8, 8)));
        assert!(list.iter().any(|m| m.to == Cell::new(1, 1)));
        assert!(list.iter().any(|m| m.to == Cell::new(7, 1)));
        assert!(list.iter().any(|m| m.to == Cell::new(1, 7)));
    }

    #[test]
    fn test_queen_slide_stops_at_ally() {
        let mut game = Game::empty(8, 8);
        let queen = game.add_piece(PieceKind::Queen, Color::White, Cell::new(1, 1));
        game.add_piece(PieceKind::Checker, Color::White, Cell::new(4, 4));
        let list = moves_for(&game, queen);

        let dests: Vec<Cell> = list.iter().map(|m| m.to).collect();
        assert_eq!(dests, vec![Cell::new(2, 2), Cell::new(3, 3)]);
    }

    #[test]
    fn test_checker_does_not_step_backwards() {
        let mut game = Game::empty(8, 8);
        let white = game.add_piece(PieceKind::Checker, Color::White, Cell::new(4, 4));
        let list = moves_for(&game, white);

        let dests: Vec<Cell> = list.iter().map(|m| m.to).collect();
        assert_eq!(dests, vec![Cell::new(5, 5), Cell::new(5, 3)]);
    }

    #[test]
    fn test_checker_captures_backwards() {
        let mut game = Game::empty(8, 8);
        let white = game.add_piece(PieceKind::Checker, Color::White, Cell::new(4, 4));
        let black = game.add_piece(PieceKind::Checker, Color::Black, Cell::new(3, 3));
        let list = moves_for(&game, white);

        assert_eq!(list, vec![Move::capturing(Cell::new(4, 4), Cell::new(2, 2), black)]);
    }

    #[test]
    fn test_capture_blocked_by_occupied_landing() {
        let mut game = Game::empty(8, 8);
        let white = game.add_piece(PieceKind::Checker, Color::White, Cell::new(4, 4));
        game.add_piece(PieceKind::Checker, Color::Black, Cell::new(5, 5));
        game.add_piece(PieceKind::Checker, Color::Black, Cell::new(6, 6));
        let list = moves_for(&game, white);

        assert_eq!(list, vec![Move::new(Cell::new(4, 4), Cell::new(5, 3))]);
    }

    #[test]
    fn test_capture_blocked_by_edge() {
        let mut game = Game::empty(8, 8);
        let white = game.add_piece(PieceKind::Checker, Color::White, Cell::new(7, 7));
        game.add_piece(PieceKind::Checker, Color::Black, Cell::new(8, 8));
        let list = moves_for(&game, white);

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].to, Cell::new(8, 6));
        assert_eq!(list[0].promotion, Some(PieceKind::Queen));
    }

    #[test]
    fn test_captured_piece_has_no_moves() {
        let mut game = Game::empty(8, 8);
        let white = game.add_piece(PieceKind::Checker, Color::White, Cell::new(4, 4));
        let black = game.add_piece(PieceKind::Checker, Color::Black, Cell::new(5, 5));
        game.add_piece(PieceKind::Checker, Color::Black, Cell::new(8, 2));
        assert!(!moves_for(&game, black).is_empty());

        let capture = Move::capturing(Cell::new(4, 4), Cell::new(6, 6), black);
        assert_eq!(moves_for(&game, white), vec![capture]);
        game.play_move(capture).unwrap();

        assert!(game.is_captured(black));
        assert!(moves_for(&game, black).is_empty());
    }

    #[test]
    fn test_capture_is_compulsory_per_piece() {
        let mut game = Game::empty(8, 8);
        let white = game.add_piece(PieceKind::Checker, Color::White, Cell::new(3, 3));
        game.add_piece(PieceKind::Checker, Color::Black, Cell::new(4, 4));
        let list = moves_for(&game, white);

        assert_eq!(list.len(), 1);
        assert!(list[0].is_capture());
    }

    #[test]
    fn test_capture_is_compulsory_across_pieces() {
        let mut game = Game::empty(8, 8);
        game.add_piece(PieceKind::Checker, Color::White, Cell::new(1, 1));
        let attacker = game.add_piece(PieceKind::Checker, Color::White, Cell::new(3, 5));
        game.add_piece(PieceKind::Checker, Color::Black, Cell::new(4, 6));
        let map = moves(&game, None);

        assert_eq!(map.len(), 1);
        assert_eq!(map[&attacker].len(), 1);
        assert!(map[&attacker][0].is_capture());
    }

    #[test]
    fn test_queen_capture_from_distance() {
        let mut game = Game::empty(8, 8);
        let queen = game.add_piece(PieceKind::Queen, Color::White, Cell::new(1, 1));
        let black = game.add_piece(PieceKind::Checker, Color::Black, Cell::new(4, 4));
        let list = moves_for(&game, queen);

        let expected: Vec<Move> = (5..=8)
            .map(|i| Move::capturing(Cell::new(1, 1), Cell::new(i, i), black))
            .collect();
        assert_eq!(list, expected);
    }

    #[test]
    fn test_queen_capture_landing_stops_at_next_piece() {
        let mut game = Game::empty(8, 8);
        let queen = game.add_piece(PieceKind::Queen, Color::White, Cell::new(1, 1));
        let first = game.add_piece(PieceKind::Checker, Color::Black, Cell::new(3, 3));
        game.add_piece(PieceKind::Checker, Color::Black, Cell::new(6, 6));
        let list = moves_for(&game, queen);

        let dests: Vec<Cell> = list.iter().map(|m| m.to).collect();
        assert_eq!(dests, vec![Cell::new(4, 4), Cell::new(5, 5)]);
        assert!(list.iter().all(|m| m.capture == Some(first)));
    }

    #[test]
    fn test_black_promotes_on_first_row() {
        let mut game = Game::empty(8, 8);
        let black = game.add_piece(PieceKind::Checker, Color::Black, Cell::new(2, 2));
        let list = moves_for(&game, black);

        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|m| m.promotion == Some(PieceKind::Queen)));
        assert_eq!(promotion_row(game.board(), Color::Black), 1);
    }

    #[test]
    fn test_outcome_when_side_has_no_pieces() {
        let mut game = Game::empty(8, 8);
        game.add_piece(PieceKind::Checker, Color::Black, Cell::new(6, 6));
        assert_eq!(outcome(&game), Some(Color::Black));

        game.add_piece(PieceKind::Checker, Color::White, Cell::new(1, 1));
        assert_eq!(outcome(&game), None);
    }

    #[test]
    fn test_outcome_when_side_is_blocked() {
        let mut game = Game::empty(8, 8);
        game.add_piece(PieceKind::Checker, Color::White, Cell::new(1, 1));
        game.add_piece(PieceKind::Checker, Color::Black, Cell::new(2, 2));
        game.add_piece(PieceKind::Checker, Color::Black, Cell::new(3, 3));
        assert_eq!(outcome(&game), Some(Color::Black));
    }
}
