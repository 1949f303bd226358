/*
 * Caissa, a chess problem solver
 * Copyright (C) 2026 The Caissa Authors
 *
 * Caissa is free software: you can redistribute it and/or modify it under the
 * terms of the GNU General Public License as published by the Free Software
 * Foundation, either version 3 of the License, or (at your option) any later
 * version.
 *
 * Caissa is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
 * FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
 * details.
 *
 * You should have received a copy of the GNU General Public License along with
 * Caissa. If not, see <https://www.gnu.org/licenses/>.
 */

//! Pseudo-legal move generation: turns a piece's [`WalkStyle`] and offsets
//! into moves, through the position's [`Factory`](crate::factory::Factory).
//!
//! Every function here returns `true` unless it walked onto the opponent's
//! royal piece, matching [`crate::factory`]'s convention so the caller can
//! short-circuit the rest of the board scan.

use crate::{
    board::Board,
    factory::{Factory, MoveSink},
    mv::Move,
    piece::{Piece, PieceKind, WalkStyle},
    position::Position,
    square::{Direction, File, Rank, Square},
};

/// A [`MoveSink`] that discards everything it's given, for when only the
/// `bool` legality signal matters (check detection).
pub struct NullSink;

impl MoveSink for NullSink {
    fn record(&mut self, _mv: Move) {}
}

/// Generates every pseudo-legal move for the piece of kind `piece` sitting
/// on `origin`. Returns `false` (having stopped early) iff this piece
/// attacks the opponent's royal piece.
pub fn generate_piece_moves(
    position: &Position,
    origin: Square,
    piece: Piece,
    sink: &mut impl MoveSink,
) -> bool {
    if piece.kind == PieceKind::Pawn {
        return generate_pawn_moves(position, origin, piece.black, sink);
    }

    let factory = position.move_factory();
    let board = position.board();

    let primary_ok = match piece.walk_style() {
        WalkStyle::Leaper => walk_leaper(factory, board, origin, piece.black, piece.offsets(), sink),
        WalkStyle::Rider => walk_rider(factory, board, origin, piece.black, piece.offsets(), sink),
        WalkStyle::Hopper => walk_hopper(factory, board, origin, piece.black, piece.offsets(), sink),
    };
    if !primary_ok {
        return false;
    }

    let secondary_ok = match (piece.secondary_offsets(), piece.secondary_walk_style()) {
        (Some(directions), Some(WalkStyle::Leaper)) => {
            walk_leaper(factory, board, origin, piece.black, directions, sink)
        }
        (Some(directions), Some(WalkStyle::Rider)) => {
            walk_rider(factory, board, origin, piece.black, directions, sink)
        }
        (Some(directions), Some(WalkStyle::Hopper)) => {
            walk_hopper(factory, board, origin, piece.black, directions, sink)
        }
        (None, _) | (_, None) => {
            return piece.kind != PieceKind::King || generate_castling(position, origin, sink);
        }
    };
    if !secondary_ok {
        return false;
    }

    if piece.kind == PieceKind::King {
        return generate_castling(position, origin, sink);
    }
    true
}

/// Steps exactly one offset per direction.
fn walk_leaper(
    factory: Factory,
    board: &Board,
    origin: Square,
    black: bool,
    directions: &[Direction],
    sink: &mut impl MoveSink,
) -> bool {
    for &d in directions {
        let target = origin.step(d);
        if !target.is_valid() {
            continue;
        }
        match board.at(target) {
            None => factory.generate_quiet_move(board, origin, target, sink),
            Some(occ) if occ.black != black => {
                if !factory.generate_capture(board, origin, target, sink) {
                    return false;
                }
            }
            Some(_) => {}
        }
    }
    true
}

/// Repeats an offset until blocked.
fn walk_rider(
    factory: Factory,
    board: &Board,
    origin: Square,
    black: bool,
    directions: &[Direction],
    sink: &mut impl MoveSink,
) -> bool {
    for &d in directions {
        let mut target = origin;
        loop {
            target = target.step(d);
            if !target.is_valid() {
                break;
            }
            match board.at(target) {
                None => {
                    factory.generate_quiet_move(board, origin, target, sink);
                }
                Some(occ) if occ.black != black => {
                    if !factory.generate_capture(board, origin, target, sink) {
                        return false;
                    }
                    break;
                }
                Some(_) => break,
            }
        }
    }
    true
}

/// Walks past empty squares to a hurdle, landing just beyond it.
fn walk_hopper(
    factory: Factory,
    board: &Board,
    origin: Square,
    black: bool,
    directions: &[Direction],
    sink: &mut impl MoveSink,
) -> bool {
    for &d in directions {
        let mut cursor = origin;
        let mut hurdle = None;
        loop {
            cursor = cursor.step(d);
            if !cursor.is_valid() {
                break;
            }
            if board.at(cursor).is_some() {
                hurdle = Some(cursor);
                break;
            }
        }
        let Some(hurdle) = hurdle else { continue };
        let landing = hurdle.step(d);
        if !landing.is_valid() {
            continue;
        }
        match board.at(landing) {
            None => {
                factory.generate_quiet_move(board, origin, landing, sink);
            }
            Some(occ) if occ.black != black => {
                if !factory.generate_capture(board, origin, landing, sink) {
                    return false;
                }
            }
            Some(_) => {}
        }
    }
    true
}

/// Pawn movement: forward step(s), diagonal captures, en passant and
/// promotion.
fn generate_pawn_moves(
    position: &Position,
    origin: Square,
    black: bool,
    sink: &mut impl MoveSink,
) -> bool {
    let board = position.board();
    let factory = position.move_factory();
    let forward = if black { Direction::S } else { Direction::N };
    let home_rank = if black { Rank::R7 } else { Rank::R2 };
    let about_to_promote = if black { Rank::R2 } else { Rank::R7 };

    let single = origin.step(forward);
    if single.is_valid() && board.at(single).is_none() {
        if origin.rank() == about_to_promote {
            factory.generate_promotion(board, position.promotion_box(), origin, single, black, sink);
        } else {
            factory.generate_quiet_move(board, origin, single, sink);
            if origin.rank() == home_rank {
                let double = single.step(forward);
                if double.is_valid() && board.at(double).is_none() {
                    factory.generate_double_step(board, origin, double, single, sink);
                }
            }
        }
    }

    for file_shift in [Direction(16), Direction(-16)] {
        let capture_dir = Direction(forward.0 + file_shift.0);
        let target = origin.step(capture_dir);
        if !target.is_valid() {
            continue;
        }
        match board.at(target) {
            Some(occ) if occ.black != black => {
                let ok = if origin.rank() == about_to_promote {
                    factory.generate_promotion_capture(
                        board,
                        position.promotion_box(),
                        origin,
                        target,
                        black,
                        sink,
                    )
                } else {
                    factory.generate_capture(board, origin, target, sink)
                };
                if !ok {
                    return false;
                }
            }
            Some(_) => {}
            None => {
                if position.state().en_passant == Some(target) {
                    let stop = Square::from_file_rank(target.file(), origin.rank());
                    if let Some(adjacent) = board.at(stop) {
                        if adjacent.black != black && adjacent.kind == PieceKind::Pawn {
                            if !factory.generate_en_passant(board, origin, target, stop, sink) {
                                return false;
                            }
                        }
                    }
                }
            }
        }
    }
    true
}

/// King castling: consults `castling_rights` directly rather than hardcoded
/// a/e/h files, so a problem may declare rights on non-standard squares.
fn generate_castling(position: &Position, origin: Square, sink: &mut impl MoveSink) -> bool {
    if origin.file() != File::E {
        return true;
    }
    let state = position.state();
    if !state.castling_rights.contains(&origin) {
        return true;
    }
    let board = position.board();
    let factory = position.move_factory();
    for &(step, long) in &[(Direction::W, true), (Direction::E, false)] {
        let mut cursor = origin;
        loop {
            cursor = cursor.step(step);
            if !cursor.is_valid() {
                break;
            }
            match board.at(cursor) {
                None => continue,
                Some(_) => {
                    if state.castling_rights.contains(&cursor) {
                        let king_target = origin.step(step).step(step);
                        let rook_target = king_target - step;
                        if long {
                            factory.generate_long_castling(origin, king_target, cursor, rook_target, sink);
                        } else {
                            factory.generate_short_castling(origin, king_target, cursor, rook_target, sink);
                        }
                    }
                    break;
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos_with(pieces: &[(Square, Piece)], black_to_move: bool) -> Position {
        let mut position = Position::empty(Factory::Default);
        for &(sq, p) in pieces {
            position.board_mut().set(sq, Some(p));
        }
        position.set_black_to_move(black_to_move);
        position
    }

    #[test]
    fn rook_on_an_open_board_generates_fourteen_quiet_moves() {
        let d4 = Square::from_file_rank(File::D, Rank::R4);
        let position = pos_with(&[(d4, Piece::new(PieceKind::Rook, false))], false);
        let mut moves = Vec::new();
        let legal = generate_piece_moves(&position, d4, Piece::new(PieceKind::Rook, false), &mut moves);
        assert!(legal);
        assert_eq!(moves.len(), 14);
    }

    #[test]
    fn pawn_on_home_rank_generates_single_and_double_step() {
        let e2 = Square::from_file_rank(File::E, Rank::R2);
        let position = pos_with(&[(e2, Piece::new(PieceKind::Pawn, false))], false);
        let mut moves = Vec::new();
        let legal = generate_piece_moves(&position, e2, Piece::new(PieceKind::Pawn, false), &mut moves);
        assert!(legal);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().any(|m| matches!(m, Move::DoubleStep { .. })));
    }

    #[test]
    fn king_attacking_the_enemy_king_short_circuits_as_illegal() {
        let e1 = Square::from_file_rank(File::E, Rank::R1);
        let e2 = Square::from_file_rank(File::E, Rank::R2);
        let position = pos_with(
            &[
                (e1, Piece::new(PieceKind::King, false)),
                (e2, Piece::new(PieceKind::King, true)),
            ],
            false,
        );
        let mut moves = Vec::new();
        let legal = generate_piece_moves(&position, e1, Piece::new(PieceKind::King, false), &mut moves);
        assert!(!legal);
    }

    #[test]
    fn grasshopper_hops_exactly_over_one_hurdle() {
        let a1 = Square::from_file_rank(File::A, Rank::R1);
        let a4 = Square::from_file_rank(File::A, Rank::R4);
        let position = pos_with(
            &[
                (a1, Piece::new(PieceKind::Grasshopper, false)),
                (a4, Piece::new(PieceKind::Pawn, true)),
            ],
            false,
        );
        let mut moves = Vec::new();
        generate_piece_moves(&position, a1, Piece::new(PieceKind::Grasshopper, false), &mut moves);
        let a5 = Square::from_file_rank(File::A, Rank::R5);
        assert!(moves.iter().any(|m| matches!(m, Move::Capture { target, .. } if *target == a5)));
    }

    #[test]
    fn king_with_rights_generates_castling_when_rook_square_also_has_rights() {
        let e1 = Square::from_file_rank(File::E, Rank::R1);
        let h1 = Square::from_file_rank(File::H, Rank::R1);
        let mut position = pos_with(
            &[
                (e1, Piece::new(PieceKind::King, false)),
                (h1, Piece::new(PieceKind::Rook, false)),
            ],
            false,
        );
        position.state_mut().castling_rights.insert(e1);
        position.state_mut().castling_rights.insert(h1);
        let mut moves = Vec::new();
        generate_piece_moves(&position, e1, Piece::new(PieceKind::King, false), &mut moves);
        assert!(moves.iter().any(|m| matches!(m, Move::ShortCastling { .. })));
    }
}
