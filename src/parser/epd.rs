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

//! Format B ("position"): a single EPD-like line of six fields — piece
//! placement, side to move, castling rights, en-passant square, an opcode
//! (`acd` or `dm`) and its operand — with no locale, no fairy conditions and
//! no problem-specific options.

use crate::{
    error::{ParseError, ParseErrorKind, SolveError, ValidationError},
    factory::Factory,
    lang::Locale,
    piece::{Piece, PieceKind},
    position::Position,
    problem::{AnalysisOptions, DisplayOptions, Stipulation},
    promotion::{self, PromotionBox},
    square::{File, Rank, Square},
    state::State,
};

use super::Task;

/// Parses one line of format B into a solvable [`Task`].
pub fn parse_line(line: &str) -> Result<Task, SolveError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let mut fields = tokens.iter();

    let placement = next(&mut fields, 0)?;
    let board = parse_placement(placement, 0)?;

    let side_token = next(&mut fields, 1)?;
    let black_to_move = parse_side_to_move(side_token, 1)?;

    let castling_token = next(&mut fields, 2)?;
    let castling_rights = parse_castling(castling_token, 2)?;

    let en_passant_token = next(&mut fields, 3)?;
    let en_passant = parse_en_passant(en_passant_token, 3)?;

    let opcode = next(&mut fields, 4)?;
    let operand_token = next(&mut fields, 5)?;
    let operand = parse_operand(operand_token, opcode, 5)?;

    let state = State {
        castling_rights,
        en_passant,
    };
    validate(&board, &state)?;

    let stipulation = match *opcode {
        "acd" => Stipulation::Perft { n_moves: operand / 2, half_move: operand % 2 == 1 },
        "dm" => Stipulation::MateSearch { n_moves: operand },
        other => {
            return Err(ParseError {
                kind: ParseErrorKind::UnknownKeyword(other.to_string()),
                position: 4,
            }
            .into())
        }
    };

    let promotion_box = stock_promotion_box(&board, black_to_move, operand, *opcode == "acd");

    Ok(Task {
        position: Position::new(board, black_to_move, state, promotion_box, Factory::Default),
        stipulation,
        analysis: AnalysisOptions::default(),
        display: DisplayOptions { locale: Locale::English },
    })
}

fn next<'a>(fields: &mut impl Iterator<Item = &'a &'a str>, position: usize) -> Result<&'a str, SolveError> {
    fields
        .next()
        .copied()
        .ok_or(ParseError { kind: ParseErrorKind::ExpectedToken, position }.into())
}

fn parse_placement(token: &str, position: usize) -> Result<crate::board::Board, SolveError> {
    let ranks: Vec<&str> = token.split('/').collect();
    if ranks.len() != Rank::TOTAL {
        return Err(ParseError { kind: ParseErrorKind::BadFen("piece placement"), position }.into());
    }
    let mut board = crate::board::Board::empty();
    for (rank_from_top, rank_str) in ranks.iter().enumerate() {
        let rank = Rank::TOTAL - 1 - rank_from_top;
        let mut file = 0usize;
        for symbol in rank_str.chars() {
            if let Some(digit) = symbol.to_digit(10) {
                file += digit as usize;
                continue;
            }
            if file >= File::TOTAL {
                return Err(ParseError { kind: ParseErrorKind::BadFen("piece placement"), position }.into());
            }
            let black = symbol.is_ascii_lowercase();
            let kind = match symbol.to_ascii_uppercase() {
                'K' => PieceKind::King,
                'Q' => PieceKind::Queen,
                'R' => PieceKind::Rook,
                'B' => PieceKind::Bishop,
                'N' => PieceKind::Knight,
                'P' => PieceKind::Pawn,
                _ => return Err(ParseError { kind: ParseErrorKind::BadFen("piece placement"), position }.into()),
            };
            let square = Square::from_file_rank(File(file as u8), Rank(rank as u8));
            board.set(square, Some(Piece::new(kind, black)));
            file += 1;
        }
        if file != File::TOTAL {
            return Err(ParseError { kind: ParseErrorKind::BadFen("piece placement"), position }.into());
        }
    }
    Ok(board)
}

fn parse_side_to_move(token: &str, position: usize) -> Result<bool, SolveError> {
    match token {
        "w" => Ok(false),
        "b" => Ok(true),
        _ => Err(ParseError { kind: ParseErrorKind::ErroneousToken("side to move"), position }.into()),
    }
}

fn parse_castling(token: &str, position: usize) -> Result<std::collections::BTreeSet<Square>, SolveError> {
    let mut rights = std::collections::BTreeSet::new();
    if token == "-" {
        return Ok(rights);
    }
    for symbol in token.chars() {
        let (king, rook) = match symbol {
            'K' => (Square::from_file_rank(File::E, Rank::R1), Square::from_file_rank(File::H, Rank::R1)),
            'Q' => (Square::from_file_rank(File::E, Rank::R1), Square::from_file_rank(File::A, Rank::R1)),
            'k' => (Square::from_file_rank(File::E, Rank::R8), Square::from_file_rank(File::H, Rank::R8)),
            'q' => (Square::from_file_rank(File::E, Rank::R8), Square::from_file_rank(File::A, Rank::R8)),
            _ => return Err(ParseError { kind: ParseErrorKind::BadFen("castling rights"), position }.into()),
        };
        rights.insert(king);
        rights.insert(rook);
    }
    Ok(rights)
}

fn parse_en_passant(token: &str, position: usize) -> Result<Option<Square>, SolveError> {
    if token == "-" {
        return Ok(None);
    }
    token
        .parse::<Square>()
        .map(Some)
        .map_err(|_| ParseError { kind: ParseErrorKind::ErroneousToken("en-passant square"), position }.into())
}

fn parse_operand(token: &str, opcode: &str, position: usize) -> Result<i32, SolveError> {
    let digits = token.strip_suffix(';').ok_or(ParseError { kind: ParseErrorKind::BadFen("operand"), position })?;
    let operand: i32 = digits.parse().map_err(|_| ParseError { kind: ParseErrorKind::BadFen("operand"), position })?;
    if operand < 0 || (opcode == "dm" && operand == 0) {
        return Err(ParseError { kind: ParseErrorKind::BadFen("operand"), position }.into());
    }
    Ok(operand)
}

fn validate(board: &crate::board::Board, state: &State) -> Result<(), ValidationError> {
    for black in [false, true] {
        let kings = board.occupied().filter(|&(_, p)| p.kind == PieceKind::King && p.black == black).count();
        if kings == 0 {
            return Err(ValidationError::MissingKing { black });
        }
        if kings > 1 {
            return Err(ValidationError::DuplicateKing { black });
        }
    }
    for &square in &state.castling_rights {
        let holds_king_or_rook = board
            .at(square)
            .is_some_and(|p| matches!(p.kind, PieceKind::King | PieceKind::Rook));
        if !holds_king_or_rook {
            return Err(ValidationError::CastlingRightsWithoutPiece(square));
        }
    }
    if let Some(square) = state.en_passant {
        let (passed_pawn_rank, black) = if square.rank() == Rank::R3 {
            (Rank::R4, false)
        } else if square.rank() == Rank::R6 {
            (Rank::R5, true)
        } else {
            return Err(ValidationError::InconsistentEnPassant(square));
        };
        let has_passed_pawn = board
            .at(Square::from_file_rank(square.file(), passed_pawn_rank))
            .is_some_and(|p| p.kind == PieceKind::Pawn && p.black == black);
        if !has_passed_pawn {
            return Err(ValidationError::InconsistentEnPassant(square));
        }
    }
    Ok(())
}

/// Stocks a reasonable supply of promotion choices for each colour, sized
/// the way the search can actually exhaust it: bounded by how many of that
/// colour's moves the task's operand allows, and by how many pawns it has.
fn stock_promotion_box(board: &crate::board::Board, black_to_move: bool, operand: i32, is_perft: bool) -> PromotionBox {
    let mut box_ = PromotionBox::new();
    for black in [false, true] {
        let side_to_move_is_this_colour = black_to_move == black;
        let max_move = if is_perft {
            if side_to_move_is_this_colour { (operand + 1) / 2 + 1 } else { operand / 2 + 1 }
        } else if side_to_move_is_this_colour {
            operand + 1
        } else {
            operand
        };
        let n_pawns = board.occupied().filter(|&(_, p)| p.kind == PieceKind::Pawn && p.black == black).count() as i32;
        let max_promotion = max_move.min(n_pawns).max(0) as usize;
        for _ in 0..max_promotion {
            box_.stock(promotion::QUEEN, Piece::new(PieceKind::Queen, black), 1);
            box_.stock(promotion::ROOK, Piece::new(PieceKind::Rook, black), 1);
            box_.stock(promotion::BISHOP, Piece::new(PieceKind::Bishop, black), 1);
            box_.stock(promotion::KNIGHT, Piece::new(PieceKind::Knight, black), 1);
        }
    }
    box_
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_king_and_pawn_ending_parses_into_a_one_ply_perft_task() {
        let task = parse_line("8/8/8/8/8/3k4/3p4/3K4 w - - acd 1;").unwrap();
        assert!(matches!(task.stipulation, Stipulation::Perft { n_moves: 0, half_move: true }));
        assert!(!task.position.black_to_move());
        assert_eq!(task.position.find_king(false), Some(Square::from_file_rank(File::D, Rank::R1)));
    }

    #[test]
    fn rook_and_king_endgame_parses_into_a_mate_search_task() {
        let task = parse_line("4k3/8/6K1/8/8/8/8/7R w - - dm 1;").unwrap();
        assert!(matches!(task.stipulation, Stipulation::MateSearch { n_moves: 1 }));
    }

    #[test]
    fn missing_king_is_rejected() {
        let err = parse_line("8/8/8/8/8/8/8/7k w - - acd 1;").unwrap_err();
        assert!(matches!(err, SolveError::Validation(ValidationError::MissingKing { black: false })));
    }
}
