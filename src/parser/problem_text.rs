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

//! Format A ("problem"): a keyword-driven problem description framed by
//! `BeginProblem ... EndProblem`, written in one of three locales, with
//! `NextProblem` separating several problems within one block.

use std::collections::BTreeSet;

use crate::{
    error::{ParseError, ParseErrorKind, SolveError, UnsupportedOption, ValidationError},
    factory::Factory,
    lang::{parse_piece_code, Locale},
    piece::{Piece, PieceKind},
    position::Position,
    problem::{AnalysisOptions, DisplayOptions, Stipulation},
    promotion::{self, PromotionBox},
    square::{File, Rank, Square},
    state::State,
};

use super::Task;

/// Every keyword this grammar recognises, one row per concept, one column
/// per locale (English, French, German, in that order) — the same table
/// `translateTerm`/`translatePattern` walk in the original parser.
const KEYWORDS: &[[&str; 3]] = &[
    ["White", "Blanc", "Weiss"],
    ["Black", "Noir", "Schwarz"],
    ["BeginProblem", "DebutProbleme", "Anfangproblem"],
    ["EndProblem", "FinProbleme", "Endeproblem"],
    ["NextProblem", "ASuivre", "WeiteresProblem"],
    ["Remark", "Remarque", "Bemerkung"],
    ["Condition", "Condition", "Bedingung"],
    ["Option", "Option", "Option"],
    ["Stipulation", "Enonce", "Forderung"],
    ["Pieces", "Pieces", "Steine"],
    ["Circe", "Circe", "Circe"],
    ["Try", "Essais", "Verfuehrung"],
    ["Defence", "Defense", "Widerlegung"],
    ["SetPlay", "Apparent", "Satzspiel"],
    ["NullMoves", "CoupsVides", "NullZuege"],
    ["WhiteToPlay", "ApparentSeul", "WeissBeginnt"],
    ["Variation", "Variantes", "Varianten"],
    ["MoveNumbers", "Trace", "Zugnummern"],
    ["NoThreat", "SansMenace", "OhneDrohung"],
    ["EnPassant", "EnPassant", "EnPassant"],
    ["NoBoard", "SansEchiquier", "OhneBrett"],
    ["NoShortVariations", "SansVariantesCourtes", "OhneKurzVarianten"],
    ["HalfDuplex", "DemiDuplex", "HalbDuplex"],
    ["NoCastling", "SansRoquer", "KeineRochade"],
];

const fn locale_index(locale: Locale) -> usize {
    match locale {
        Locale::English => 0,
        Locale::French => 1,
        Locale::German => 2,
    }
}

/// Translates `token` from `locale` to its canonical English keyword, if it
/// matches any row of [`KEYWORDS`] case-insensitively.
fn translate(token: &str, locale: Locale) -> Option<&'static str> {
    let column = locale_index(locale);
    KEYWORDS.iter().find(|row| row[column].eq_ignore_ascii_case(token)).map(|row| row[0])
}

/// Tries to recognise `token` as any locale's spelling of `BeginProblem`,
/// returning the locale the rest of the block should be read in.
pub(super) fn locale_of_begin_problem(token: &str) -> Option<Locale> {
    [Locale::English, Locale::French, Locale::German].into_iter().find(|&locale| translate(token, locale) == Some("BeginProblem"))
}

/// Whether any line gathered so far carries an `EndProblem` token, meaning
/// the block is complete and no further lines should be appended.
pub(super) fn block_is_closed(lines: &[&str], locale: Locale) -> bool {
    lines.iter().flat_map(|line| line.split_whitespace()).any(|token| translate(token, locale) == Some("EndProblem"))
}

#[derive(Clone, Copy, Eq, PartialEq)]
enum Mode {
    Command,
    Condition,
    Option_,
    Defence,
    EnPassant,
    NoCastling,
    Stipulation,
    Colour,
    Pieces(bool),
}

#[derive(Clone, Copy, Eq, PartialEq)]
enum StipulationKind {
    Direct,
    Help,
    Slf,
}

#[derive(Default, Clone)]
struct ProblemSpec {
    circe: bool,
    try_: bool,
    defence: i32,
    set_play: bool,
    null_moves: bool,
    white_to_play: bool,
    variation: bool,
    no_threat: bool,
    en_passant: Vec<Square>,
    no_short_variations: bool,
    half_duplex: bool,
    no_castling: Vec<Square>,
    stipulation: Option<(StipulationKind, bool, i32)>,
    pieces: Vec<(Square, PieceKind, bool)>,
}

/// Parses every problem found in one `BeginProblem ... EndProblem` block,
/// one [`Task`] (or error) per problem, separated by `NextProblem`.
pub(super) fn parse_block(lines: &[&str], locale: Locale) -> Vec<Result<Task, SolveError>> {
    let mut tasks = Vec::new();
    let mut mode = Mode::Command;
    let mut spec = ProblemSpec::default();
    let mut position = 0usize;
    let mut skipped_begin = false;

    for line in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i];
            if !skipped_begin {
                skipped_begin = true;
                i += 1;
                continue;
            }
            position += 1;

            if translate(token, locale) == Some("Remark") {
                break;
            }

            match step(mode, token, locale, position, &mut spec) {
                Ok(Transition::Stay) => {}
                Ok(Transition::Switch(next)) => mode = next,
                Ok(Transition::Directive(directive)) => {
                    tasks.push(convert(std::mem::take(&mut spec)));
                    if directive == Directive::End {
                        return tasks;
                    }
                    mode = Mode::Command;
                }
                Err(e) => {
                    tasks.push(Err(e));
                    mode = Mode::Command;
                }
            }
            i += 1;
        }
    }
    tasks
}

#[derive(Eq, PartialEq)]
enum Directive {
    Next,
    End,
}

enum Transition {
    Stay,
    Switch(Mode),
    Directive(Directive),
}

fn step(mode: Mode, token: &str, locale: Locale, position: usize, spec: &mut ProblemSpec) -> Result<Transition, SolveError> {
    match mode {
        Mode::Command => {
            if let Some(directive) = translate(token, locale) {
                match directive {
                    "NextProblem" => return Ok(Transition::Directive(Directive::Next)),
                    "EndProblem" => return Ok(Transition::Directive(Directive::End)),
                    "Condition" => return Ok(Transition::Switch(Mode::Condition)),
                    "Option" => return Ok(Transition::Switch(Mode::Option_)),
                    "Stipulation" => return Ok(Transition::Switch(Mode::Stipulation)),
                    "Pieces" => return Ok(Transition::Switch(Mode::Colour)),
                    _ => {}
                }
            }
            Err(unknown(token, position))
        }
        Mode::Condition => match translate(token, locale) {
            Some("Circe") => {
                spec.circe = true;
                Ok(Transition::Switch(Mode::Command))
            }
            _ => Err(unknown(token, position)),
        },
        Mode::Option_ => match translate(token, locale) {
            Some("Try") => {
                spec.try_ = true;
                Ok(Transition::Switch(Mode::Command))
            }
            Some("Defence") => Ok(Transition::Switch(Mode::Defence)),
            Some("SetPlay") => {
                spec.set_play = true;
                Ok(Transition::Switch(Mode::Command))
            }
            Some("NullMoves") => {
                spec.null_moves = true;
                Ok(Transition::Switch(Mode::Command))
            }
            Some("WhiteToPlay") => {
                spec.white_to_play = true;
                Ok(Transition::Switch(Mode::Command))
            }
            Some("Variation") => {
                spec.variation = true;
                Ok(Transition::Switch(Mode::Command))
            }
            // MoveNumbers/NoBoard are accepted but don't affect solving: this crate always
            // renders a move-numbered solution and never prints a board diagram.
            Some("MoveNumbers" | "NoBoard") => Ok(Transition::Switch(Mode::Command)),
            Some("NoThreat") => {
                spec.no_threat = true;
                Ok(Transition::Switch(Mode::Command))
            }
            Some("EnPassant") => Ok(Transition::Switch(Mode::EnPassant)),
            Some("NoShortVariations") => {
                spec.no_short_variations = true;
                Ok(Transition::Switch(Mode::Command))
            }
            Some("HalfDuplex") => {
                spec.half_duplex = true;
                Ok(Transition::Switch(Mode::Command))
            }
            Some("NoCastling") => Ok(Transition::Switch(Mode::NoCastling)),
            _ => Err(unknown(token, position)),
        },
        Mode::Defence => {
            let defence: i32 = token.parse().map_err(|_| unknown(token, position))?;
            if defence < 1 {
                return Err(unknown(token, position));
            }
            spec.defence = defence;
            Ok(Transition::Switch(Mode::Command))
        }
        Mode::EnPassant => {
            spec.en_passant.extend(parse_squares(token, position)?);
            Ok(Transition::Switch(Mode::Command))
        }
        Mode::NoCastling => {
            spec.no_castling.extend(parse_squares(token, position)?);
            Ok(Transition::Switch(Mode::Command))
        }
        Mode::Stipulation => {
            spec.stipulation = Some(parse_stipulation(token, position)?);
            Ok(Transition::Switch(Mode::Command))
        }
        Mode::Colour => match translate(token, locale) {
            Some("White") => Ok(Transition::Switch(Mode::Pieces(false))),
            Some("Black") => Ok(Transition::Switch(Mode::Pieces(true))),
            _ => Err(unknown(token, position)),
        },
        Mode::Pieces(black) => {
            if let Some(directive) = translate(token, locale) {
                match directive {
                    "White" => return Ok(Transition::Switch(Mode::Pieces(false))),
                    "Black" => return Ok(Transition::Switch(Mode::Pieces(true))),
                    "NextProblem" => return Ok(Transition::Directive(Directive::Next)),
                    "EndProblem" => return Ok(Transition::Directive(Directive::End)),
                    "Condition" => return Ok(Transition::Switch(Mode::Condition)),
                    "Option" => return Ok(Transition::Switch(Mode::Option_)),
                    "Stipulation" => return Ok(Transition::Switch(Mode::Stipulation)),
                    "Pieces" => return Ok(Transition::Switch(Mode::Colour)),
                    _ => {}
                }
            }
            let (kind, squares) = parse_piece_declaration(token, locale, position)?;
            for square in squares {
                spec.pieces.push((square, kind, black));
            }
            Ok(Transition::Stay)
        }
    }
}

fn unknown(token: &str, position: usize) -> SolveError {
    ParseError { kind: ParseErrorKind::UnknownKeyword(token.to_string()), position }.into()
}

/// Parses one or more concatenated algebraic squares, e.g. `"e1h1"`.
fn parse_squares(token: &str, position: usize) -> Result<Vec<Square>, SolveError> {
    let bytes = token.as_bytes();
    if bytes.is_empty() || bytes.len() % 2 != 0 {
        return Err(ParseError::bad_square().at(position).into());
    }
    let mut squares = Vec::new();
    for chunk in bytes.chunks(2) {
        let text = std::str::from_utf8(chunk).map_err(|_| ParseError::bad_square().at(position))?;
        squares.push(text.parse::<Square>().map_err(|e| e.at(position))?);
    }
    Ok(squares)
}

/// Parses a `Pieces White/Black` token: an optional piece-kind letter
/// followed by one or more squares. With no recognised letter prefix the
/// token is read as bare squares and the kind defaults to [`PieceKind::Pawn`]
/// (the original notation's own convention: pawns carry no letter).
fn parse_piece_declaration(token: &str, locale: Locale, position: usize) -> Result<(PieceKind, Vec<Square>), SolveError> {
    for len in [2usize, 1usize] {
        if token.len() > len {
            let (code, rest) = token.split_at(len);
            let upper = code.to_ascii_uppercase();
            if let Some(kind) = parse_piece_code(&upper, locale) {
                return Ok((kind, parse_squares(rest, position)?));
            }
            if len == 1 && upper == "P" {
                return Ok((PieceKind::Pawn, parse_squares(rest, position)?));
            }
        }
    }
    Ok((PieceKind::Pawn, parse_squares(token, position)?))
}

fn parse_stipulation(token: &str, position: usize) -> Result<(StipulationKind, bool, i32), SolveError> {
    let bytes = token.as_bytes();
    let mut i = 0;
    let kind = match bytes.first() {
        Some(b'h' | b'H') => {
            i += 1;
            StipulationKind::Help
        }
        Some(b's' | b'S') => {
            i += 1;
            StipulationKind::Slf
        }
        _ => StipulationKind::Direct,
    };
    let stalemate = match bytes.get(i) {
        Some(b'#') => false,
        Some(b'=') => true,
        _ => return Err(unknown(token, position)),
    };
    i += 1;
    let digits = &token[i..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) || digits.starts_with('0') {
        return Err(unknown(token, position));
    }
    let n_moves: i32 = digits.parse().map_err(|_| unknown(token, position))?;
    Ok((kind, stalemate, n_moves))
}

/// Validates, then converts, a fully read [`ProblemSpec`] into a [`Task`].
fn convert(spec: ProblemSpec) -> Result<Task, SolveError> {
    validate(&spec)?;
    verify(&spec)?;

    let Some((kind, stalemate, spec_n_moves)) = spec.stipulation else {
        return Err(ValidationError::MissingStipulation.into());
    };

    let mut board = crate::board::Board::empty();
    let mut fairy_promotion_kinds = Vec::new();
    for &(square, piece_kind, black) in &spec.pieces {
        board.set(square, Some(Piece::new(piece_kind, black)));
        if matches!(piece_kind, PieceKind::Grasshopper | PieceKind::Nightrider | PieceKind::Amazon)
            && !fairy_promotion_kinds.contains(&piece_kind)
        {
            fairy_promotion_kinds.push(piece_kind);
        }
    }

    let black_to_move = if kind == StipulationKind::Help { spec.half_duplex == spec.white_to_play } else { spec.half_duplex };

    let mut castling_rights = BTreeSet::new();
    for &(square, piece_kind, black) in &spec.pieces {
        let home_rank = if black { Rank::R8 } else { Rank::R1 };
        if square.rank() != home_rank {
            continue;
        }
        let eligible = matches!(piece_kind, PieceKind::King if square.file() == File::E)
            || matches!(piece_kind, PieceKind::Rook if square.file() == File::A || square.file() == File::H);
        if eligible && !spec.no_castling.contains(&square) {
            castling_rights.insert(square);
        }
    }

    let en_passant = spec.en_passant.first().copied();
    let state = State { castling_rights, en_passant };

    let promotion_box = stock_promotion_box(&spec.pieces, kind, spec.white_to_play, spec_n_moves, &fairy_promotion_kinds);

    let move_factory = if spec.circe { Factory::Circe } else { Factory::Default };

    let (n_moves, half_move) = if kind == StipulationKind::Help && spec.white_to_play {
        (spec_n_moves - 1, true)
    } else {
        (spec_n_moves, false)
    };

    let stipulation = match kind {
        StipulationKind::Direct => Stipulation::Directmate { stalemate, n_moves },
        StipulationKind::Slf => Stipulation::Selfmate { stalemate, n_moves },
        StipulationKind::Help => Stipulation::Helpmate { stalemate, n_moves, half_move },
    };

    let is_help = kind == StipulationKind::Help;
    let n_refutations = if is_help { 0 } else { spec.defence.max(i32::from(spec.try_)) };
    let analysis = AnalysisOptions {
        set_play: spec.set_play,
        n_refutations,
        variations: !is_help && spec.variation,
        threats: !is_help && spec.variation && !spec.no_threat,
        short_variations: !is_help && spec.variation && !spec.no_short_variations,
        tempo_tries: is_help && (spec.null_moves || spec.try_),
    };

    Ok(Task {
        position: Position::new(board, black_to_move, state, promotion_box, move_factory),
        stipulation,
        analysis,
        display: DisplayOptions { locale: Locale::English },
    })
}

fn validate(spec: &ProblemSpec) -> Result<(), SolveError> {
    if spec.stipulation.is_none() {
        return Err(ValidationError::MissingStipulation.into());
    }
    for black in [false, true] {
        let kings: Vec<Square> = spec
            .pieces
            .iter()
            .filter(|&&(_, kind, piece_black)| kind == PieceKind::King && piece_black == black)
            .map(|&(square, _, _)| square)
            .collect();
        match kings.len() {
            0 => return Err(ValidationError::MissingKing { black }.into()),
            1 => {}
            _ => return Err(ValidationError::DuplicateKing { black }.into()),
        }
    }
    Ok(())
}

fn verify(spec: &ProblemSpec) -> Result<(), SolveError> {
    for &square in &spec.no_castling {
        let on_corner = (square.file() == File::A || square.file() == File::E || square.file() == File::H)
            && (square.rank() == Rank::R1 || square.rank() == Rank::R8);
        if !on_corner {
            return Err(UnsupportedOption::NoCastlingOnNonCornerSquare(square).into());
        }
    }
    if spec.en_passant.len() > 1 {
        return Err(UnsupportedOption::MultipleEnPassantSquares.into());
    }
    if let Some(&square) = spec.en_passant.first() {
        if spec.set_play {
            return Err(UnsupportedOption::EnPassantWithSetPlay.into());
        }
        let side_to_move_is_black =
            if spec.stipulation.map(|(kind, _, _)| kind) == Some(StipulationKind::Help) {
                spec.half_duplex == spec.white_to_play
            } else {
                spec.half_duplex
            };
        let expected_rank = if side_to_move_is_black { Rank::R3 } else { Rank::R6 };
        let passed_pawn_rank = if side_to_move_is_black { Rank::R4 } else { Rank::R5 };
        let has_passed_pawn = spec.pieces.iter().any(|&(sq, kind, black)| {
            kind == PieceKind::Pawn && black != side_to_move_is_black && sq.file() == square.file() && sq.rank() == passed_pawn_rank
        });
        if square.rank() != expected_rank || !has_passed_pawn {
            return Err(ValidationError::InconsistentEnPassant(square).into());
        }
    }
    Ok(())
}

fn stock_promotion_box(
    pieces: &[(Square, PieceKind, bool)],
    kind: StipulationKind,
    white_to_play: bool,
    n_moves: i32,
    fairy_kinds: &[PieceKind],
) -> PromotionBox {
    let mut box_ = PromotionBox::new();
    for black in [false, true] {
        let max_move = if (kind == StipulationKind::Direct || (kind == StipulationKind::Help && white_to_play)) && black == white_to_play
        {
            n_moves
        } else {
            n_moves + 1
        };
        let n_pawns = pieces.iter().filter(|&&(_, k, b)| k == PieceKind::Pawn && b == black).count() as i32;
        let max_promotion = max_move.min(n_pawns).max(0) as usize;
        for _ in 0..max_promotion {
            box_.stock(promotion::QUEEN, Piece::new(PieceKind::Queen, black), 1);
            box_.stock(promotion::ROOK, Piece::new(PieceKind::Rook, black), 1);
            box_.stock(promotion::BISHOP, Piece::new(PieceKind::Bishop, black), 1);
            box_.stock(promotion::KNIGHT, Piece::new(PieceKind::Knight, black), 1);
            for (offset, &fairy_kind) in fairy_kinds.iter().enumerate() {
                box_.stock(promotion::KNIGHT + 1 + offset as u8, Piece::new(fairy_kind, black), 1);
            }
        }
    }
    box_
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_problem_is_recognised_in_every_locale() {
        assert_eq!(locale_of_begin_problem("BeginProblem"), Some(Locale::English));
        assert_eq!(locale_of_begin_problem("DebutProbleme"), Some(Locale::French));
        assert_eq!(locale_of_begin_problem("Anfangproblem"), Some(Locale::German));
        assert_eq!(locale_of_begin_problem("Nonsense"), None);
    }

    #[test]
    fn two_mover_with_queen_and_king_parses_into_one_directmate_task() {
        let lines = ["BeginProblem Stipulation #2 Pieces White Ke1 Qh5 Black Ke8 EndProblem"];
        let tasks = parse_block(&lines, Locale::English);
        assert_eq!(tasks.len(), 1);
        let task = tasks.into_iter().next().unwrap().unwrap();
        assert!(matches!(task.stipulation, Stipulation::Directmate { stalemate: false, n_moves: 2 }));
        assert_eq!(task.position.find_king(false), Some(Square::from_file_rank(File::E, Rank::R1)));
        assert_eq!(task.position.find_king(true), Some(Square::from_file_rank(File::E, Rank::R8)));
    }

    #[test]
    fn circe_condition_selects_the_circe_factory() {
        let lines = ["BeginProblem Condition Circe Stipulation #2 Pieces White Ke1 Qa1 Black Ke8 EndProblem"];
        let task = parse_block(&lines, Locale::English).into_iter().next().unwrap().unwrap();
        assert!(matches!(task.position.move_factory(), Factory::Circe));
    }

    #[test]
    fn helpmate_white_to_play_prepends_a_white_half_move() {
        let lines = ["BeginProblem Stipulation h#2 Option WhiteToPlay Pieces White Ke1 Black Ke8 Qd1 EndProblem"];
        let task = parse_block(&lines, Locale::English).into_iter().next().unwrap().unwrap();
        assert!(matches!(
            task.stipulation,
            Stipulation::Helpmate { stalemate: false, n_moves: 1, half_move: true }
        ));
        assert!(!task.position.black_to_move());
    }

    #[test]
    fn missing_black_king_is_rejected() {
        let lines = ["BeginProblem Stipulation #2 Pieces White Ke1 Qh5 EndProblem"];
        let err = parse_block(&lines, Locale::English).into_iter().next().unwrap().unwrap_err();
        assert!(matches!(err, SolveError::Validation(ValidationError::MissingKing { black: true })));
    }

    #[test]
    fn next_problem_yields_two_independent_tasks() {
        let lines = ["BeginProblem Stipulation #1 Pieces White Ke1 Qh5 Black Ke8 NextProblem Stipulation #2 Pieces White Ke1 Rh1 Black Ke8 EndProblem"];
        let tasks = parse_block(&lines, Locale::English);
        assert_eq!(tasks.len(), 2);
        assert!(tasks[0].is_ok());
        assert!(tasks[1].is_ok());
    }
}
