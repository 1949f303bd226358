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

use std::fmt::{self, Display, Formatter};

/// What kind of token the parser expected or rejected.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ParseErrorKind {
    /// A token was outside an expected range (e.g. a square off the board).
    ErroneousToken(&'static str),
    /// Expected a token but found nothing.
    ExpectedToken,
    /// Found a token that doesn't belong in this grammar.
    UnknownKeyword(String),
    /// A FEN-style field was malformed.
    BadFen(&'static str),
}

/// An error raised while tokenising or structurally parsing a task.
///
/// Carries a `position`: a 0-based index into the sequence of
/// whitespace-separated tokens of the task being read, so a diagnostic can
/// say where in the input the problem was.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
}

impl ParseError {
    /// Builds a [`ParseError`] for a malformed square, with no token position
    /// known yet (attached by the caller with [`at`](Self::at) once the
    /// position is known).
    pub fn bad_square() -> Self {
        Self {
            kind: ParseErrorKind::ErroneousToken("square"),
            position: 0,
        }
    }

    /// Returns a copy of this error with `position` set.
    pub fn at(mut self, position: usize) -> Self {
        self.position = position;
        self
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::ErroneousToken(what) => {
                write!(f, "erroneous {what} at token {}", self.position)
            }
            ParseErrorKind::ExpectedToken => {
                write!(f, "expected a token at token {}", self.position)
            }
            ParseErrorKind::UnknownKeyword(word) => {
                write!(f, "unknown keyword \"{word}\" at token {}", self.position)
            }
            ParseErrorKind::BadFen(field) => {
                write!(f, "malformed FEN field \"{field}\" at token {}", self.position)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// An error raised once a task has parsed structurally but fails a semantic
/// check.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ValidationError {
    /// Neither side has a king, or a side has more than one.
    MissingKing { black: bool },
    DuplicateKing { black: bool },
    /// A castling-rights square doesn't hold the piece it should.
    CastlingRightsWithoutPiece(crate::square::Square),
    /// The en-passant square isn't adjacent to a pawn that could have just
    /// played a double step.
    InconsistentEnPassant(crate::square::Square),
    /// No stipulation (`#N`, `=N`, `h#N`, `s#N`) was given.
    MissingStipulation,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKing { black } => {
                write!(f, "missing {} king", if *black { "black" } else { "white" })
            }
            Self::DuplicateKing { black } => {
                write!(
                    f,
                    "duplicate {} king",
                    if *black { "black" } else { "white" }
                )
            }
            Self::CastlingRightsWithoutPiece(sq) => {
                write!(f, "castling right on {sq} has no king or rook")
            }
            Self::InconsistentEnPassant(sq) => {
                write!(f, "en-passant square {sq} has no capturable pawn")
            }
            Self::MissingStipulation => write!(f, "missing stipulation"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A recognised option whose semantics this crate does not implement.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum UnsupportedOption {
    /// `Option EnPassant` was given more than one square.
    MultipleEnPassantSquares,
    /// `Option EnPassant` combined with `Option SetPlay`.
    EnPassantWithSetPlay,
    /// `Option NoCastling` named a square that isn't a corner rook square.
    NoCastlingOnNonCornerSquare(crate::square::Square),
}

impl Display for UnsupportedOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleEnPassantSquares => {
                write!(f, "more than one en-passant square is not supported")
            }
            Self::EnPassantWithSetPlay => {
                write!(f, "en-passant combined with set play is not supported")
            }
            Self::NoCastlingOnNonCornerSquare(sq) => {
                write!(f, "NoCastling on non-corner square {sq} is not supported")
            }
        }
    }
}

impl std::error::Error for UnsupportedOption {}

/// The umbrella error type for the task-processing boundary (§7).
///
/// `IllegalPosition` is deliberately absent: it is a solve-time *outcome*,
/// rendered as text in the solution, not an error that aborts a task.
#[derive(Debug)]
pub enum SolveError {
    Parse(ParseError),
    Validation(ValidationError),
    Unsupported(UnsupportedOption),
    /// A reached-unreachable condition: a logic bug, not a bad input.
    Internal(&'static str),
}

impl Display for SolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "parse error: {e}"),
            Self::Validation(e) => write!(f, "invalid position: {e}"),
            Self::Unsupported(e) => write!(f, "unsupported option: {e}"),
            Self::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for SolveError {}

impl From<ParseError> for SolveError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<ValidationError> for SolveError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<UnsupportedOption> for SolveError {
    fn from(e: UnsupportedOption) -> Self {
        Self::Unsupported(e)
    }
}
