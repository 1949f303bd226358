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

//! Piece-letter and keyword tables for the three languages problem text can
//! be written in.

use crate::piece::PieceKind;

/// A language a problem's input and solution notation may be written in.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Locale {
    English,
    French,
    German,
}

impl Locale {
    /// Parses a locale keyword ("english"/"french"/"german", any case), as
    /// used by the `Option` command in problem text.
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "english" => Some(Self::English),
            "french" => Some(Self::French),
            "german" => Some(Self::German),
            _ => None,
        }
    }
}

/// The notation letter for `kind` in `locale`. Pawns have no letter (the
/// empty string).
pub const fn piece_code(kind: PieceKind, locale: Locale) -> &'static str {
    match (kind, locale) {
        (PieceKind::Pawn, _) => "",
        (PieceKind::King, Locale::English) => "K",
        (PieceKind::King, Locale::French) => "R",
        (PieceKind::King, Locale::German) => "K",
        (PieceKind::Queen, Locale::English) => "Q",
        (PieceKind::Queen, Locale::French) => "D",
        (PieceKind::Queen, Locale::German) => "D",
        (PieceKind::Rook, Locale::English) => "R",
        (PieceKind::Rook, Locale::French) => "T",
        (PieceKind::Rook, Locale::German) => "T",
        (PieceKind::Bishop, Locale::English) => "B",
        (PieceKind::Bishop, Locale::French) => "F",
        (PieceKind::Bishop, Locale::German) => "L",
        (PieceKind::Knight, Locale::English) => "S",
        (PieceKind::Knight, Locale::French) => "C",
        (PieceKind::Knight, Locale::German) => "S",
        (PieceKind::Grasshopper, Locale::French) => "S",
        (PieceKind::Grasshopper, Locale::English | Locale::German) => "G",
        (PieceKind::Nightrider, _) => "N",
        (PieceKind::Amazon, _) => "AM",
    }
}

/// Parses a piece-kind letter for `locale` back into a [`PieceKind`].
/// Orthodox letters are locale-specific; the fairy letters (G/N/A) are
/// shared across locales, matching the original notation tables.
pub fn parse_piece_code(code: &str, locale: Locale) -> Option<PieceKind> {
    let kinds = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Grasshopper,
        PieceKind::Nightrider,
        PieceKind::Amazon,
    ];
    kinds.into_iter().find(|&kind| piece_code(kind, locale) == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_letter_differs_by_locale() {
        assert_eq!(piece_code(PieceKind::Knight, Locale::English), "S");
        assert_eq!(piece_code(PieceKind::Knight, Locale::German), "S");
        assert_eq!(piece_code(PieceKind::Knight, Locale::French), "C");
    }

    #[test]
    fn grasshopper_letter_is_s_only_in_french() {
        assert_eq!(piece_code(PieceKind::Grasshopper, Locale::English), "G");
        assert_eq!(piece_code(PieceKind::Grasshopper, Locale::German), "G");
        assert_eq!(piece_code(PieceKind::Grasshopper, Locale::French), "S");
    }

    #[test]
    fn pawn_has_no_code() {
        assert_eq!(piece_code(PieceKind::Pawn, Locale::English), "");
    }

    #[test]
    fn parse_round_trips_fairy_codes() {
        assert_eq!(parse_piece_code("G", Locale::English), Some(PieceKind::Grasshopper));
        assert_eq!(parse_piece_code("AM", Locale::German), Some(PieceKind::Amazon));
    }

    #[test]
    fn locale_parse_is_case_insensitive() {
        assert_eq!(Locale::parse("ENGLISH"), Some(Locale::English));
        assert_eq!(Locale::parse("bogus"), None);
    }
}
