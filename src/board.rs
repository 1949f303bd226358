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

//! The 128-cell mailbox board.

use std::fmt::{self, Display, Formatter};

use crate::{
    piece::Piece,
    square::{File, Rank, Square},
};

/// A 0x88 mailbox board: 128 cells, half of which are off-board sentinels
/// that are never written.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    cells: [Option<Piece>; Square::TOTAL],
}

impl Board {
    /// An empty board.
    pub const fn empty() -> Self {
        Self {
            cells: [None; Square::TOTAL],
        }
    }

    /// The piece on `square`, if any. Panics (in debug builds) if `square`
    /// is off-board.
    pub fn at(&self, square: Square) -> Option<Piece> {
        debug_assert!(square.is_valid(), "read of an off-board square");
        self.cells[square.to_index()]
    }

    /// Places (or clears, with `None`) a piece on `square`, returning
    /// whatever was there before.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        debug_assert!(square.is_valid(), "write to an off-board square");
        std::mem::replace(&mut self.cells[square.to_index()], piece)
    }

    /// Iterates every on-board square together with its occupant, empty
    /// cells included, file by file from a1 to h8.
    pub fn squares(&self) -> impl Iterator<Item = (Square, Option<Piece>)> + '_ {
        (0..File::TOTAL as u8).flat_map(move |file| {
            (0..Rank::TOTAL as u8).map(move |rank| {
                let square = Square::from_file_rank(File(file), Rank(rank));
                (square, self.at(square))
            })
        })
    }

    /// Iterates every occupied on-board square.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares()
            .filter_map(|(square, piece)| piece.map(|p| (square, p)))
    }
}

impl Display for Board {
    /// Prints the board as eight ranks, rank 8 first, one FEN-like run per
    /// rank (digits for consecutive empty squares, letters for pieces,
    /// uppercase for white, lowercase for black).
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for rank in (0..Rank::TOTAL as u8).rev() {
            let mut empty_run = 0u8;
            for file in 0..File::TOTAL as u8 {
                let square = Square::from_file_rank(File(file), Rank(rank));
                match self.at(square) {
                    None => empty_run += 1,
                    Some(piece) => {
                        if empty_run > 0 {
                            write!(f, "{empty_run}")?;
                            empty_run = 0;
                        }
                        let code = piece.code(crate::lang::Locale::English);
                        let letter = if code.is_empty() { "P" } else { code };
                        if piece.black {
                            write!(f, "{}", letter.to_lowercase())?;
                        } else {
                            write!(f, "{letter}")?;
                        }
                    }
                }
            }
            if empty_run > 0 {
                write!(f, "{empty_run}")?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceKind;

    #[test]
    fn set_then_at_round_trips() {
        let mut board = Board::empty();
        let e4 = "e4".parse::<Square>().unwrap();
        let wp = Piece::new(PieceKind::Pawn, false);
        assert_eq!(board.set(e4, Some(wp)), None);
        assert_eq!(board.at(e4), Some(wp));
        assert_eq!(board.set(e4, None), Some(wp));
        assert_eq!(board.at(e4), None);
    }

    #[test]
    fn empty_board_prints_as_all_eights() {
        let board = Board::empty();
        assert_eq!(board.to_string(), "8/8/8/8/8/8/8/8");
    }
}
