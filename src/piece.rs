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

//! Piece kinds and colour, and the geometry each kind moves by.
//!
//! A piece's movement is expressed as one of three walk styles (leaper,
//! rider, hopper) over a fixed set of [`Direction`](crate::square::Direction)
//! offsets; [`movegen`](crate::movegen) turns a kind's walk style and offsets
//! into pseudo-legal moves.

use crate::square::{Direction, File, Rank, Square};

/// A kind of piece, orthodox or fairy.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
    /// Moves one square in any of the eight queen directions, but only by
    /// hopping exactly over one occupied square (of either colour) onto the
    /// square immediately beyond it.
    Grasshopper,
    /// A knight that rides its leap repeatedly in a straight line, like a
    /// rook rides orthogonally.
    Nightrider,
    /// A queen and a knight combined.
    Amazon,
}

/// How a piece's offsets are walked during move generation.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum WalkStyle {
    /// Steps exactly one offset, or not at all.
    Leaper,
    /// Repeats an offset until blocked, as a sliding piece.
    Rider,
    /// Requires exactly one occupied square (the hurdle) along the offset,
    /// landing just beyond it.
    Hopper,
}

/// A piece on the board: its kind and colour.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub black: bool,
}

impl Piece {
    /// Builds a new piece of the given kind and colour.
    pub const fn new(kind: PieceKind, black: bool) -> Self {
        Self { kind, black }
    }

    /// Whether capturing this piece ends the game outright (the generator's
    /// royal-piece short circuit, see [`crate::position`]).
    pub const fn is_royal(self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Whether this piece can be the subject of a castling move (as the king
    /// moving, or as the rook it castles with).
    pub const fn is_castling_eligible(self) -> bool {
        matches!(self.kind, PieceKind::King | PieceKind::Rook)
    }

    /// The walk style used to generate this piece's non-pawn, non-castling
    /// moves.
    pub const fn walk_style(self) -> WalkStyle {
        match self.kind {
            PieceKind::King | PieceKind::Knight | PieceKind::Pawn => WalkStyle::Leaper,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Nightrider => {
                WalkStyle::Rider
            }
            PieceKind::Grasshopper => WalkStyle::Hopper,
            PieceKind::Amazon => WalkStyle::Rider,
        }
    }

    /// The offsets this kind walks along. For [`PieceKind::Amazon`] this is
    /// the rider half (queen directions); its leaper half (knight leaps) is
    /// returned separately by [`Self::secondary_offsets`].
    pub const fn offsets(self) -> &'static [Direction] {
        match self.kind {
            PieceKind::King | PieceKind::Queen | PieceKind::Amazon | PieceKind::Grasshopper => {
                &Direction::QUEEN_LIKE
            }
            PieceKind::Rook => &Direction::ROOK_LIKE,
            PieceKind::Bishop => &Direction::BISHOP_LIKE,
            PieceKind::Knight | PieceKind::Nightrider => &Direction::KNIGHT_LIKE,
            PieceKind::Pawn => &[],
        }
    }

    /// The amazon's knight-leap half. `None` for every other kind.
    pub const fn secondary_offsets(self) -> Option<&'static [Direction]> {
        match self.kind {
            PieceKind::Amazon => Some(&Direction::KNIGHT_LIKE),
            _ => None,
        }
    }

    /// The walk style of [`Self::secondary_offsets`], when present.
    pub const fn secondary_walk_style(self) -> Option<WalkStyle> {
        match self.kind {
            PieceKind::Amazon => Some(WalkStyle::Leaper),
            _ => None,
        }
    }

    /// Where a captured or self-relocating piece of this kind and colour is
    /// reborn under Circe-family conditions, given the square the capture (or
    /// anti-Circe relocation) happened on.
    ///
    /// Orthodox pieces are reborn on their game-array square: the king and
    /// queen always on their file, the rook/bishop/knight on whichever of
    /// their two starting squares matches the colour of `origin`. Fairy
    /// pieces (grasshopper, nightrider, amazon) are reborn on their own back
    /// rank, on the file they were captured on.
    pub fn rebirth_square(self, origin: Square) -> Square {
        let back_rank = if self.black { Rank::R8 } else { Rank::R1 };
        match self.kind {
            PieceKind::King => Square::from_file_rank(File::E, back_rank),
            PieceKind::Queen => Square::from_file_rank(File::D, back_rank),
            PieceKind::Rook => corner(origin, self.black, File::A, File::H),
            PieceKind::Bishop => corner(origin, self.black, File::C, File::F),
            PieceKind::Knight => corner(origin, self.black, File::B, File::G),
            PieceKind::Pawn => Square::from_file_rank(
                origin.file(),
                if self.black { Rank::R7 } else { Rank::R2 },
            ),
            PieceKind::Grasshopper | PieceKind::Nightrider | PieceKind::Amazon => {
                Square::from_file_rank(origin.file(), back_rank)
            }
        }
    }

    /// The single-letter (or short) code for this piece, in the given
    /// [locale](crate::lang::Locale). Pawns have no code.
    pub fn code(self, locale: crate::lang::Locale) -> &'static str {
        crate::lang::piece_code(self.kind, locale)
    }
}

/// Picks whichever of two back-rank corner files is the same square colour
/// as `origin`. Which file that is flips between the white and black back
/// ranks, since rank 1 and rank 8 have opposite parity for the same file.
fn corner(origin: Square, black: bool, queenside: File, kingside: File) -> Square {
    let back_rank = if black { Rank::R8 } else { Rank::R1 };
    let target_parity = (origin.file().0 as u32 + origin.rank().0 as u32) % 2;
    let queenside_square = Square::from_file_rank(queenside, back_rank);
    if (queenside_square.file().0 as u32 + queenside_square.rank().0 as u32) % 2 == target_parity {
        queenside_square
    } else {
        Square::from_file_rank(kingside, back_rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn king_and_queen_rebirth_on_their_own_file() {
        let wk = Piece::new(PieceKind::King, false);
        let bk = Piece::new(PieceKind::King, true);
        assert_eq!(wk.rebirth_square(Square(0)).0, 64);
        assert_eq!(bk.rebirth_square(Square(0)).0, 71);

        let wq = Piece::new(PieceKind::Queen, false);
        assert_eq!(wq.rebirth_square(Square(0)).0, 48);
    }

    #[test]
    fn rook_rebirth_picks_the_same_coloured_corner() {
        let wr = Piece::new(PieceKind::Rook, false);
        // a8 (file=0, rank=7) has parity 1 -> kingside corner (h1 = 112).
        assert_eq!(wr.rebirth_square(Square::from_file_rank(File::A, Rank::R8)).0, 112);
        // a1 (file=0, rank=0) has parity 0 -> queenside corner (a1 = 0).
        assert_eq!(wr.rebirth_square(Square::from_file_rank(File::A, Rank::R1)).0, 0);
    }

    #[test]
    fn fairy_pieces_rebirth_on_their_own_back_rank_same_file() {
        let bg = Piece::new(PieceKind::Grasshopper, true);
        let origin = Square::from_file_rank(File::D, Rank::R5);
        assert_eq!(bg.rebirth_square(origin), Square::from_file_rank(File::D, Rank::R8));
    }

    #[test]
    fn only_the_king_is_royal() {
        assert!(Piece::new(PieceKind::King, false).is_royal());
        assert!(!Piece::new(PieceKind::Queen, false).is_royal());
    }
}
