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

//! `acd N`: a pure leaf count of the legal move tree `N` full moves deep
//! (or `2N + 1` half-moves with `half_move`), with no mate evaluation or
//! annotation at all.

use crate::position::Position;

use super::Solution;

pub fn solve(position: &mut Position, n_moves: i32, half_move: bool) -> Solution {
    if !position.is_legal() {
        return Solution::IllegalPosition;
    }
    let plies = 2 * n_moves + i32::from(half_move);
    Solution::Text(count(position, plies).to_string())
}

fn count(position: &mut Position, plies: i32) -> u64 {
    if plies == 0 {
        return 1;
    }
    let (pseudo_legal, _) = position.generate_pseudo_legal();
    let mut total = 0;
    for mv in pseudo_legal {
        if mv.make(position) {
            total += count(position, plies - 1);
        }
        mv.unmake(position);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        factory::Factory,
        piece::{Piece, PieceKind},
        square::{File, Rank, Square},
    };

    /// White Kd1, Black Kd3 Pd2, white to move: the king may step to c1 or
    /// e1 (d2 is occupied by black's pawn, and capturing it would step
    /// next to the black king), so there are exactly 2 legal first moves.
    #[test]
    fn one_ply_from_a_blocked_king_and_pawn_ending_counts_two() {
        let mut position = Position::empty(Factory::Default);
        let d1 = Square::from_file_rank(File::D, Rank::R1);
        let d3 = Square::from_file_rank(File::D, Rank::R3);
        let d2 = Square::from_file_rank(File::D, Rank::R2);
        position.board_mut().set(d1, Some(Piece::new(PieceKind::King, false)));
        position.board_mut().set(d3, Some(Piece::new(PieceKind::King, true)));
        position.board_mut().set(d2, Some(Piece::new(PieceKind::Pawn, true)));

        let solution = solve(&mut position, 0, true);
        assert_eq!(solution, Solution::Text("2".to_string()));
    }
}
