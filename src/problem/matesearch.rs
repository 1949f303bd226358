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

//! `dm N`: for every legal first move, find the shortest forced mate (if
//! any) within `N` full moves, without annotating black's defences. Used
//! to answer "does this position have a mate in N", the EPD `dm` opcode.

use crate::{lang::Locale, mv::Move, position::Position, tree::to_ordered_and_formatted};

use super::{directmate, Solution};

pub fn solve(position: &mut Position, n_moves: i32, locale: Locale) -> Solution {
    let (pseudo_legal, _) = position.generate_pseudo_legal();
    if !position.is_legal() {
        return Solution::IllegalPosition;
    }

    let mut points = Vec::new();
    for &mv in &pseudo_legal {
        let mut text = String::new();
        mv.pre_write(position, locale, &mut text);
        if mv.make(position) {
            let (pseudo_legal_min, _) = position.generate_pseudo_legal();
            let shortest = (1..=n_moves).find(|&depth| directmate::search_min(position, false, depth, &pseudo_legal_min, 0) > 0);
            if let Some(depth) = shortest {
                Move::post_write(position, &pseudo_legal_min, &mut text);
                points.push((format!("+M{depth}"), text));
            }
        }
        mv.unmake(position);
    }

    if points.is_empty() {
        Solution::Text(format!("No mate in {n_moves} found."))
    } else {
        Solution::Text(to_ordered_and_formatted(&points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        factory::Factory,
        piece::{Piece, PieceKind},
        square::{File, Rank, Square},
    };

    /// White Kg6 Ra1, Black Kh8, white to move: `Ra1-a8#` is a mate in 1,
    /// and since it's the only mating try available here it should be the
    /// unique reported hit.
    #[test]
    fn finds_the_single_back_rank_mate_in_one() {
        let mut position = Position::empty(Factory::Default);
        let g6 = Square::from_file_rank(File::G, Rank::R6);
        let h8 = Square::from_file_rank(File::H, Rank::R8);
        let a1 = Square::from_file_rank(File::A, Rank::R1);
        position.board_mut().set(g6, Some(Piece::new(PieceKind::King, false)));
        position.board_mut().set(h8, Some(Piece::new(PieceKind::King, true)));
        position.board_mut().set(a1, Some(Piece::new(PieceKind::Rook, false)));

        let solution = solve(&mut position, 1, Locale::English);
        let Solution::Text(text) = solution else {
            panic!("expected hits, got {solution:?}");
        };
        assert!(text.contains("+M1"), "expected a +M1 hit, got: {text}");
        assert!(text.contains('#'), "expected the move to carry the mate suffix, got: {text}");
    }
}
