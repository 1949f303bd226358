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

//! Direct mate (or stalemate) in N: white to move, forcing the stipulated
//! result against any black defence.

use crate::{lang::Locale, mv::Move, position::Position};

use super::{battle_play, AnalysisOptions, Solution};

/// A line is terminal for direct play at white's own move (depth 1): the
/// mate is judged on black's reply one ply further in.
const TERMINAL_DEPTH: i32 = 1;

pub fn solve(
    position: &mut Position,
    stalemate: bool,
    n_moves: i32,
    analysis: &AnalysisOptions,
    locale: Locale,
) -> Solution {
    battle_play::solve(
        position,
        stalemate,
        n_moves,
        analysis,
        locale,
        search_max,
        search_min,
        TERMINAL_DEPTH,
    )
}

/// White picks whichever reply maximises the plies-to-mate score; gives up
/// (`i32::MIN`) if none forces anything. Stops early the moment a move
/// reaches the full `depth`, since nothing can score higher.
pub(crate) fn search_max(position: &mut Position, stalemate: bool, depth: i32, pseudo_legal_max: &[Move]) -> i32 {
    let mut max = i32::MIN;
    for &mv in pseudo_legal_max {
        if mv.make(position) {
            let (pseudo_legal_min, _) = position.generate_pseudo_legal();
            let score = search_min(position, stalemate, depth, &pseudo_legal_min, 0);
            if score > max {
                max = score;
            }
        }
        mv.unmake(position);
        if max == depth {
            break;
        }
    }
    max
}

/// Black tries to survive. At `depth == 1`, black needs only one legal
/// reply to refute; beyond that, black plays whichever reply minimises
/// white's score, tracking a running `min` the same way
/// [`search_max`](Self::search_max) tracks a running max, but signed the
/// other way (a negative score always means "refuted").
///
/// `n_refutations` bounds how many of black's replies are allowed to refute
/// before this whole move is abandoned (used to find "tries": first moves
/// defeated by only a handful of defences).
pub(crate) fn search_min(
    position: &mut Position,
    stalemate: bool,
    depth: i32,
    pseudo_legal_min: &[Move],
    n_refutations: i32,
) -> i32 {
    let mut min = 0;
    if depth == 1 {
        for &mv in pseudo_legal_min {
            if mv.make(position) {
                min -= 1;
            }
            mv.unmake(position);
            if min < -n_refutations {
                min = i32::MIN;
                break;
            }
        }
    } else {
        for &mv in pseudo_legal_min {
            if mv.make(position) {
                let (pseudo_legal_max, _) = position.generate_pseudo_legal();
                let score = search_max(position, stalemate, depth - 1, &pseudo_legal_max);
                if min == 0 {
                    min = if score < 0 { -1 } else { score };
                } else if min > 0 {
                    if score < 0 {
                        min = -1;
                    } else if score < min {
                        min = score;
                    }
                } else if score < 0 {
                    min -= 1;
                }
            }
            mv.unmake(position);
            if min < -n_refutations {
                min = i32::MIN;
                break;
            }
        }
    }
    if min == 0 {
        min = if battle_play::evaluate_terminal(position, stalemate) {
            depth
        } else {
            i32::MIN
        };
    }
    min
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        factory::Factory,
        piece::{Piece, PieceKind},
        square::{File, Rank, Square},
    };

    /// The textbook king-and-rook mate: White Kg6, Ra1, Black Kh8, white to
    /// move. `1.Ra8#` checks along the back rank; the black king's only
    /// flight squares (g8, g7, h7) are covered between the rook (g8) and
    /// the white king (g7, h7).
    fn mate_in_one_position() -> Position {
        let mut position = Position::empty(Factory::Default);
        let g6 = Square::from_file_rank(File::G, Rank::R6);
        let h8 = Square::from_file_rank(File::H, Rank::R8);
        let a1 = Square::from_file_rank(File::A, Rank::R1);
        position.board_mut().set(g6, Some(Piece::new(PieceKind::King, false)));
        position.board_mut().set(h8, Some(Piece::new(PieceKind::King, true)));
        position.board_mut().set(a1, Some(Piece::new(PieceKind::Rook, false)));
        position
    }

    #[test]
    fn search_max_finds_a_rook_lift_mate_in_one() {
        let mut position = mate_in_one_position();
        let (pseudo_legal, already_illegal) = position.generate_pseudo_legal();
        assert!(!already_illegal);
        let score = search_max(&mut position, false, 1, &pseudo_legal);
        assert_eq!(score, 1);
    }

    #[test]
    fn solving_the_same_position_reports_a_key_with_hash_mate_suffix() {
        let mut position = mate_in_one_position();
        let analysis = AnalysisOptions::default();
        let solution = solve(&mut position, false, 1, &analysis, Locale::English);
        let Solution::Text(text) = solution else {
            panic!("expected a solved position");
        };
        assert!(text.contains('#'), "expected a mating move, got: {text}");
    }
}
