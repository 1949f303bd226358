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

//! Selfmate (or self-stalemate) in N: white plays first and, against every
//! black defence, forces black's own final move to be the one that mates
//! (or stalemates) *white*.
//!
//! The ply alternation is the same as [`crate::problem::directmate`] (white
//! moves at `depth`, black replies at the same `depth` before the next
//! white move consumes one), but the side whose mate is evaluated as the
//! leaf flips: directmate's leaf is "black, to move, has nothing" at
//! `depth == 1` inside `search_min`; a selfmate's leaf is "white, to move,
//! has nothing" at `depth == 0` inside `search_max`, since it's black's
//! reply that must deliver the mate. `search_min` here has no special leaf
//! case of its own: every black reply simply recurses one depth further
//! into `search_max`, which is where `depth == 0` is caught.

use crate::{lang::Locale, mv::Move, position::Position};

use super::{battle_play::evaluate_terminal, AnalysisOptions, Solution};
use crate::tree::{to_flattened, Branch, Play};

pub fn solve(
    position: &mut Position,
    stalemate: bool,
    n_moves: i32,
    analysis: &AnalysisOptions,
    locale: Locale,
) -> Solution {
    let (pseudo_legal_max, _) = position.generate_pseudo_legal();
    let include_actual_play = position.is_legal();
    let mut report = Vec::new();
    if include_actual_play || analysis.set_play {
        let mut branches = Vec::new();
        analyse_max(
            position,
            stalemate,
            n_moves,
            &pseudo_legal_max,
            &mut branches,
            locale,
            analysis,
            include_actual_play,
            include_actual_play,
        );
        report.push(to_flattened(&branches).into_iter().collect::<Vec<_>>());
    }
    let mut text_parts = Vec::new();
    for lines in &report {
        text_parts.push(crate::tree::to_formatted(lines));
    }
    if !include_actual_play {
        text_parts.push(
            if analysis.set_play {
                "Illegal position in actual play."
            } else {
                "Illegal position."
            }
            .to_string(),
        );
    }
    if text_parts.is_empty() {
        Solution::IllegalPosition
    } else {
        Solution::Text(text_parts.join("\n"))
    }
}

/// White, to move with `depth` moves left in the budget (`depth == 0` means
/// white should already have nothing, i.e. black's last move should have
/// mated/stalemated white). Returns `1` on a forced success from this
/// point, or `i32::MIN` if no white move (or the depth-0 leaf) holds.
pub(crate) fn search_max(position: &mut Position, stalemate: bool, depth: i32, pseudo_legal_max: &[Move]) -> i32 {
    if depth == 0 {
        return if position.is_terminal(pseudo_legal_max) && evaluate_terminal(position, stalemate) {
            1
        } else {
            i32::MIN
        };
    }
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
        if max > 0 {
            break;
        }
    }
    max
}

/// Black, to move with `depth` white moves left in white's budget. Success
/// requires *every* legal reply to eventually force the selfmate (a single
/// escape ruins the line), mirroring directmate's requirement that every
/// defence eventually loses — except here "losing" means "is compelled to
/// mate white".
pub(crate) fn search_min(
    position: &mut Position,
    stalemate: bool,
    depth: i32,
    pseudo_legal_min: &[Move],
    n_refutations: i32,
) -> i32 {
    if pseudo_legal_min.is_empty() {
        return i32::MIN;
    }
    let mut min = 0;
    let mut any_legal = false;
    for &mv in pseudo_legal_min {
        if mv.make(position) {
            any_legal = true;
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
    if !any_legal || min == 0 {
        min = i32::MIN;
    }
    min
}

#[allow(clippy::too_many_arguments)]
fn analyse_max(
    position: &mut Position,
    stalemate: bool,
    depth: i32,
    pseudo_legal_max: &[Move],
    branches: &mut Vec<Branch>,
    locale: Locale,
    options: &AnalysisOptions,
    include_actual_play: bool,
    mark_keys: bool,
) {
    if depth == 0 {
        return;
    }
    if !include_actual_play {
        return;
    }
    for &mv in pseudo_legal_max {
        let mut text = String::new();
        mv.pre_write(position, locale, &mut text);
        if mv.make(position) {
            let (pseudo_legal_min, _) = position.generate_pseudo_legal();
            let score = search_min(position, stalemate, depth, &pseudo_legal_min, options.n_refutations);
            if score > 0 {
                let play = if mark_keys { Play::Key } else { Play::Continuation };
                if options.variations && depth > 1 {
                    let mut variations = Vec::new();
                    analyse_min(
                        position,
                        stalemate,
                        depth,
                        &pseudo_legal_min,
                        &mut variations,
                        locale,
                        options,
                    );
                    Move::post_write(position, &pseudo_legal_min, &mut text);
                    branches.push(((play, text), to_flattened(&variations)));
                } else {
                    Move::post_write(position, &pseudo_legal_min, &mut text);
                    branches.push(((play, text), Vec::new()));
                }
            } else if score >= -options.n_refutations {
                let mut variations = Vec::new();
                analyse_min(
                    position,
                    stalemate,
                    depth,
                    &pseudo_legal_min,
                    &mut variations,
                    locale,
                    options,
                );
                Move::post_write(position, &pseudo_legal_min, &mut text);
                branches.push(((Play::Try, text), to_flattened(&variations)));
            }
        }
        mv.unmake(position);
    }
}

fn analyse_min(
    position: &mut Position,
    stalemate: bool,
    depth: i32,
    pseudo_legal_min: &[Move],
    branches: &mut Vec<Branch>,
    locale: Locale,
    options: &AnalysisOptions,
) {
    for &mv in pseudo_legal_min {
        let mut text = String::new();
        mv.pre_write(position, locale, &mut text);
        if mv.make(position) {
            let (pseudo_legal_max, _) = position.generate_pseudo_legal();
            let score = search_max(position, stalemate, depth - 1, &pseudo_legal_max);
            if score > 0 {
                if depth > 1 {
                    let mut continuations = Vec::new();
                    analyse_max(
                        position,
                        stalemate,
                        depth - 1,
                        &pseudo_legal_max,
                        &mut continuations,
                        locale,
                        options,
                        true,
                        false,
                    );
                    Move::post_write(position, &pseudo_legal_max, &mut text);
                    branches.push(((Play::Variation, text), to_flattened(&continuations)));
                } else {
                    Move::post_write(position, &pseudo_legal_max, &mut text);
                    branches.push(((Play::Variation, text), Vec::new()));
                }
            } else {
                Move::post_write(position, &pseudo_legal_max, &mut text);
                branches.push(((Play::Refutation, text), Vec::new()));
            }
        }
        mv.unmake(position);
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

    /// White Kh1 Pg2 Pg1, Black Ka1 Pb2, black to move. Black has several
    /// legal replies (a king step as well as the pawn's promotion choices),
    /// and not all of them mate the boxed-in white king (a knight or
    /// bishop promotion doesn't check along the back rank, and a king step
    /// doesn't check at all), so `search_min` must refute the whole line.
    fn boxed_king_position() -> Position {
        let mut position = Position::empty(Factory::Default);
        let h1 = Square::from_file_rank(File::H, Rank::R1);
        let g1 = Square::from_file_rank(File::G, Rank::R1);
        let g2 = Square::from_file_rank(File::G, Rank::R2);
        let a1 = Square::from_file_rank(File::A, Rank::R1);
        let b2 = Square::from_file_rank(File::B, Rank::R2);
        position.board_mut().set(h1, Some(Piece::new(PieceKind::King, false)));
        position.board_mut().set(g1, Some(Piece::new(PieceKind::Pawn, false)));
        position.board_mut().set(g2, Some(Piece::new(PieceKind::Pawn, false)));
        position.board_mut().set(a1, Some(Piece::new(PieceKind::King, true)));
        position.board_mut().set(b2, Some(Piece::new(PieceKind::Pawn, true)));
        position.set_black_to_move(true);
        position
    }

    #[test]
    fn not_every_promotion_mates_so_the_try_is_refuted() {
        let mut position = boxed_king_position();
        let (pseudo_legal, already_illegal) = position.generate_pseudo_legal();
        assert!(!already_illegal);
        let score = search_min(&mut position, false, 1, &pseudo_legal, 0);
        assert_eq!(score, i32::MIN);
    }
}
