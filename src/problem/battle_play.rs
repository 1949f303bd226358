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

//! The tree walk shared by [`crate::problem::directmate`] and
//! [`crate::problem::selfmate`]: both stipulations force black into a mate
//! (or stalemate) within a move count, and differ only in how a leaf is
//! scored (`search_max`/`search_min`) and at which depth a line is
//! terminal.

use crate::{
    lang::Locale,
    mv::Move,
    position::Position,
    tree::{to_flattened, Branch, Play},
};

use super::{AnalysisOptions, Solution};

/// White's half of the minimax: returns the number of plies to mate (or
/// `i32::MIN` if no move holds) in this subtree.
pub(crate) type SearchMax = fn(&mut Position, bool, i32, &[Move]) -> i32;
/// Black's half of the minimax, given how many of white's more promising
/// siblings are still allowed to be refuted (`n_refutations`).
pub(crate) type SearchMin = fn(&mut Position, bool, i32, &[Move], i32) -> i32;

/// Evaluates whether `position`, with no further moves to search, is the
/// kind of terminal node this stipulation wants: a mate if `!stalemate`, a
/// stalemate if `stalemate`.
pub(crate) fn evaluate_terminal(position: &Position, stalemate: bool) -> bool {
    (position.is_check() == 0) == stalemate
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn solve(
    position: &mut Position,
    stalemate: bool,
    n_moves: i32,
    options: &AnalysisOptions,
    locale: Locale,
    search_max: SearchMax,
    search_min: SearchMin,
    terminal_depth: i32,
) -> Solution {
    let (pseudo_legal_max, _) = position.generate_pseudo_legal();
    let include_actual_play = position.is_legal();
    let mut report = Vec::new();
    if include_actual_play || options.set_play {
        let mut branches = Vec::new();
        analyse_max(
            position,
            stalemate,
            n_moves,
            &pseudo_legal_max,
            &mut branches,
            locale,
            options.variations,
            options.threats,
            options.short_variations,
            options.set_play,
            options.n_refutations,
            include_actual_play,
            include_actual_play,
            search_max,
            search_min,
            terminal_depth,
        );
        report.push(crate::tree::to_formatted(&to_flattened(&branches)));
    }
    if !include_actual_play {
        report.push(
            if options.set_play {
                "Illegal position in actual play."
            } else {
                "Illegal position."
            }
            .to_string(),
        );
    }
    if report.is_empty() {
        Solution::IllegalPosition
    } else {
        Solution::Text(report.join("\n"))
    }
}

#[allow(clippy::too_many_arguments)]
fn analyse_max(
    position: &mut Position,
    stalemate: bool,
    depth: i32,
    pseudo_legal_max: &[Move],
    branches: &mut Vec<Branch>,
    locale: Locale,
    include_variations: bool,
    include_threats: bool,
    include_short_variations: bool,
    include_set_play: bool,
    include_tries: i32,
    include_actual_play: bool,
    mark_keys: bool,
    search_max: SearchMax,
    search_min: SearchMin,
    terminal_depth: i32,
) {
    if include_set_play && depth != terminal_depth {
        if Move::Null.make(position) {
            let (pseudo_legal_min, _) = position.generate_pseudo_legal();
            let score = search_min(position, stalemate, depth, &pseudo_legal_min, 0);
            let mut variations = Vec::new();
            let variation_depth = if score > 0 { depth - score + 1 } else { depth };
            analyse_min(
                position,
                stalemate,
                variation_depth,
                &pseudo_legal_min,
                &mut variations,
                locale,
                include_variations,
                include_threats,
                include_short_variations,
                true,
                search_max,
                search_min,
                terminal_depth,
            );
            branches.push(((Play::Set, "null".to_string()), to_flattened(&variations)));
        }
        Move::Null.unmake(position);
    }
    if include_actual_play {
        for &mv in pseudo_legal_max {
            let mut text = String::new();
            mv.pre_write(position, locale, &mut text);
            if mv.make(position) {
                let (pseudo_legal_min, _) = position.generate_pseudo_legal();
                let score = search_min(position, stalemate, depth, &pseudo_legal_min, include_tries);
                if score > 0 {
                    let play = if mark_keys { Play::Key } else { Play::Continuation };
                    if include_variations && depth != terminal_depth {
                        let mut variations = Vec::new();
                        analyse_min(
                            position,
                            stalemate,
                            depth - score + 1,
                            &pseudo_legal_min,
                            &mut variations,
                            locale,
                            true,
                            include_threats,
                            include_short_variations,
                            false,
                            search_max,
                            search_min,
                            terminal_depth,
                        );
                        Move::post_write(position, &pseudo_legal_min, &mut text);
                        branches.push(((play, text), to_flattened(&variations)));
                    } else {
                        Move::post_write(position, &pseudo_legal_min, &mut text);
                        branches.push(((play, text), Vec::new()));
                    }
                } else if score >= -include_tries {
                    let mut variations = Vec::new();
                    analyse_min(
                        position,
                        stalemate,
                        depth,
                        &pseudo_legal_min,
                        &mut variations,
                        locale,
                        include_variations,
                        include_threats,
                        include_short_variations,
                        false,
                        search_max,
                        search_min,
                        terminal_depth,
                    );
                    Move::post_write(position, &pseudo_legal_min, &mut text);
                    branches.push(((Play::Try, text), to_flattened(&variations)));
                }
            }
            mv.unmake(position);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn analyse_min(
    position: &mut Position,
    stalemate: bool,
    depth: i32,
    pseudo_legal_min: &[Move],
    branches: &mut Vec<Branch>,
    locale: Locale,
    include_variations: bool,
    include_threats: bool,
    include_short_variations: bool,
    include_set_play: bool,
    search_max: SearchMax,
    search_min: SearchMin,
    terminal_depth: i32,
) {
    if depth == terminal_depth {
        for &mv in pseudo_legal_min {
            let mut text = String::new();
            mv.pre_write(position, locale, &mut text);
            if mv.make(position) {
                let (pseudo_legal_max, _) = position.generate_pseudo_legal();
                Move::post_write(position, &pseudo_legal_max, &mut text);
                branches.push(((Play::Refutation, text), Vec::new()));
            }
            mv.unmake(position);
        }
        return;
    }

    let mut threats = Vec::new();
    if depth > 1 && include_variations && include_threats && !include_set_play {
        if Move::Null.make(position) {
            let (pseudo_legal_max, _) = position.generate_pseudo_legal();
            let score = search_max(position, stalemate, depth - 1, &pseudo_legal_max);
            if score > 0 {
                analyse_max(
                    position,
                    stalemate,
                    depth - score,
                    &pseudo_legal_max,
                    &mut threats,
                    locale,
                    true,
                    true,
                    include_short_variations,
                    false,
                    0,
                    true,
                    false,
                    search_max,
                    search_min,
                    terminal_depth,
                );
                branches.push(((Play::Threat, "null".to_string()), to_flattened(&threats)));
            } else {
                branches.push(((Play::Zugzwang, "null".to_string()), Vec::new()));
            }
        }
        Move::Null.unmake(position);
    }

    for &mv in pseudo_legal_min {
        let mut text = String::new();
        mv.pre_write(position, locale, &mut text);
        if mv.make(position) {
            let (pseudo_legal_max, _) = position.generate_pseudo_legal();
            let score = search_max(position, stalemate, depth - 1, &pseudo_legal_max);
            if score > 0 {
                if (include_variations || include_set_play) && (score == 1 || include_short_variations) {
                    let mut continuations = Vec::new();
                    analyse_max(
                        position,
                        stalemate,
                        depth - score,
                        &pseudo_legal_max,
                        &mut continuations,
                        locale,
                        include_variations,
                        include_threats,
                        include_short_variations,
                        false,
                        0,
                        true,
                        false,
                        search_max,
                        search_min,
                        terminal_depth,
                    );
                    if !continuations.iter().any(|c| threats.contains(c)) {
                        Move::post_write(position, &pseudo_legal_max, &mut text);
                        branches.push(((Play::Variation, text), to_flattened(&continuations)));
                    }
                }
            } else if !include_set_play {
                Move::post_write(position, &pseudo_legal_max, &mut text);
                branches.push(((Play::Refutation, text), Vec::new()));
            }
        }
        mv.unmake(position);
    }
}
