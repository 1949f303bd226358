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

//! Reads the two textual input grammars (§6) into solvable [`Task`]s.
//!
//! A line starting a `BeginProblem` block (any of the three locales) opens
//! format A and is read until its matching `EndProblem`, possibly yielding
//! several tasks across `NextProblem` separators; any other non-blank line
//! is read on its own as one format B line.

pub mod epd;
pub mod problem_text;

use crate::{
    error::SolveError,
    position::Position,
    problem::{AnalysisOptions, DisplayOptions, Stipulation},
};

/// One fully parsed, ready-to-solve unit of work.
pub struct Task {
    pub position: Position,
    pub stipulation: Stipulation,
    pub analysis: AnalysisOptions,
    pub display: DisplayOptions,
}

/// Parses every task found in `input`. A task that fails to parse or
/// validate is reported as its own `Err` rather than aborting the whole
/// input, per the propagation policy (§7): one bad task does not take down
/// the tasks around it.
pub fn parse_tasks(input: &str) -> Vec<Result<Task, SolveError>> {
    let mut tasks = Vec::new();
    let mut lines = input.lines().peekable();
    while let Some(line) = lines.next() {
        let Some(first_token) = line.split_whitespace().next() else {
            continue;
        };
        if let Some(locale) = problem_text::locale_of_begin_problem(first_token) {
            let mut block_lines = vec![line];
            loop {
                if problem_text::block_is_closed(&block_lines, locale) {
                    break;
                }
                match lines.next() {
                    Some(next_line) => block_lines.push(next_line),
                    None => break,
                }
            }
            tasks.extend(problem_text::parse_block(&block_lines, locale));
        } else {
            tasks.push(epd::parse_line(line));
        }
    }
    tasks
}
