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

//! Folds a search's raw branch-and-line output into the annotated,
//! indented solution text a problem's solution is printed as.

use std::collections::VecDeque;
use std::fmt::Write as _;

/// One annotated move (or a `"null"` marker) in a solution line.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Debug)]
pub enum Play {
    Set,
    Try,
    Key,
    Continuation,
    Tempo1st,
    Help1st,
    Zugzwang,
    Threat,
    Variation,
    Refutation,
    Tempo2nd,
    Help2nd,
}

/// A play tagged with its rendered long-algebraic text (or `"null"`).
pub type Point = (Play, String);
/// One full line of play, root to leaf.
pub type Line = VecDeque<Point>;
/// A point together with every line that continues after it.
pub type Branch = (Point, Vec<Line>);

/// Expands each branch into one line per child (or a single one-point line
/// for a childless branch), the inverse of [`to_mapped`].
pub fn to_flattened(branches: &[Branch]) -> Vec<Line> {
    let mut lines = Vec::new();
    for (point, children) in branches {
        if children.is_empty() {
            let mut line = Line::new();
            line.push_back(point.clone());
            lines.push(line);
        } else {
            for child in children {
                let mut line = child.clone();
                line.push_front(point.clone());
                lines.push(line);
            }
        }
    }
    lines
}

/// Groups lines sharing the same first point into one branch per distinct
/// point, each carrying the remaining tails as its children.
fn to_mapped(lines: &[Line]) -> Vec<Branch> {
    let mut branches: Vec<Branch> = Vec::new();
    for line in lines {
        let Some(front) = line.front().cloned() else {
            continue;
        };
        let tail: Line = line.iter().skip(1).cloned().collect();
        if let Some(branch) = branches.iter_mut().find(|branch| branch.0 == front) {
            branch.1.push(tail);
        } else if tail.is_empty() {
            branches.push((front, Vec::new()));
        } else {
            branches.push((front, vec![tail]));
        }
    }
    branches
}

/// Stably sorts branches by [`Play`], in the declaration order above (set
/// play first, help/tempo markers last).
fn to_ordered(mut branches: Vec<Branch>) -> Vec<Branch> {
    branches.sort_by(|a, b| a.0 .0.cmp(&b.0 .0));
    branches
}

/// Merges branches that agree on both play and children, joining their move
/// text with a comma (two moves that transpose into the same continuations).
fn to_grouped(branches: Vec<Branch>) -> Vec<Branch> {
    let mut results: Vec<Branch> = Vec::new();
    for (point, children) in branches {
        let existing = results
            .iter_mut()
            .find(|result: &&mut Branch| result.0 .0 == point.0 && result.1 == children);
        if let Some(existing) = existing {
            existing.0 .1.push(',');
            existing.0 .1.push_str(&point.1);
        } else {
            results.push((point, children));
        }
    }
    results
}

/// Renders a flattened set of lines as the final annotated solution text.
pub fn to_formatted(lines: &[Line]) -> String {
    let mut out = String::new();
    write_lines(lines, 1, false, true, false, &mut out);
    out
}

fn write_lines(lines: &[Line], move_no: i32, newline: bool, tab: bool, space: bool, out: &mut String) {
    let branches = to_grouped(to_ordered(to_mapped(lines)));
    let mut iter = branches.into_iter();
    if let Some(first) = iter.next() {
        write_branch(&first, move_no, newline, tab, space, out);
        for branch in iter {
            write_branch(&branch, move_no, true, true, false, out);
        }
    }
}

fn write_branch(branch: &Branch, move_no: i32, newline: bool, tab: bool, space: bool, out: &mut String) {
    let ((play, text), children) = branch;
    if *play == Play::Set {
        write_lines(children, move_no, newline, tab, space, out);
        return;
    }
    if newline {
        out.push('\n');
    }
    if tab {
        for _ in 0..(move_no - 1).max(0) {
            out.push('\t');
        }
    } else if space {
        out.push(' ');
    }
    match play {
        Play::Zugzwang | Play::Threat => {
            out.push('(');
            if *play == Play::Zugzwang {
                out.push_str("zz");
                write_lines(children, move_no + 1, true, true, false, out);
            } else {
                write_lines(children, move_no + 1, false, false, false, out);
            }
            out.push(')');
        }
        Play::Variation | Play::Refutation | Play::Help2nd | Play::Tempo2nd => {
            if tab {
                let _ = write!(out, "{move_no}...");
            }
            if *play == Play::Tempo2nd {
                out.push_str("??");
            } else {
                out.push_str(text);
                if *play == Play::Refutation {
                    out.push('!');
                }
            }
            write_lines(children, move_no + 1, false, false, true, out);
        }
        _ => {
            let _ = write!(out, "{move_no}.");
            if *play == Play::Tempo1st {
                out.push_str("??");
            } else {
                out.push_str(text);
                if *play == Play::Try {
                    out.push('?');
                } else if *play == Play::Key {
                    out.push('!');
                }
            }
            write_lines(children, move_no, false, false, true, out);
        }
    }
}

/// Sorts mate-search hits lexicographically by `(mate-length label, move
/// text)` and renders them as one tab-separated line each.
pub fn to_ordered_and_formatted(points: &[(String, String)]) -> String {
    let mut points = points.to_vec();
    points.sort();
    points
        .iter()
        .map(|(label, text)| format!("{label}\t{text}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(play: Play, text: &str) -> Line {
        let mut line = Line::new();
        line.push_back((play, text.to_string()));
        line
    }

    #[test]
    fn a_single_key_with_no_tries_formats_as_one_numbered_move() {
        let branches = vec![((Play::Key, "Qh5".to_string()), Vec::new())];
        let lines = to_flattened(&branches);
        assert_eq!(to_formatted(&lines), "1.Qh5!");
    }

    #[test]
    fn a_key_followed_by_a_refutation_indents_one_tab() {
        let mut key_line = Line::new();
        key_line.push_back((Play::Key, "Qh5".to_string()));
        key_line.push_back((Play::Refutation, "Kd7".to_string()));
        assert_eq!(to_formatted(&[key_line]), "1.Qh5!\n1...Kd7!");
    }

    #[test]
    fn two_tries_sort_before_the_key_by_play_order() {
        let try_line = leaf(Play::Try, "Qa5");
        let key_line = leaf(Play::Key, "Qh5");
        let out = to_formatted(&[try_line, key_line]);
        assert!(out.find("Qa5").unwrap() < out.find("Qh5").unwrap());
    }

    #[test]
    fn mate_search_hits_sort_by_label_then_move_text() {
        let points = vec![
            ("+M2".to_string(), "Qh5".to_string()),
            ("+M1".to_string(), "Qd8".to_string()),
        ];
        assert_eq!(to_ordered_and_formatted(&points), "+M1\tQd8\n+M2\tQh5");
    }
}
