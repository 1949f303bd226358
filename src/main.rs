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

//! Caissa's command line: reads a file argument (or standard input if none
//! is given), parses zero or more tasks, and solves each in turn.
//!
//! There are no flags beyond the optional path. A task that fails to parse
//! or validate is reported on standard error and does not prevent the
//! tasks around it from solving; an unhandled internal error is the only
//! thing that produces a non-zero exit.

use std::{
    env::args,
    fs,
    io::{self, Read as _},
    process::ExitCode,
};

use caissa::{
    error::SolveError,
    problem::{self, Solution},
};

const BANNER: &str = "Caissa, a chess problem solver";

fn main() -> ExitCode {
    println!("{BANNER}");

    let input = match read_input() {
        Ok(input) => input,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let tasks = caissa::parser::parse_tasks(&input);
    let mut had_error = false;
    let mut had_internal_error = false;

    for (index, task) in tasks.into_iter().enumerate() {
        let mut task = match task {
            Ok(task) => task,
            Err(e) => {
                had_error = true;
                if matches!(e, SolveError::Internal(_)) {
                    had_internal_error = true;
                }
                eprintln!("task {}: {e}", index + 1);
                continue;
            }
        };

        let solution = problem::solve(&mut task.position, task.stipulation, &task.analysis, &task.display);
        match solution {
            Solution::Text(text) => println!("{text}"),
            Solution::IllegalPosition => println!("Illegal position."),
        }
    }

    if had_internal_error {
        ExitCode::FAILURE
    } else if had_error {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

/// Reads the whole of the file named by the first command-line argument, or
/// standard input if no argument was given.
fn read_input() -> io::Result<String> {
    match args().nth(1) {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut input = String::new();
            io::stdin().lock().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}
