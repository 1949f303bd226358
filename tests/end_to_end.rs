//! End-to-end scenarios from the specification: feed a whole task through
//! [`caissa::parser::parse_tasks`] and check the shape of the rendered
//! solution, the way a user driving the CLI would see it.

use caissa::{parser::parse_tasks, problem::Solution};

fn solve_one(input: &str) -> Solution {
    let mut tasks = parse_tasks(input);
    assert_eq!(tasks.len(), 1, "expected exactly one task from: {input:?}");
    let mut task = tasks.remove(0).unwrap_or_else(|e| panic!("task failed to parse: {e}"));
    caissa::problem::solve(&mut task.position, task.stipulation, &task.analysis, &task.display)
}

fn text(solution: Solution) -> String {
    match solution {
        Solution::Text(text) => text,
        Solution::IllegalPosition => panic!("expected a solution, got an illegal position"),
    }
}

/// A lone king facing a king and pawn: only the two non-adjacent-to-king
/// squares are legal, so perft at depth 0 (one ply) counts 2.
#[test]
fn perft_one_ply_king_and_pawn_ending() {
    let solution = solve_one("8/8/8/8/8/3k4/3p4/3K4 w - - acd 1;");
    assert_eq!(text(solution), "2");
}

/// A textbook queen-and-king two-mover: at least one first move is
/// annotated as a key (`1.` ... `!`), forcing mate within two moves.
#[test]
fn directmate_two_mover_has_a_key_forcing_mate() {
    let solution = text(solve_one(
        "BeginProblem Stipulation #2 Pieces White Ke1 Qh5 Black Ke8 EndProblem",
    ));
    let key_lines: Vec<&str> = solution.lines().filter(|l| l.contains('!') && l.trim_start().starts_with("1.")).collect();
    assert!(!key_lines.is_empty(), "expected at least one key line, solution was:\n{solution}");
    assert!(solution.contains('#'), "solution has no mating line:\n{solution}");
}

/// The same back-rank mate as above, but with a black bishop sitting on
/// the mating square: the key move captures it, and under Circe that
/// capture must show the bishop's rebirth fragment in parentheses.
#[test]
fn circe_capture_shows_rebirth_notation() {
    let solution = text(solve_one(
        "BeginProblem Condition Circe Stipulation #1 Pieces White Kg6 Ra1 Black Kh8 Ba8 EndProblem",
    ));
    assert!(solution.contains('#'), "expected a mating line in:\n{solution}");
    assert!(
        solution.contains('(') && solution.contains(')'),
        "expected a Circe rebirth fragment in:\n{solution}"
    );
}

/// `Option WhiteToPlay` on a helpmate hands white the move (rather than
/// black, the default), so a one-move helpmate with `WhiteToPlay` reduces
/// to "white to move and mate at once" — the textbook rook lift again.
#[test]
fn helpmate_white_to_play_hands_white_the_move() {
    let mut tasks = parse_tasks("BeginProblem Stipulation h#1 Option WhiteToPlay Pieces White Kg6 Ra1 Black Kh8 EndProblem");
    assert_eq!(tasks.len(), 1);
    let mut task = tasks.remove(0).unwrap();
    assert!(matches!(
        task.stipulation,
        caissa::problem::Stipulation::Helpmate { half_move: true, .. }
    ));
    assert!(!task.position.black_to_move(), "WhiteToPlay should leave white on move first");
    let solution = text(caissa::problem::solve(&mut task.position, task.stipulation, &task.analysis, &task.display));
    assert!(solution.contains('#'), "solution was:\n{solution}");
}

/// The textbook rook-and-king back-rank mate, fed through the EPD `dm`
/// opcode: the only legal first move that mates in one is reported with a
/// `+M1` annotation.
#[test]
fn mate_search_finds_the_back_rank_mate_in_one() {
    let solution = text(solve_one("7k/8/6K1/8/8/8/8/R7 w - - dm 1;"));
    assert!(solution.contains("+M1"), "solution was:\n{solution}");
    assert!(solution.contains('#'), "solution was:\n{solution}");
}

/// The standard starting position at perft depth 4: the well-known
/// 197,281-node count.
#[test]
fn perft_depth_four_from_startpos() {
    let solution = solve_one("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - acd 4;");
    assert_eq!(text(solution), "197281");
}

/// A bad task does not take down the tasks around it: the middle task in a
/// three-task block fails to parse, but the first and last still solve.
#[test]
fn one_bad_task_does_not_abort_the_rest() {
    let input = "7k/8/6K1/8/8/8/8/R7 w - - acd 1;\nnot a valid line at all\nrnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - acd 1;";
    let tasks = parse_tasks(input);
    assert_eq!(tasks.len(), 3);
    assert!(tasks[0].is_ok());
    assert!(tasks[1].is_err());
    assert!(tasks[2].is_ok());
}
