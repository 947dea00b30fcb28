use super::board::{Board, WIN_PATTERNS};
use super::types::Mark;

const TWO_IN_LINE_SCORE: i32 = 5;
const ONE_IN_LINE_SCORE: i32 = 1;

/// Static score used at the depth cutoff. Positive favours `max_mark`.
///
/// Each line still open for one side counts for that side: two marks and a gap
/// are worth 5, a single mark is worth 1. Lines holding both marks count for
/// nobody.
pub fn evaluate_position(board: &Board, max_mark: Mark) -> i32 {
    WIN_PATTERNS
        .iter()
        .map(|pattern| evaluate_line(board, pattern, max_mark))
        .sum()
}

fn evaluate_line(board: &Board, pattern: &[usize; 3], max_mark: Mark) -> i32 {
    let mut max_count = 0;
    let mut min_count = 0;

    for &index in pattern {
        match board.get(index) {
            Mark::Empty => {}
            m if m == max_mark => max_count += 1,
            _ => min_count += 1,
        }
    }

    match (max_count, min_count) {
        (2, 0) => TWO_IN_LINE_SCORE,
        (1, 0) => ONE_IN_LINE_SCORE,
        (0, 2) => -TWO_IN_LINE_SCORE,
        (0, 1) => -ONE_IN_LINE_SCORE,
        _ => 0,
    }
}
