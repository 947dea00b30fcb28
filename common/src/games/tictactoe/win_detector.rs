use super::board::{Board, WIN_PATTERNS};
use super::types::{Mark, WinningLine};

pub fn check_winner(board: &Board) -> Option<Mark> {
    check_winner_with_line(board).map(|line| line.mark)
}

/// First completed line in pattern order: rows, then columns, then diagonals.
pub fn check_winner_with_line(board: &Board) -> Option<WinningLine> {
    for pattern in WIN_PATTERNS {
        let [a, b, c] = pattern;
        let mark = board.get(a);
        if mark != Mark::Empty && mark == board.get(b) && mark == board.get(c) {
            return Some(WinningLine::new(mark, pattern));
        }
    }
    None
}

pub fn is_draw(board: &Board) -> bool {
    board.is_full() && check_winner(board).is_none()
}

pub fn is_game_complete(board: &Board) -> bool {
    check_winner(board).is_some() || board.is_full()
}
