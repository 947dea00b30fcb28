use crate::log;
use super::board::{Board, CELL_COUNT};
use super::minimax::SearchSettings;
use super::thinking::{AiThinking, analyze_position};
use super::types::{GameStatus, Mark, WinningLine};
use super::win_detector::check_winner_with_line;

pub const HUMAN_MARK: Mark = Mark::X;
pub const AI_MARK: Mark = Mark::O;

/// One running match between the human (X, moves first) and the AI (O).
///
/// Scores survive `reset` and are cleared by `new_game`.
#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    pub board: Board,
    pub current_mark: Mark,
    pub status: GameStatus,
    pub winning_line: Option<WinningLine>,
    pub player_score: u32,
    pub ai_score: u32,
    pub is_ai_thinking: bool,
    pub ai_thinking: AiThinking,
    pub last_move: Option<usize>,
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToeGameState {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_mark: HUMAN_MARK,
            status: GameStatus::InProgress,
            winning_line: None,
            player_score: 0,
            ai_score: 0,
            is_ai_thinking: false,
            ai_thinking: AiThinking::ready(),
            last_move: None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    pub fn winner(&self) -> Option<Mark> {
        match self.status {
            GameStatus::XWon => Some(Mark::X),
            GameStatus::OWon => Some(Mark::O),
            _ => None,
        }
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.is_game_over() && self.current_mark == AI_MARK
    }

    /// Human move. A rejected move leaves the state untouched.
    pub fn place_mark(&mut self, index: usize) -> Result<(), String> {
        if self.is_game_over() {
            return Err("Game is already over".to_string());
        }
        if self.is_ai_thinking || self.current_mark != HUMAN_MARK {
            return Err("Not your turn".to_string());
        }
        if index >= CELL_COUNT {
            return Err(format!("Position {} is out of bounds", index + 1));
        }
        if !self.board.is_empty_at(index) {
            return Err(format!("Position {} is already marked", index + 1));
        }

        self.apply_move(index, HUMAN_MARK);
        Ok(())
    }

    /// Enters the thinking state. Returns false when the AI has nothing to do.
    pub fn begin_ai_turn(&mut self) -> bool {
        if !self.is_ai_turn() {
            return false;
        }
        self.is_ai_thinking = true;
        self.ai_thinking = AiThinking::thinking();
        true
    }

    /// Runs the search on a snapshot of the board and plays the chosen move.
    pub fn finish_ai_turn(&mut self, depth_limit: u32, build_tree: bool) -> Option<usize> {
        if !self.is_ai_turn() {
            self.is_ai_thinking = false;
            return None;
        }

        let settings = SearchSettings::new(AI_MARK, depth_limit);
        let analysis = analyze_position(&self.board, &settings, build_tree);
        self.ai_thinking = analysis.thinking;
        self.is_ai_thinking = false;

        let Some(index) = analysis.best_move else {
            log!("AI found no move on board {}", self.board);
            return None;
        };

        self.apply_move(index, AI_MARK);
        Some(index)
    }

    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current_mark = HUMAN_MARK;
        self.status = GameStatus::InProgress;
        self.winning_line = None;
        self.is_ai_thinking = false;
        self.ai_thinking = AiThinking::ready();
        self.last_move = None;
    }

    pub fn new_game(&mut self) {
        self.reset();
        self.player_score = 0;
        self.ai_score = 0;
    }

    fn apply_move(&mut self, index: usize, mark: Mark) {
        self.board.set(index, mark);
        self.last_move = Some(index);

        if let Some(line) = check_winner_with_line(&self.board) {
            self.winning_line = Some(line);
            self.status = match line.mark {
                Mark::X => GameStatus::XWon,
                _ => GameStatus::OWon,
            };
            if line.mark == HUMAN_MARK {
                self.player_score += 1;
            } else {
                self.ai_score += 1;
            }
            return;
        }

        if self.board.is_full() {
            self.status = GameStatus::Draw;
            return;
        }

        self.current_mark = if mark == HUMAN_MARK { AI_MARK } else { HUMAN_MARK };
    }

    #[cfg(test)]
    fn set_board(&mut self, board: Board) {
        self.board = board;
        self.current_mark = board.side_to_move();
    }
}
