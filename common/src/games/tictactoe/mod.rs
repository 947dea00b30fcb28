mod board;
mod bot_controller;
mod evaluator;
mod game_state;
mod minimax;
mod move_scan;
mod search_tree;
mod thinking;
mod types;
mod visitor;
mod win_detector;

pub use board::{BOARD_SIZE, Board, CELL_COUNT, WIN_PATTERNS};
pub use bot_controller::{BotType, calculate_minimax_move, calculate_move};
pub use evaluator::evaluate_position;
pub use game_state::{AI_MARK, HUMAN_MARK, TicTacToeGameState};
pub use minimax::{
    DEFAULT_DEPTH_LIMIT, MinimaxResult, NEG_INFINITY, POS_INFINITY, SearchOutcome, SearchSettings,
    Searcher, WIN_SCORE, find_best_move, minimax,
};
pub use move_scan::evaluate_all_moves;
pub use search_tree::{SearchNode, TreeBuilder, node_id};
pub use thinking::{AiThinking, Analysis, READY_MESSAGE, THINKING_MESSAGE, analyze_position};
pub use types::{GameResult, GameStatus, Mark, WinningLine};
pub use visitor::{NodeVisit, SearchStats, SearchVisitor};
pub use win_detector::{check_winner, check_winner_with_line, is_draw, is_game_complete};
