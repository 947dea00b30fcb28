use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use super::board::Board;
use super::minimax::{SearchSettings, find_best_move};
use super::types::Mark;
use super::win_detector::is_game_complete;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotType {
    Random,
    Minimax,
}

pub fn calculate_move(
    bot_type: BotType,
    board: &Board,
    mark: Mark,
    depth_limit: u32,
    rng: &mut SessionRng,
) -> Option<usize> {
    if mark == Mark::Empty || is_game_complete(board) {
        return None;
    }
    match bot_type {
        BotType::Random => calculate_random_move(board, rng),
        BotType::Minimax => calculate_minimax_move(board, mark, depth_limit),
    }
}

fn calculate_random_move(board: &Board, rng: &mut SessionRng) -> Option<usize> {
    rng.choose(&board.available_moves())
}

pub fn calculate_minimax_move(board: &Board, mark: Mark, depth_limit: u32) -> Option<usize> {
    let settings = SearchSettings::new(mark, depth_limit);
    find_best_move(board, &settings, false).best_move
}
