use serde::{Deserialize, Serialize};

use super::board::{Board, CELL_COUNT};
use super::minimax::{SearchSettings, find_best_move};
use super::move_scan::evaluate_all_moves;
use super::search_tree::SearchNode;

pub const READY_MESSAGE: &str = "Ready to play!";
pub const THINKING_MESSAGE: &str = "AI is thinking...";

/// What the AI worked out on its last turn, rebuilt from scratch every turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiThinking {
    pub depth: u32,
    pub nodes_evaluated: u64,
    pub best_score: i32,
    pub evaluations: [Option<i32>; CELL_COUNT],
    pub thinking_log: Vec<String>,
    pub search_tree: Option<SearchNode>,
}

impl Default for AiThinking {
    fn default() -> Self {
        Self::ready()
    }
}

impl AiThinking {
    fn with_message(message: &str) -> Self {
        Self {
            depth: 0,
            nodes_evaluated: 0,
            best_score: 0,
            evaluations: [None; CELL_COUNT],
            thinking_log: vec![message.to_string()],
            search_tree: None,
        }
    }

    pub fn ready() -> Self {
        Self::with_message(READY_MESSAGE)
    }

    pub fn thinking() -> Self {
        Self::with_message(THINKING_MESSAGE)
    }

    pub fn to_yaml(&self) -> Result<String, String> {
        serde_yaml_ng::to_string(self).map_err(|e| format!("Failed to serialize AI thinking: {}", e))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub best_move: Option<usize>,
    pub thinking: AiThinking,
}

pub fn analyze_position(board: &Board, settings: &SearchSettings, build_tree: bool) -> Analysis {
    let (evaluations, mut stats) = evaluate_all_moves(board, settings);
    let outcome = find_best_move(board, settings, build_tree);
    stats.merge(outcome.stats);

    let mut thinking_log = vec![
        THINKING_MESSAGE.to_string(),
        format!("Evaluated {} nodes", stats.nodes_evaluated),
    ];
    match outcome.best_move {
        Some(index) => thinking_log.push(format!("Best move: position {}", index + 1)),
        None => thinking_log.push("No move available".to_string()),
    }
    thinking_log.push(format!("Expected score: {}", outcome.score));
    thinking_log.push("Analysis complete".to_string());

    Analysis {
        best_move: outcome.best_move,
        thinking: AiThinking {
            depth: stats.max_depth,
            nodes_evaluated: stats.nodes_evaluated,
            best_score: outcome.score,
            evaluations,
            thinking_log,
            search_tree: outcome.tree,
        },
    }
}
