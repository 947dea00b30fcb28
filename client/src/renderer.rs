use std::fmt::Write;

use common::games::tictactoe::{
    AI_MARK, AiThinking, BOARD_SIZE, Board, GameStatus, HUMAN_MARK, Mark, NEG_INFINITY,
    POS_INFINITY, SearchNode, TicTacToeGameState, WinningLine,
};

use crate::config::DisplayConfig;
use crate::history::EventHistory;

const ROW_SEPARATOR: &str = "---+---+---";

pub fn render_board(board: &Board, winning_line: Option<&WinningLine>) -> String {
    let mut out = String::new();
    for row in 0..BOARD_SIZE {
        if row > 0 {
            out.push_str(ROW_SEPARATOR);
            out.push('\n');
        }
        let cells: Vec<String> = (0..BOARD_SIZE)
            .map(|col| {
                let index = row * BOARD_SIZE + col;
                let text = match board.get(index) {
                    Mark::Empty => (index + 1).to_string(),
                    mark => mark.symbol().to_string(),
                };
                if winning_line.is_some_and(|line| line.contains(index)) {
                    format!("({})", text)
                } else {
                    format!(" {} ", text)
                }
            })
            .collect();
        out.push_str(&cells.join("|"));
        out.push('\n');
    }
    out
}

pub fn format_score(score: i32) -> String {
    match score {
        POS_INFINITY => "∞".to_string(),
        NEG_INFINITY => "-∞".to_string(),
        s => s.to_string(),
    }
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

pub fn render_status(state: &TicTacToeGameState) -> String {
    match state.status {
        GameStatus::XWon => "You win!".to_string(),
        GameStatus::OWon => "AI wins!".to_string(),
        GameStatus::Draw => "It's a draw!".to_string(),
        GameStatus::InProgress if state.is_ai_thinking => "AI is thinking...".to_string(),
        GameStatus::InProgress if state.current_mark == HUMAN_MARK => "Your turn!".to_string(),
        GameStatus::InProgress => "AI turn!".to_string(),
    }
}

pub fn render_evaluations(evaluations: &[Option<i32>]) -> String {
    let mut out = String::new();
    for row in evaluations.chunks(BOARD_SIZE) {
        let cells: Vec<String> = row
            .iter()
            .map(|evaluation| match evaluation {
                Some(score) => format!("{:>4}", format_score(*score)),
                None => format!("{:>4}", "-"),
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join(" "));
    }
    out
}

pub fn render_thinking(thinking: &AiThinking) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== AI thinking ==");
    let _ = writeln!(
        out,
        "Depth: {}   Nodes evaluated: {}   Best score: {:+}",
        thinking.depth,
        group_thousands(thinking.nodes_evaluated),
        thinking.best_score
    );
    let _ = writeln!(out, "Move evaluations:");
    out.push_str(&render_evaluations(&thinking.evaluations));
    let _ = writeln!(out, "Log:");
    for line in &thinking.thinking_log {
        let _ = writeln!(out, "  {}", line);
    }
    out
}

/// Nodes deeper than `expanded_levels` below the root are collapsed into a
/// child count, like the first two levels being open by default.
pub fn render_tree(root: &SearchNode, expanded_levels: u32) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Search tree ({} nodes) ==", root.node_count());
    write_node(&mut out, root, 0, expanded_levels, true);
    out
}

fn write_node(out: &mut String, node: &SearchNode, level: u32, expanded_levels: u32, is_root: bool) {
    let indent = "  ".repeat(level as usize);
    let label = if is_root {
        "ROOT".to_string()
    } else if node.is_maximizing {
        AI_MARK.symbol().to_string()
    } else {
        HUMAN_MARK.symbol().to_string()
    };
    let move_text = node
        .move_index
        .map(|index| format!("move {}", index + 1))
        .unwrap_or_default();
    let expanded = level < expanded_levels;

    let _ = write!(
        out,
        "{}{:<4} {:<7} score {:>3}  {}",
        indent,
        label,
        move_text,
        format_score(node.score),
        node.board
    );
    if node.is_leaf {
        let _ = write!(out, "  {}", node.game_result);
    }
    if !node.children.is_empty() {
        let marker = if expanded { '▼' } else { '▶' };
        let _ = write!(out, "  {} ({})", marker, node.child_count());
    }
    out.push('\n');

    if expanded {
        for child in &node.children {
            write_node(out, child, level + 1, expanded_levels, false);
        }
    }
}

pub fn render_history(history: &EventHistory) -> String {
    let mut out = String::new();
    if history.is_empty() {
        return out;
    }
    let _ = writeln!(out, "== Events ({}) ==", history.len());
    for entry in history.iter() {
        let _ = writeln!(out, "  {}", entry);
    }
    out
}

pub fn render_screen(state: &TicTacToeGameState, display: &DisplayConfig, history: &EventHistory) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n========== Tic Tac Toe ==========");
    let _ = writeln!(
        out,
        "You ({}): {}   AI ({}): {}",
        HUMAN_MARK.symbol(),
        state.player_score,
        AI_MARK.symbol(),
        state.ai_score
    );
    out.push('\n');
    out.push_str(&render_board(&state.board, state.winning_line.as_ref()));
    let _ = writeln!(out, "\n{}\n", render_status(state));
    out.push_str(&render_thinking(&state.ai_thinking));
    if display.show_tree
        && let Some(tree) = &state.ai_thinking.search_tree
    {
        out.push('\n');
        out.push_str(&render_tree(tree, display.tree_display_levels));
    }
    let events = render_history(history);
    if !events.is_empty() {
        out.push('\n');
        out.push_str(&events);
    }
    out
}
