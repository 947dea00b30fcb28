use serde::{Deserialize, Serialize};

use super::board::Board;
use super::types::GameResult;
use super::visitor::{NodeVisit, SearchVisitor};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchNode {
    pub id: String,
    pub board: Board,
    pub move_index: Option<usize>,
    pub depth: u32,
    pub is_maximizing: bool,
    pub score: i32,
    pub is_leaf: bool,
    pub game_result: GameResult,
    pub children: Vec<SearchNode>,
}

impl SearchNode {
    fn from_visit(node: &NodeVisit<'_>) -> Self {
        Self {
            id: node_id(node.depth, node.move_index, node.is_maximizing),
            board: *node.board,
            move_index: node.move_index,
            depth: node.depth,
            is_maximizing: node.is_maximizing,
            score: node.score,
            is_leaf: node.is_leaf,
            game_result: node.game_result,
            children: Vec::new(),
        }
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SearchNode::node_count).sum::<usize>()
    }

    pub fn max_depth(&self) -> u32 {
        self.children
            .iter()
            .map(SearchNode::max_depth)
            .max()
            .unwrap_or(self.depth)
    }
}

pub fn node_id(depth: u32, move_index: Option<usize>, is_maximizing: bool) -> String {
    let side = if is_maximizing { "max" } else { "min" };
    match move_index {
        Some(index) => format!("{}-{}-{}", depth, index, side),
        None => format!("{}-root-{}", depth, side),
    }
}

/// Materializes every visited node into an owned tree.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: Vec<SearchNode>,
    root: Option<SearchNode>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_tree(self) -> Option<SearchNode> {
        self.root
    }
}

impl SearchVisitor for TreeBuilder {
    fn enter_node(&mut self, node: &NodeVisit<'_>) {
        self.stack.push(SearchNode::from_visit(node));
    }

    fn leave_node(&mut self, score: i32) {
        let Some(mut node) = self.stack.pop() else {
            return;
        };
        node.score = score;
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root = Some(node),
        }
    }
}
