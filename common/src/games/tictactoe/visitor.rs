use serde::{Deserialize, Serialize};

use super::board::Board;
use super::types::GameResult;

/// What the searcher knows about a node when it first reaches it.
#[derive(Debug, Clone, Copy)]
pub struct NodeVisit<'a> {
    pub board: &'a Board,
    pub move_index: Option<usize>,
    pub depth: u32,
    pub is_maximizing: bool,
    pub is_leaf: bool,
    pub game_result: GameResult,
    /// Final score for leaves, the running-best placeholder otherwise.
    pub score: i32,
}

/// Hooks invoked around every node the searcher recurses into.
///
/// `enter_node` and `leave_node` calls are balanced and nest like the
/// recursion itself, so a visitor can keep a stack. Pruned siblings are
/// never entered.
pub trait SearchVisitor {
    fn enter_node(&mut self, _node: &NodeVisit<'_>) {}

    fn leave_node(&mut self, _score: i32) {}
}

impl SearchVisitor for () {}

impl<V: SearchVisitor + ?Sized> SearchVisitor for &mut V {
    fn enter_node(&mut self, node: &NodeVisit<'_>) {
        (**self).enter_node(node);
    }

    fn leave_node(&mut self, score: i32) {
        (**self).leave_node(score);
    }
}

impl<A: SearchVisitor, B: SearchVisitor> SearchVisitor for (A, B) {
    fn enter_node(&mut self, node: &NodeVisit<'_>) {
        self.0.enter_node(node);
        self.1.enter_node(node);
    }

    fn leave_node(&mut self, score: i32) {
        self.0.leave_node(score);
        self.1.leave_node(score);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub nodes_evaluated: u64,
    pub max_depth: u32,
}

impl SearchStats {
    pub fn merge(&mut self, other: SearchStats) {
        self.nodes_evaluated += other.nodes_evaluated;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

impl SearchVisitor for SearchStats {
    fn enter_node(&mut self, node: &NodeVisit<'_>) {
        self.nodes_evaluated += 1;
        self.max_depth = self.max_depth.max(node.depth);
    }
}
