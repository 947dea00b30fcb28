use super::board::{Board, CELL_COUNT};
use super::evaluator::evaluate_position;
use super::search_tree::{SearchNode, TreeBuilder};
use super::types::{GameResult, Mark};
use super::visitor::{NodeVisit, SearchStats, SearchVisitor};
use super::win_detector::check_winner;

pub const DEFAULT_DEPTH_LIMIT: u32 = 2;
pub const WIN_SCORE: i32 = 10;

pub const NEG_INFINITY: i32 = i32::MIN;
pub const POS_INFINITY: i32 = i32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub max_mark: Mark,
    /// Ply at which the heuristic replaces further search.
    pub depth_limit: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_mark: Mark::O,
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }
}

impl SearchSettings {
    pub fn new(max_mark: Mark, depth_limit: u32) -> Self {
        Self {
            max_mark,
            depth_limit,
        }
    }

    /// `None` when `max_mark` is `Empty`.
    pub fn min_mark(&self) -> Option<Mark> {
        self.max_mark.opponent()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimaxResult {
    pub score: i32,
    /// `None` when the position is a leaf.
    pub best_move: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub score: i32,
    pub best_move: Option<usize>,
    pub tree: Option<SearchNode>,
    pub stats: SearchStats,
}

/// Depth-limited minimax with alpha-beta pruning.
///
/// The board is used as a scratchpad: every move is placed, searched and
/// removed again, so it is unchanged when `search` returns.
pub struct Searcher<V> {
    settings: SearchSettings,
    visitor: V,
}

impl<V: SearchVisitor> Searcher<V> {
    pub fn new(settings: SearchSettings, visitor: V) -> Self {
        Self { settings, visitor }
    }

    pub fn into_visitor(self) -> V {
        self.visitor
    }

    pub fn search(
        &mut self,
        board: &mut Board,
        depth: u32,
        is_maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        move_index: Option<usize>,
    ) -> MinimaxResult {
        // An empty max mark has no side to play; nothing is visited.
        let Some(min_mark) = self.settings.min_mark() else {
            return MinimaxResult {
                score: 0,
                best_move: None,
            };
        };

        let terminal = self.terminal_score(board, depth);
        let (score, game_result) = terminal.unwrap_or((
            if is_maximizing { NEG_INFINITY } else { POS_INFINITY },
            GameResult::Ongoing,
        ));

        self.visitor.enter_node(&NodeVisit {
            board,
            move_index,
            depth,
            is_maximizing,
            is_leaf: terminal.is_some(),
            game_result,
            score,
        });

        if terminal.is_some() {
            self.visitor.leave_node(score);
            return MinimaxResult {
                score,
                best_move: None,
            };
        }

        let mover = if is_maximizing {
            self.settings.max_mark
        } else {
            min_mark
        };

        let mut best_score = score;
        let mut best_move = None;

        for index in 0..CELL_COUNT {
            if !board.is_empty_at(index) {
                continue;
            }

            board.set(index, mover);
            let child = self.search(board, depth + 1, !is_maximizing, alpha, beta, Some(index));
            board.clear(index);

            if is_maximizing {
                if child.score > best_score {
                    best_score = child.score;
                    best_move = Some(index);
                }
                alpha = alpha.max(child.score);
            } else {
                if child.score < best_score {
                    best_score = child.score;
                    best_move = Some(index);
                }
                beta = beta.min(child.score);
            }

            if beta <= alpha {
                break;
            }
        }

        self.visitor.leave_node(best_score);
        MinimaxResult {
            score: best_score,
            best_move,
        }
    }

    /// Win, then full board, then depth cutoff.
    fn terminal_score(&self, board: &Board, depth: u32) -> Option<(i32, GameResult)> {
        let depth_score = depth as i32;
        match check_winner(board) {
            Some(mark) if mark == self.settings.max_mark => {
                Some((WIN_SCORE - depth_score, GameResult::Win))
            }
            Some(_) => Some((depth_score - WIN_SCORE, GameResult::Lose)),
            None if board.is_full() => Some((0, GameResult::Draw)),
            None if depth >= self.settings.depth_limit => Some((
                evaluate_position(board, self.settings.max_mark),
                GameResult::Ongoing,
            )),
            None => None,
        }
    }
}

pub fn minimax(
    board: &mut Board,
    depth: u32,
    is_maximizing: bool,
    alpha: i32,
    beta: i32,
    move_index: Option<usize>,
    settings: &SearchSettings,
) -> MinimaxResult {
    Searcher::new(*settings, ()).search(board, depth, is_maximizing, alpha, beta, move_index)
}

/// Searches a copy of `board` with the maximizing player to move.
pub fn find_best_move(board: &Board, settings: &SearchSettings, build_tree: bool) -> SearchOutcome {
    let mut scratch = *board;

    if build_tree {
        let mut searcher = Searcher::new(*settings, (SearchStats::default(), TreeBuilder::new()));
        let result = searcher.search(&mut scratch, 0, true, NEG_INFINITY, POS_INFINITY, None);
        let (stats, builder) = searcher.into_visitor();
        SearchOutcome {
            score: result.score,
            best_move: result.best_move,
            tree: builder.into_tree(),
            stats,
        }
    } else {
        let mut searcher = Searcher::new(*settings, SearchStats::default());
        let result = searcher.search(&mut scratch, 0, true, NEG_INFINITY, POS_INFINITY, None);
        SearchOutcome {
            score: result.score,
            best_move: result.best_move,
            tree: None,
            stats: searcher.into_visitor(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::win_detector::is_game_complete;
    use std::collections::HashSet;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn search_side_to_move(board: &Board, settings: &SearchSettings, pruned: bool) -> (i32, Option<usize>) {
        let mut scratch = *board;
        let is_maximizing = board.side_to_move() == settings.max_mark;
        if pruned {
            let result = minimax(&mut scratch, 0, is_maximizing, NEG_INFINITY, POS_INFINITY, None, settings);
            assert_eq!(scratch, *board);
            (result.score, result.best_move)
        } else {
            plain_minimax(&mut scratch, 0, is_maximizing, settings)
        }
    }

    fn plain_minimax(board: &mut Board, depth: u32, is_maximizing: bool, settings: &SearchSettings) -> (i32, Option<usize>) {
        if let Some(winner) = check_winner(board) {
            let score = if winner == settings.max_mark {
                WIN_SCORE - depth as i32
            } else {
                depth as i32 - WIN_SCORE
            };
            return (score, None);
        }
        if board.is_full() {
            return (0, None);
        }
        if depth >= settings.depth_limit {
            return (evaluate_position(board, settings.max_mark), None);
        }

        let mover = if is_maximizing { settings.max_mark } else { settings.min_mark().unwrap() };
        let mut best: Option<(i32, usize)> = None;
        for index in board.available_moves() {
            board.set(index, mover);
            let (score, _) = plain_minimax(board, depth + 1, !is_maximizing, settings);
            board.clear(index);
            let improves = match best {
                None => true,
                Some((best_score, _)) if is_maximizing => score > best_score,
                Some((best_score, _)) => score < best_score,
            };
            if improves {
                best = Some((score, index));
            }
        }
        let (score, index) = best.unwrap();
        (score, Some(index))
    }

    fn reachable_positions() -> Vec<Board> {
        let mut seen = HashSet::new();
        let mut stack = vec![Board::new()];
        while let Some(position) = stack.pop() {
            if !seen.insert(position) || is_game_complete(&position) {
                continue;
            }
            let mover = position.side_to_move();
            for index in position.available_moves() {
                let mut next = position;
                next.set(index, mover);
                stack.push(next);
            }
        }
        seen.into_iter().filter(|b| !is_game_complete(b)).collect()
    }

    #[test]
    fn test_completes_own_line() {
        let outcome = find_best_move(&board("OO./XX./..."), &SearchSettings::default(), false);
        assert_eq!(outcome.best_move, Some(2));
        assert_eq!(outcome.score, WIN_SCORE - 1);
    }

    #[test]
    fn test_blocks_opponent_line() {
        let outcome = find_best_move(&board("XX./.O./..."), &SearchSettings::default(), false);
        assert_eq!(outcome.best_move, Some(2));
    }

    #[test]
    fn test_empty_board_at_default_depth_takes_center() {
        let outcome = find_best_move(&Board::new(), &SearchSettings::default(), false);
        assert_eq!(outcome.best_move, Some(4));
        assert_eq!(outcome.score, 1);
        assert_eq!(outcome.stats.max_depth, DEFAULT_DEPTH_LIMIT);
    }

    #[test]
    fn test_empty_board_at_full_depth_is_draw() {
        let settings = SearchSettings::new(Mark::O, CELL_COUNT as u32);
        let outcome = find_best_move(&Board::new(), &settings, false);
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.best_move, Some(0));
    }

    #[test]
    fn test_last_cell_forced_draw() {
        let b = board("XOX/XOO/OX.");
        let outcome = find_best_move(&b, &SearchSettings::default(), false);
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.best_move, Some(8));

        let mut scratch = b;
        let result = minimax(&mut scratch, 0, false, NEG_INFINITY, POS_INFINITY, None, &SearchSettings::default());
        assert_eq!(result, MinimaxResult { score: 0, best_move: Some(8) });
    }

    #[test]
    fn test_finished_board_has_no_move() {
        let won = board("XXX/OO./...");
        let outcome = find_best_move(&won, &SearchSettings::default(), true);
        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.score, -WIN_SCORE);
        let root = outcome.tree.unwrap();
        assert!(root.is_leaf);
        assert_eq!(root.game_result, GameResult::Lose);

        let drawn = board("XOX/XOO/OXX");
        let outcome = find_best_move(&drawn, &SearchSettings::default(), false);
        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn test_faster_win_preferred() {
        // the immediate win at 2 outranks every slower winning line
        let settings = SearchSettings::new(Mark::O, CELL_COUNT as u32);
        let outcome = find_best_move(&board("OO./XX./X.."), &settings, false);
        assert_eq!(outcome.best_move, Some(2));
        assert_eq!(outcome.score, WIN_SCORE - 1);
    }

    #[test]
    fn test_settings_for_x_maximizing() {
        let settings = SearchSettings::new(Mark::X, DEFAULT_DEPTH_LIMIT);
        let outcome = find_best_move(&board("OO./XX./..."), &settings, false);
        assert_eq!(outcome.best_move, Some(5));
        assert_eq!(outcome.score, WIN_SCORE - 1);
    }

    #[test]
    fn test_empty_max_mark_searches_nothing() {
        let settings = SearchSettings::new(Mark::Empty, DEFAULT_DEPTH_LIMIT);
        assert_eq!(settings.min_mark(), None);
        let outcome = find_best_move(&Board::new(), &settings, true);
        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.stats.nodes_evaluated, 0);
        assert!(outcome.tree.is_none());
    }

    #[test]
    fn test_min_mark_is_opponent() {
        assert_eq!(SearchSettings::new(Mark::O, 2).min_mark(), Some(Mark::X));
        assert_eq!(SearchSettings::new(Mark::X, 2).min_mark(), Some(Mark::O));
    }

    #[test]
    fn test_best_move_is_always_empty_cell() {
        let settings = SearchSettings::default();
        for position in reachable_positions() {
            let (_, best_move) = search_side_to_move(&position, &settings, true);
            let index = best_move.expect("non-terminal board must have a move");
            assert!(position.is_empty_at(index), "{} -> {}", position, index);
        }
    }

    #[test]
    fn test_alpha_beta_matches_plain_minimax_at_default_depth() {
        let settings = SearchSettings::default();
        for position in reachable_positions() {
            assert_eq!(
                search_side_to_move(&position, &settings, true),
                search_side_to_move(&position, &settings, false),
                "position {}",
                position
            );
        }
    }

    #[test]
    fn test_alpha_beta_matches_plain_minimax_at_full_depth() {
        let settings = SearchSettings::new(Mark::O, CELL_COUNT as u32);
        for position in reachable_positions().into_iter().filter(|b| b.filled_count() >= 2) {
            assert_eq!(
                search_side_to_move(&position, &settings, true),
                search_side_to_move(&position, &settings, false),
                "position {}",
                position
            );
        }
    }

    #[test]
    fn test_tree_mirrors_visited_nodes() {
        let outcome = find_best_move(&Board::new(), &SearchSettings::default(), true);
        let root = outcome.tree.as_ref().unwrap();

        assert_eq!(root.id, "0-root-max");
        assert_eq!(root.move_index, None);
        assert_eq!(root.score, outcome.score);
        assert_eq!(root.node_count() as u64, outcome.stats.nodes_evaluated);
        assert_eq!(root.max_depth(), outcome.stats.max_depth);
        // 1 + 9 + 72 without pruning
        assert!(root.node_count() < 82);

        let moves: Vec<_> = root.children.iter().map(|c| c.move_index.unwrap()).collect();
        assert_eq!(moves, (0..9).collect::<Vec<_>>());
        for child in &root.children {
            assert!(!child.is_maximizing);
            assert_eq!(child.board.count(Mark::O), 1);
            for grandchild in &child.children {
                assert!(grandchild.is_leaf);
                assert_eq!(grandchild.game_result, GameResult::Ongoing);
                assert_eq!(grandchild.depth, 2);
            }
        }
    }

    #[test]
    fn test_tree_flag_does_not_change_result() {
        for s in ["OO./XX./...", "X../.O./...", "X../.../..O"] {
            let b = board(s);
            let with_tree = find_best_move(&b, &SearchSettings::default(), true);
            let without_tree = find_best_move(&b, &SearchSettings::default(), false);
            assert_eq!(with_tree.score, without_tree.score);
            assert_eq!(with_tree.best_move, without_tree.best_move);
            assert_eq!(with_tree.stats, without_tree.stats);
            assert!(without_tree.tree.is_none());
        }
    }
}
