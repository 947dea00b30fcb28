use super::board::{Board, CELL_COUNT};
use super::minimax::{NEG_INFINITY, POS_INFINITY, SearchSettings, Searcher};
use super::visitor::SearchStats;

/// Score of every empty cell if the maximizing player moved there next.
/// Occupied cells are `None`. Display only; the move itself comes from
/// `find_best_move`.
pub fn evaluate_all_moves(
    board: &Board,
    settings: &SearchSettings,
) -> ([Option<i32>; CELL_COUNT], SearchStats) {
    let mut evaluations = [None; CELL_COUNT];
    let mut scratch = *board;
    let mut searcher = Searcher::new(*settings, SearchStats::default());

    for (index, evaluation) in evaluations.iter_mut().enumerate() {
        if !scratch.is_empty_at(index) {
            continue;
        }
        scratch.set(index, settings.max_mark);
        let result = searcher.search(&mut scratch, 0, false, NEG_INFINITY, POS_INFINITY, Some(index));
        scratch.clear(index);
        *evaluation = Some(result.score);
    }

    (evaluations, searcher.into_visitor())
}
