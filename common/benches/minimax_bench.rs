use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use common::games::tictactoe::{
    Board, CELL_COUNT, DEFAULT_DEPTH_LIMIT, Mark, SearchSettings, TicTacToeGameState,
    analyze_position, find_best_move,
};

fn bench_ai_turn_with_tree(board: &Board) {
    let settings = SearchSettings::default();
    black_box(analyze_position(board, &settings, true));
}

fn bench_full_depth_empty_board() {
    let settings = SearchSettings::new(Mark::O, CELL_COUNT as u32);
    black_box(find_best_move(&Board::new(), &settings, false));
}

fn bench_self_play_game() {
    let mut state = TicTacToeGameState::new();
    while !state.is_game_over() {
        if state.is_ai_turn() {
            state.begin_ai_turn();
            state.finish_ai_turn(DEFAULT_DEPTH_LIMIT, false);
        } else {
            let index = state.board.available_moves()[0];
            let _ = state.place_mark(index);
        }
    }
}

fn minimax_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");

    let opening: Board = "X../.../...".parse().unwrap_or_default();
    group.bench_function("ai_turn_after_opening", |b| {
        b.iter(|| bench_ai_turn_with_tree(&opening))
    });

    let mid_game: Board = "XO./.X./...".parse().unwrap_or_default();
    group.bench_function("ai_turn_mid_game", |b| {
        b.iter(|| bench_ai_turn_with_tree(&mid_game))
    });

    group.bench_function("full_depth_empty", |b| {
        b.iter(bench_full_depth_empty_board)
    });

    group.bench_function("self_play_game", |b| {
        b.iter(bench_self_play_game)
    });

    group.finish();
}

criterion_group!(benches, minimax_bench);
criterion_main!(benches);
