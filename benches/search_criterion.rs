use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use checkers_agent::game_state::game_state::GameState;
use checkers_agent::move_generation::move_generator::MoveGenerator;
use checkers_agent::move_generation::standard_rules::StandardRules;
use checkers_agent::search::alpha_beta::{AlphaBeta, NodeLimits, SearchContext};
use checkers_agent::search::board_scoring::HeuristicScorer;
use checkers_agent::search::deadline::CancelToken;
use checkers_agent::search::search_hooks::{NeverExtend, UnlimitedTime};

const DEPTHS: &[u8] = &[2, 4, 6];

fn bench_fixed_depth(c: &mut Criterion) {
    let ctx = SearchContext {
        generator: Arc::new(StandardRules),
        scorer: Arc::new(HeuristicScorer::default()),
        oracle: Arc::new(UnlimitedTime),
        deepening: Arc::new(NeverExtend),
    };
    let game = GameState::new_game();
    let moves = ctx
        .generator
        .generate_legal_moves(&game)
        .expect("opening move generation should succeed");

    let mut group = c.benchmark_group("alpha_beta_opening");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for &depth in DEPTHS {
        // Node count is deterministic, so measure it once for throughput.
        let token = CancelToken::new();
        let nodes = AlphaBeta::new(&ctx, game.side_to_move, &token, NodeLimits::default())
            .search_root(&game, &moves, depth)
            .expect("warmup search should complete")
            .nodes;
        group.throughput(Throughput::Elements(nodes));

        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                let token = CancelToken::new();
                let mut search =
                    AlphaBeta::new(&ctx, game.side_to_move, &token, NodeLimits::default());
                let result = search
                    .search_root(black_box(&game), black_box(&moves), depth)
                    .expect("benchmark search should complete");
                black_box(result.score)
            });
        });
    }

    group.finish();
}

criterion_group!(search_benches, bench_fixed_depth);
criterion_main!(search_benches);
