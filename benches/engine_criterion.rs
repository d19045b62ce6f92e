use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use courtchess::engine::game_engine::GameEngine;
use courtchess::game_state::chess_types::*;
use courtchess::move_generation::move_generator::LegalMoveGenerator;
use courtchess::move_generation::perft::perft;
use courtchess::sync::codec::{compress, decompress};
use courtchess::sync::payload::SyncPayload;

const MAX_DEPTH: u8 = 5;

fn start() -> GameState {
    GameState::new_game(Player::new("a", "Ada"), Player::new("b", "Bo"))
}

fn played_game() -> GameState {
    let at = |row, col| Position::new(row, col).expect("bench position on board");
    let mut engine = GameEngine::from_state(start());
    engine.make_move(at(2, 1), at(0, 0)).expect("knight takes rook");
    engine.make_move(at(0, 1), at(2, 2)).expect("knight takes bishop");
    engine.make_move(at(2, 0), at(1, 0)).expect("rook advances");
    engine.into_state()
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    let game = start();
    for depth in 1..=MAX_DEPTH {
        let nodes = perft(&LegalMoveGenerator, &game, depth)
            .expect("perft should run")
            .nodes;
        if depth == 1 {
            assert_eq!(nodes, 6, "start position has six legal moves");
        }

        group.throughput(Throughput::Elements(nodes as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format!("d{depth}")), &nodes, |b, expected| {
            b.iter(|| {
                let counts = perft(&LegalMoveGenerator, black_box(&game), black_box(depth))
                    .expect("perft benchmark run should succeed");
                assert_eq!(counts.nodes, *expected);
                black_box(counts.nodes)
            });
        });
    }

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let payload = SyncPayload::full_state(played_game(), Some("Ada".to_owned()));
    let fragment = compress(&payload).expect("payload encodes");

    group.bench_function("compress_full_state", |b| {
        b.iter(|| black_box(compress(black_box(&payload))))
    });
    group.bench_function("decompress_full_state", |b| {
        b.iter(|| black_box(decompress(black_box(&fragment))))
    });

    group.finish();
}

criterion_group!(engine_benches, bench_perft, bench_codec);
criterion_main!(engine_benches);
