//! Benchmarks for shogi engine performance.

use std::time::{Duration, Instant};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use shogi_engine::board::{self, Position};
use shogi_engine::constants::{SCORE_INFINITE, STACK_HEADROOM};
use shogi_engine::search::{self, control};

fn far_future() -> Instant {
    Instant::now() + Duration::from_secs(3600 * 24)
}

fn position_from_sfen(sfen: &str) -> Position {
    let mut stack = vec![Position::empty(); STACK_HEADROOM + 1];
    board::load_sfen(&mut stack[STACK_HEADROOM..], sfen).expect("valid sfen");
    stack[STACK_HEADROOM].clone()
}

fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = pos.generate_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0u64;
    let mut next = Position::empty();
    for mv in moves.iter() {
        pos.do_move_into(&mut next, *mv);
        nodes += perft(&next, depth - 1);
    }
    nodes
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let startpos = position_from_sfen("startpos");
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| perft(&startpos, black_box(depth)))
        });
    }

    // A middlegame-ish position with several captures already on the board
    // and both sides holding pieces in hand, to stress drop generation too.
    let middlegame = position_from_sfen(
        "ln1g1gsnl/1r1s1kb2/p1ppppppp/9/1p7/2P6/PP1PPPPPP/1BSK1R3/LN1G1GSNL b - 1",
    );
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("middlegame", depth), &depth, |b, &depth| {
            b.iter(|| perft(&middlegame, black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let startpos = position_from_sfen("startpos");
    group.bench_function("startpos", |b| {
        b.iter(|| black_box(startpos.generate_moves()))
    });

    let middlegame = position_from_sfen(
        "ln1g1gsnl/1r1s1kb2/p1ppppppp/9/1p7/2P6/PP1PPPPPP/1BSK1R3/LN1G1GSNL b - 1",
    );
    group.bench_function("middlegame", |b| {
        b.iter(|| black_box(middlegame.generate_moves()))
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10); // fewer samples; each iteration is a full search

    let startpos = position_from_sfen("startpos");
    for depth in [2, 3, 4] {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut stack = vec![Position::empty(); STACK_HEADROOM + 64];
                stack[STACK_HEADROOM] = startpos.clone();
                control::reset();
                search::search(
                    &mut stack,
                    STACK_HEADROOM,
                    -SCORE_INFINITE,
                    SCORE_INFINITE,
                    depth,
                    far_future(),
                )
            })
        });
    }

    group.finish();
}

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval");

    let positions = [
        ("startpos", "startpos"),
        (
            "middlegame",
            "ln1g1gsnl/1r1s1kb2/p1ppppppp/9/1p7/2P6/PP1PPPPPP/1BSK1R3/LN1G1GSNL b - 1",
        ),
        ("endgame", "4k4/9/4G4/9/9/9/9/9/4K4 b G2r2b3g4s4n4l18p 1"),
    ];

    for (name, sfen) in positions {
        let pos = position_from_sfen(sfen);
        group.bench_with_input(BenchmarkId::new("position", name), &pos, |b, pos| {
            b.iter(|| black_box(pos.evaluate()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_perft, bench_movegen, bench_search, bench_eval);
criterion_main!(benches);
