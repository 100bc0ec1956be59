use criterion::{black_box, criterion_group, criterion_main, Criterion};

use oxo::game::{ClassicState, ExtremeState};
use oxo::search::Minimax;

fn classic_full_search(c: &mut Criterion) {
    let state: ClassicState = "X   O    ".parse().unwrap();

    c.bench_function("classic_minimax", |b| {
        let mut minimax = Minimax::new(false);
        b.iter(|| minimax.search(black_box(&state), -1, 0))
    });
    c.bench_function("classic_alphabeta", |b| {
        let mut minimax = Minimax::new(true);
        b.iter(|| minimax.search(black_box(&state), -1, 0))
    });
}

fn extreme_depth_limited(c: &mut Criterion) {
    let state: ExtremeState = "XO   X  O       ".parse().unwrap();

    c.bench_function("extreme_minimax_d4", |b| {
        let mut minimax = Minimax::new(false);
        b.iter(|| minimax.search(black_box(&state), 4, 0))
    });
    c.bench_function("extreme_alphabeta_d4", |b| {
        let mut minimax = Minimax::new(true);
        b.iter(|| minimax.search(black_box(&state), 4, 0))
    });
    c.bench_function("extreme_alphabeta_d6", |b| {
        let mut minimax = Minimax::new(true);
        b.iter(|| minimax.search(black_box(&state), 6, 0))
    });
}

criterion_group!(benches, classic_full_search, extreme_depth_limited);
criterion_main!(benches);
