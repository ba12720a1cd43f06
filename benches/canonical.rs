use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use permcanon::{canonical_labeling, Permutation};

/// Square-tiled surface with `n` squares: `x` moves right along rows of `width`,
/// `y` moves up along columns.
fn torus_tuple(width: usize, height: usize) -> Vec<Permutation> {
    let n = width * height;
    let right = (0..n)
        .map(|i| (i / width) * width + (i % width + 1) % width)
        .collect();
    let up = (0..n).map(|i| (i + width) % n).collect();
    vec![Permutation::from_map(right), Permutation::from_map(up)]
}

/// A single long `x`-cycle with companions that shuffle points, so that trials
/// differ from one start point to the next.
fn scrambled_tuple(n: usize) -> Vec<Permutation> {
    let x = (0..n).map(|i| (i + 1) % n).collect();
    let y = (0..n).map(|i| (i * 7 + 3) % n).collect();
    let z = (0..n).map(|i| n - 1 - i).collect();
    vec![
        Permutation::from_map(x),
        Permutation::from_map(y),
        Permutation::from_map(z),
    ]
}

fn bench_canonical(c: &mut Criterion) {
    let torus = torus_tuple(16, 16);
    c.bench_function("canonical_torus_16x16", |b| {
        b.iter(|| canonical_labeling(black_box(&torus), None));
    });

    let scrambled = scrambled_tuple(512);
    c.bench_function("canonical_scrambled_512", |b| {
        b.iter(|| canonical_labeling(black_box(&scrambled), None));
    });
}

criterion_group!(canonical_benches, bench_canonical);
criterion_main!(canonical_benches);
