use criterion::{criterion_group, criterion_main, Criterion};

use twophase::cubie::CubieCube;
use twophase::moves::Move::*;
use twophase::scramble::random_state;
use twophase::solver::{solve, tables};

fn cc_apply_moves() {
    let cc = CubieCube::default();
    let _ = cc.apply_moves(&[R, U, R3, U3]);
}

fn cc_multi_moves() {
    let mut cc = CubieCube::default();
    cc.multiply_moves(&[R, U, R3, U3]);
}

fn bench_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("CubieCube Moves");
    group.bench_function("multiply_moves", |b| b.iter(cc_multi_moves));
    group.bench_function("apply_moves", |b| b.iter(cc_apply_moves));
    group.finish();
}

fn bench_solver(c: &mut Criterion) {
    tables().unwrap();
    let cc = random_state(12345);
    c.bench_function("Solver", |b| b.iter(|| solve(&cc).unwrap()));
}

criterion_group!(benches, bench_solver, bench_moves);
criterion_main!(benches);
