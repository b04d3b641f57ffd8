//! Criterion benchmarks for the reset/step loop over the blocks world.

use std::hint::black_box;

use cairn_bench::{blocks_profile, goal_channel_profile, random_actions};
use criterion::{criterion_group, criterion_main, Criterion};

/// Benchmark: 1000 random steps in a four-block world, resetting on goal.
fn bench_plain_steps(c: &mut Criterion) {
    let mut env = blocks_profile(4, 42);
    let actions = random_actions(&env, 1000, 7);

    c.bench_function("env_plain_1000_steps", |b| {
        b.iter(|| {
            env.reset(Some(42)).unwrap();
            for &action in &actions {
                let result = env.step(action).unwrap();
                if result.terminated {
                    env.reset(None).unwrap();
                }
                black_box(result.reward);
            }
        });
    });
}

/// Benchmark: 1000 random steps in the four-block agent/goal composite.
fn bench_goal_channel_steps(c: &mut Criterion) {
    let mut env = goal_channel_profile(4, 42);
    let actions = random_actions(&env, 1000, 7);

    c.bench_function("env_goal_channel_1000_steps", |b| {
        b.iter(|| {
            env.reset(Some(42)).unwrap();
            for &action in &actions {
                let result = env.step(action).unwrap();
                if result.terminated {
                    env.reset(None).unwrap();
                }
                black_box(result.observation);
            }
        });
    });
}

/// Benchmark: environment construction including enumeration.
fn bench_construct(c: &mut Criterion) {
    c.bench_function("env_construct_4_blocks", |b| {
        b.iter(|| black_box(blocks_profile(4, 0)));
    });
}

criterion_group!(
    benches,
    bench_plain_steps,
    bench_goal_channel_steps,
    bench_construct,
);
criterion_main!(benches);
