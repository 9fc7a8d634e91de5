// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Benchmarks for the sweep-and-prune broad phase
//!
//! These benchmarks measure:
//! - A first sweep, which builds and fully sorts the endpoint list
//! - Repeated sweeps over slowly moving bodies (nearly sorted input)
//! - Repeated sweeps after shuffling positions (worst case re-sort)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rigid2d::body::{Color, Polygon, RigidBody};
use rigid2d::collision::{SweepAndPrune, SweepAxis};
use rigid2d::math::Vec2;
use std::sync::Arc;

fn scattered_bodies(count: usize, seed: u64) -> Vec<RigidBody> {
    let mut rng = StdRng::seed_from_u64(seed);
    let shape = Arc::new(Polygon::rectangle(10.0, 10.0));
    let extent = count as f64 * 8.0;
    (0..count)
        .map(|_| {
            let position = Vec2::new(rng.gen_range(-extent..extent), rng.gen_range(-100.0..100.0));
            RigidBody::with_color(Arc::clone(&shape), Color::rgb(200, 200, 200)).at(position)
        })
        .collect()
}

fn bench_first_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_sweep");

    for body_count in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*body_count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(body_count), body_count, |b, &count| {
            let bodies = scattered_bodies(count, 1);
            b.iter(|| {
                let mut sweep = SweepAndPrune::new();
                sweep.sweep(black_box(&bodies), SweepAxis::X)
            });
        });
    }

    group.finish();
}

fn bench_coherent_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("coherent_sweep");

    for body_count in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*body_count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(body_count), body_count, |b, &count| {
            let mut bodies = scattered_bodies(count, 2);
            let mut sweep = SweepAndPrune::new();
            sweep.sweep(&bodies, SweepAxis::X);

            let mut tick = 0usize;
            b.iter(|| {
                // small motion keeps the endpoint list nearly sorted
                tick += 1;
                let delta = if tick % 2 == 0 { 0.5 } else { -0.5 };
                for body in bodies.iter_mut().step_by(3) {
                    body.translate(Vec2::new(delta, 0.0));
                }
                sweep.sweep(black_box(&bodies), SweepAxis::X)
            });
        });
    }

    group.finish();
}

fn bench_shuffled_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("shuffled_sweep");
    group.sample_size(20);

    let mut rng = StdRng::seed_from_u64(3);
    let mut bodies = scattered_bodies(500, 3);
    let mut sweep = SweepAndPrune::new();
    sweep.sweep(&bodies, SweepAxis::X);

    group.bench_function("500_bodies", |b| {
        b.iter(|| {
            for body in bodies.iter_mut() {
                body.set_position(Vec2::new(rng.gen_range(-4000.0..4000.0), 0.0));
            }
            sweep.sweep(black_box(&bodies), SweepAxis::X)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_first_sweep, bench_coherent_sweep, bench_shuffled_sweep);
criterion_main!(benches);
