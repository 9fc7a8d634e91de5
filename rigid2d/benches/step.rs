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
//! Benchmarks for a full simulation step
//!
//! Compares the placeholder exact test against the separating-axis test on
//! densely packed worlds, and measures the shared-world overhead.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rigid2d::body::{Color, Polygon, RigidBody};
use rigid2d::collision::ExactTest;
use rigid2d::math::Vec2;
use rigid2d::{SharedWorld, Simulation, SimulationConfig, World};
use std::sync::Arc;

// Grid of boxes, each overlapping its horizontal neighbours
fn packed_world(count: usize) -> World {
    let shape = Arc::new(Polygon::rectangle(10.0, 10.0));
    let columns = (count as f64).sqrt().ceil() as usize;
    World::from_bodies((0..count).map(|i| {
        let position = Vec2::new((i % columns) as f64 * 8.0, (i / columns) as f64 * 12.0);
        RigidBody::with_color(Arc::clone(&shape), Color::rgb(180, 200, 220)).at(position)
    }))
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_step");

    for body_count in [16, 256, 1024].iter() {
        group.throughput(Throughput::Elements(*body_count as u64));

        for (name, exact_test) in [
            ("always_overlap", ExactTest::AlwaysOverlap),
            ("separating_axis", ExactTest::SeparatingAxis),
        ] {
            group.bench_with_input(BenchmarkId::new(name, body_count), body_count, |b, &count| {
                let config = SimulationConfig::default()
                    .with_gravity(Vec2::zero())
                    .with_exact_test(exact_test);
                let mut simulation = Simulation::new(packed_world(count), config).unwrap();
                b.iter(|| simulation.step(black_box(1.0 / 60.0)));
            });
        }
    }

    group.finish();
}

fn bench_shared_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_step");

    for body_count in [16, 256].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(body_count), body_count, |b, &count| {
            let shared = SharedWorld::new(Simulation::with_defaults(packed_world(count)));
            b.iter(|| {
                shared.step(black_box(1.0 / 60.0));
                shared.snapshot()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_step, bench_shared_step);
criterion_main!(benches);
