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
//! The per-frame simulation step
//!
//! One step runs, in this order:
//!
//! 1. Reset every body's collision flag
//! 2. Sweep the configured axis for candidate groups
//! 3. Test every pair inside each group and flag colliding bodies
//! 4. Integrate unpinned bodies under gravity
//!
//! Colliding pairs are collected before any flag is written, so the flags
//! of a step are applied together.

use crate::body::BodyId;
use crate::collision::{CollisionGroup, NarrowPhase, SweepAndPrune};
use crate::config::SimulationConfig;
use crate::integration::{self, SemiImplicitEuler, UniformGravity};
use crate::world::World;
use log::{debug, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Summary of one completed step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepReport {
    /// Number of the step, starting at 1
    pub frame: u64,
    /// Duration actually integrated, in seconds
    pub elapsed: f64,
    /// Candidate groups produced by the broad phase
    pub groups: usize,
    /// Pairs handed to the narrow phase
    pub pairs_tested: usize,
    /// Pairs found colliding
    pub collisions: usize,
    /// Bodies whose position was integrated
    pub integrated: usize,
}

/// A world together with the state needed to step it
pub struct Simulation {
    world: World,
    config: SimulationConfig,
    sweep: SweepAndPrune,
    narrow_phase: NarrowPhase,
    gravity: UniformGravity,
    integrator: SemiImplicitEuler,
    frame: u64,
}

impl Simulation {
    /// Create a simulation over `world`
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(world: World, config: SimulationConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self::build(world, config))
    }

    /// Create a simulation with the default configuration
    pub fn with_defaults(world: World) -> Self {
        Self::build(world, SimulationConfig::default())
    }

    fn build(world: World, config: SimulationConfig) -> Self {
        Simulation {
            narrow_phase: NarrowPhase::new(config.exact_test),
            gravity: UniformGravity::new(config.gravity),
            integrator: SemiImplicitEuler,
            sweep: SweepAndPrune::new(),
            world,
            config,
            frame: 0,
        }
    }

    /// The simulated world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The simulated world, mutably
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Active configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of completed steps
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance the simulation by `elapsed` seconds
    ///
    /// A negative or non-finite duration is logged and replaced by zero;
    /// collision flags are still recomputed.
    pub fn step(&mut self, elapsed: f64) -> StepReport {
        let dt = match integration::validate_timestep(elapsed) {
            Ok(()) => elapsed,
            Err(e) => {
                warn!("{}; stepping with zero duration", e);
                0.0
            }
        };

        for body in self.world.bodies_mut() {
            body.set_collides(false);
        }

        let groups = self.sweep.sweep(self.world.bodies(), self.config.sweep_axis);
        let pairs_tested = groups.iter().map(CollisionGroup::pair_count).sum();
        let colliding = self.colliding_pairs(&groups);

        let bodies = self.world.bodies_mut();
        for &(a, b) in &colliding {
            bodies[a.index()].set_collides(true);
            bodies[b.index()].set_collides(true);
        }

        let integrated = integration::integrate_bodies(bodies, &self.gravity, &self.integrator, dt);

        self.frame += 1;
        let report = StepReport {
            frame: self.frame,
            elapsed: dt,
            groups: groups.len(),
            pairs_tested,
            collisions: colliding.len(),
            integrated,
        };
        debug!(
            "Step {}: dt={:.4}s, {} groups, {}/{} pairs colliding, {} bodies moved",
            report.frame, dt, report.groups, report.collisions, report.pairs_tested, integrated
        );
        report
    }

    fn colliding_pairs(&self, groups: &[CollisionGroup]) -> Vec<(BodyId, BodyId)> {
        let bodies = self.world.bodies();
        let narrow = self.narrow_phase;
        let test = move |&(a, b): &(BodyId, BodyId)| {
            narrow.collides_with(&bodies[a.index()], &bodies[b.index()])
        };

        #[cfg(feature = "parallel")]
        let pairs: Vec<(BodyId, BodyId)> = groups
            .par_iter()
            .flat_map_iter(move |group| group.pairs().filter(test))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let pairs: Vec<(BodyId, BodyId)> = groups
            .iter()
            .flat_map(move |group| group.pairs().filter(test))
            .collect();

        for &(a, b) in &pairs {
            trace!("{} collides with {}", a, b);
        }
        pairs
    }
}
