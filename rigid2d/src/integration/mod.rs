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
//! Motion integration
//!
//! Forces come from [`ForceProvider`]s and are turned into velocity and
//! position updates by an [`Integrator`]. The simulation uses
//! [`UniformGravity`] with [`SemiImplicitEuler`].
//!
//! # Timestep Guidelines
//!
//! The step duration is the measured frame time and changes every frame.
//! Zero is valid (the first frame has no measurement yet). Negative and
//! non-finite durations are rejected by [`validate_timestep`].

use crate::body::RigidBody;
use crate::math::Force;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

mod euler;
mod gravity;

pub use euler::SemiImplicitEuler;
pub use gravity::{UniformGravity, STANDARD_GRAVITY};

/// Trait for force sources
///
/// Force providers compute the force acting on a body from its state and
/// could represent gravity, springs, drag or user input.
pub trait ForceProvider: Send + Sync {
    /// Compute the force on a body
    ///
    /// Returns None if this provider doesn't apply to the body.
    fn compute_force(&self, body: &RigidBody) -> Option<Force>;

    /// Get a descriptive name for this force provider
    fn name(&self) -> &str;
}

/// Trait for numerical integration methods
pub trait Integrator: Send + Sync {
    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Advance one body by `dt` seconds under `force`
    ///
    /// Returns false if the body was skipped (pinned).
    fn integrate(&self, body: &mut RigidBody, force: Force, dt: f64) -> bool;
}

/// Check that a step duration is usable
pub fn validate_timestep(dt: f64) -> Result<(), String> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(format!(
            "Invalid timestep: {}. Must be non-negative and finite.",
            dt
        ));
    }
    Ok(())
}

/// Kinetic energy of a body, `0.5 * m * v²`
pub fn kinetic_energy(body: &RigidBody) -> f64 {
    0.5 * body.mass().value() * body.linear_velocity().length_squared()
}

/// Integrate every unpinned body
///
/// Returns the number of bodies moved.
pub fn integrate_bodies(
    bodies: &mut [RigidBody],
    forces: &dyn ForceProvider,
    integrator: &dyn Integrator,
    dt: f64,
) -> usize {
    let step = |body: &mut RigidBody| -> bool {
        if body.is_pinned() {
            return false;
        }
        let force = forces.compute_force(body).unwrap_or_else(Force::zero);
        integrator.integrate(body, force, dt)
    };

    #[cfg(feature = "parallel")]
    {
        bodies.par_iter_mut().map(step).filter(|moved| *moved).count()
    }

    #[cfg(not(feature = "parallel"))]
    {
        bodies.iter_mut().map(step).filter(|moved| *moved).count()
    }
}
