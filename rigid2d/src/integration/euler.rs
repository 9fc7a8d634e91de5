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
//! Semi-implicit Euler integrator
//!
//! # Algorithm
//!
//! ```text
//! a = F / m
//! v(t + dt) = v(t) + a*dt
//! x(t + dt) = x(t) + v(t + dt)*dt
//! ```
//!
//! The velocity is updated first and the new velocity moves the body, which
//! keeps the scheme stable for constant forces such as uniform gravity.
//!
//! # Properties
//!
//! - **First-order accurate**: global error O(dt)
//! - **Symplectic**: bounded energy drift, unlike explicit Euler
//! - **One force evaluation per step**

use crate::body::RigidBody;
use crate::math::Force;
use log::warn;

use super::Integrator;

/// Semi-implicit (symplectic) Euler integrator
///
/// # Example
///
/// ```
/// use rigid2d::body::{Polygon, RigidBody};
/// use rigid2d::integration::{Integrator, SemiImplicitEuler};
/// use rigid2d::math::{Force, Vec2};
///
/// let mut body = RigidBody::new(Polygon::rectangle(1.0, 1.0));
/// SemiImplicitEuler.integrate(&mut body, Force::new(0.0, -9.8), 0.5);
/// assert_eq!(body.linear_velocity(), Vec2::new(0.0, -4.9));
/// assert_eq!(body.position(), Vec2::new(0.0, -2.45));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn name(&self) -> &str {
        "Semi-implicit Euler"
    }

    fn integrate(&self, body: &mut RigidBody, force: Force, dt: f64) -> bool {
        if body.is_pinned() {
            return false;
        }

        let acceleration = force.as_vec() * body.mass().inverse();
        body.accelerate(acceleration * dt);
        let velocity = body.linear_velocity();
        body.translate(velocity * dt);

        if !body.position().is_valid() || !body.linear_velocity().is_valid() {
            warn!(
                "Integration produced invalid state: position {:?}, velocity {:?}",
                body.position(),
                body.linear_velocity()
            );
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Mass, Polygon};
    use crate::math::Vec2;

    fn body() -> RigidBody {
        RigidBody::new(Polygon::rectangle(1.0, 1.0))
    }

    #[test]
    fn test_velocity_updated_before_position() {
        let mut b = body();
        b.set_linear_velocity(Vec2::new(1.0, 0.0));
        assert!(SemiImplicitEuler.integrate(&mut b, Force::new(2.0, 0.0), 0.5));
        // v = 1 + 2*0.5 = 2, x = 2*0.5 = 1
        assert_eq!(b.linear_velocity(), Vec2::new(2.0, 0.0));
        assert_eq!(b.position(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_mass_scales_acceleration() {
        let mut b = body().with_mass(Mass::new(4.0));
        SemiImplicitEuler.integrate(&mut b, Force::new(0.0, 8.0), 1.0);
        assert_eq!(b.linear_velocity(), Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_pinned_body_untouched() {
        let mut b = body().at(Vec2::new(3.0, 4.0));
        b.set_pinned(true);
        assert!(!SemiImplicitEuler.integrate(&mut b, Force::new(0.0, -9.8), 1.0));
        assert_eq!(b.position(), Vec2::new(3.0, 4.0));
        assert_eq!(b.linear_velocity(), Vec2::zero());
    }

    #[test]
    fn test_zero_timestep_is_noop() {
        let mut b = body();
        b.set_linear_velocity(Vec2::new(5.0, 5.0));
        SemiImplicitEuler.integrate(&mut b, Force::new(0.0, -9.8), 0.0);
        assert_eq!(b.position(), Vec2::zero());
        assert_eq!(b.linear_velocity(), Vec2::new(5.0, 5.0));
    }
}
