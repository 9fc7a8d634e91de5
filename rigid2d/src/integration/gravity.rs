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
//! Uniform gravitational field
//!
//! Near a planet's surface gravity is a constant acceleration `g`. The force
//! on a body is `F = m * g`, so the resulting acceleration `F / m = g` does
//! not depend on the mass.

use crate::body::RigidBody;
use crate::math::{Force, Vec2};

use super::ForceProvider;

/// Magnitude of standard gravity used by default (m/s²)
pub const STANDARD_GRAVITY: f64 = 9.8;

/// Constant gravitational acceleration applied to every body
///
/// # Example
///
/// ```
/// use rigid2d::body::{Mass, Polygon, RigidBody};
/// use rigid2d::integration::{ForceProvider, UniformGravity};
///
/// let gravity = UniformGravity::standard();
/// let body = RigidBody::new(Polygon::rectangle(1.0, 1.0)).with_mass(Mass::new(2.0));
/// let force = gravity.compute_force(&body).unwrap();
/// assert!((force.fy + 19.6).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformGravity {
    acceleration: Vec2,
}

impl UniformGravity {
    /// Create a field with the given acceleration vector
    ///
    /// # Panics
    ///
    /// Panics if the acceleration is not finite.
    pub fn new(acceleration: Vec2) -> Self {
        assert!(acceleration.is_valid(), "Gravity must be finite");
        UniformGravity { acceleration }
    }

    /// Standard gravity pointing towards negative y
    pub fn standard() -> Self {
        Self::new(Vec2::new(0.0, -STANDARD_GRAVITY))
    }

    /// The field's acceleration
    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }
}

impl Default for UniformGravity {
    fn default() -> Self {
        Self::standard()
    }
}

impl ForceProvider for UniformGravity {
    fn compute_force(&self, body: &RigidBody) -> Option<Force> {
        let f = self.acceleration * body.mass().value();
        Some(Force::new(f.x, f.y))
    }

    fn name(&self) -> &str {
        "UniformGravity"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Mass, Polygon};

    #[test]
    fn test_force_scales_with_mass() {
        let gravity = UniformGravity::standard();
        let light = RigidBody::new(Polygon::rectangle(1.0, 1.0));
        let heavy = light.clone().with_mass(Mass::new(10.0));

        let fl = gravity.compute_force(&light).unwrap();
        let fh = gravity.compute_force(&heavy).unwrap();
        assert!((fl.fy + 9.8).abs() < 1e-12);
        assert!((fh.fy + 98.0).abs() < 1e-12);
        assert_eq!(fl.fx, 0.0);
    }

    #[test]
    fn test_custom_direction() {
        let gravity = UniformGravity::new(Vec2::new(1.0, 0.0));
        assert_eq!(gravity.acceleration(), Vec2::new(1.0, 0.0));
    }

    #[test]
    #[should_panic(expected = "Gravity must be finite")]
    fn test_non_finite_gravity_panics() {
        UniformGravity::new(Vec2::new(0.0, f64::NAN));
    }
}
