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
//! Narrow-phase overlap tests for candidate pairs
//!
//! A pair first goes through a bounding-circle rejection. Bodies never
//! rotate, so the circle around the local bounding box is exact for any
//! translation. Pairs that survive are handed to the configured
//! [`ExactTest`].
//!
//! # Separating Axis Test
//!
//! Two convex polygons are disjoint if and only if some edge normal of one
//! of them separates their projections. For a concave polygon the projection
//! onto an axis equals that of its convex hull, so a separating axis found
//! among its edge normals still proves disjointness; the test can report a
//! concave pair as overlapping when only their hulls touch, never the
//! reverse.

use crate::body::RigidBody;
use crate::math::Vec2;

/// Test applied to pairs that pass the bounding-circle check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExactTest {
    /// Treat every bounding-circle overlap as a collision
    AlwaysOverlap,
    /// Separating axis test over both polygons' edge normals
    #[default]
    SeparatingAxis,
}

/// Pairwise collision check
///
/// # Examples
///
/// ```
/// use rigid2d::body::{Polygon, RigidBody};
/// use rigid2d::collision::{ExactTest, NarrowPhase};
/// use rigid2d::math::Vec2;
///
/// let a = RigidBody::new(Polygon::rectangle(2.0, 2.0));
/// let b = RigidBody::new(Polygon::rectangle(2.0, 2.0)).at(Vec2::new(1.0, 1.0));
///
/// let narrow = NarrowPhase::new(ExactTest::SeparatingAxis);
/// assert!(narrow.collides_with(&a, &b));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NarrowPhase {
    exact_test: ExactTest,
}

impl NarrowPhase {
    /// Create a narrow phase with the given exact test
    pub fn new(exact_test: ExactTest) -> Self {
        NarrowPhase { exact_test }
    }

    /// The exact test in use
    pub fn exact_test(&self) -> ExactTest {
        self.exact_test
    }

    /// Whether two bodies overlap
    ///
    /// Always false when their bounding circles do not overlap.
    pub fn collides_with(&self, a: &RigidBody, b: &RigidBody) -> bool {
        if !bounding_circles_overlap(a, b) {
            return false;
        }
        match self.exact_test {
            ExactTest::AlwaysOverlap => true,
            ExactTest::SeparatingAxis => polygons_overlap(a, b),
        }
    }
}

/// World-space centre of a body's bounding circle
fn circle_center(body: &RigidBody) -> Vec2 {
    body.position() + body.shape().bounds().center()
}

/// Relative slack on the radius sum so tangent circles survive rounding
const TANGENT_TOLERANCE: f64 = 1e-9;

/// Quick rejection: false only when the centres are farther apart than the
/// sum of the bounding radii
///
/// Tangent circles count as overlapping.
pub fn bounding_circles_overlap(a: &RigidBody, b: &RigidBody) -> bool {
    let reach = a.bounding_radius() + b.bounding_radius();
    let distance = (circle_center(a) - circle_center(b)).length();
    distance <= reach * (1.0 + TANGENT_TOLERANCE)
}

/// Separating axis test on the translated polygons
///
/// Touching polygons count as overlapping.
pub fn polygons_overlap(a: &RigidBody, b: &RigidBody) -> bool {
    let va: Vec<Vec2> = a.world_vertices().collect();
    let vb: Vec<Vec2> = b.world_vertices().collect();
    !has_separating_axis(&va, &vb) && !has_separating_axis(&vb, &va)
}

fn has_separating_axis(polygon: &[Vec2], other: &[Vec2]) -> bool {
    let n = polygon.len();
    (0..n).any(|i| {
        let axis = (polygon[(i + 1) % n] - polygon[i]).perp();
        if axis.length_squared() == 0.0 {
            return false;
        }
        let (min_a, max_a) = project(polygon, axis);
        let (min_b, max_b) = project(other, axis);
        max_a < min_b || max_b < min_a
    })
}

fn project(points: &[Vec2], axis: Vec2) -> (f64, f64) {
    points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        let d = p.dot(axis);
        (lo.min(d), hi.max(d))
    })
}
