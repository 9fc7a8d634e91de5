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
//! The simulated rigid body

use std::sync::Arc;

use crate::body::{Color, Mass, Polygon};
use crate::math::{Aabb, Vec2};

/// A translating polygonal body
///
/// Bodies carry no angular state. Mutators are plain value replacements;
/// when the body lives in a [`SharedWorld`](crate::SharedWorld) the caller
/// is expected to hold its lock.
///
/// # Examples
///
/// ```
/// use rigid2d::body::{Polygon, RigidBody};
/// use rigid2d::math::Vec2;
///
/// let mut body = RigidBody::new(Polygon::rectangle(10.0, 10.0));
/// body.set_position(Vec2::new(5.0, 0.0));
/// body.set_linear_velocity(Vec2::new(0.0, 3.0));
///
/// body.set_pinned(true);
/// assert_eq!(body.linear_velocity(), Vec2::zero());
/// assert_eq!(body.bounding_box().min, Vec2::new(0.0, -5.0));
/// ```
#[derive(Debug, Clone)]
pub struct RigidBody {
    shape: Arc<Polygon>,
    color: Color,
    position: Vec2,
    linear_velocity: Vec2,
    mass: Mass,
    pinned: bool,
    collides: bool,
}

impl RigidBody {
    /// Create a body at the origin, at rest, with unit mass and a random colour
    ///
    /// The shape may be shared between bodies by passing an `Arc<Polygon>`.
    pub fn new(shape: impl Into<Arc<Polygon>>) -> Self {
        Self::with_color(shape, Color::random(&mut rand::thread_rng()))
    }

    /// Create a body with a fixed colour
    pub fn with_color(shape: impl Into<Arc<Polygon>>, color: Color) -> Self {
        RigidBody {
            shape: shape.into(),
            color,
            position: Vec2::zero(),
            linear_velocity: Vec2::zero(),
            mass: Mass::default(),
            pinned: false,
            collides: false,
        }
    }

    /// Replace the mass, builder style
    pub fn with_mass(mut self, mass: Mass) -> Self {
        self.mass = mass;
        self
    }

    /// Set the position, builder style
    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Local-space shape
    pub fn shape(&self) -> &Polygon {
        &self.shape
    }

    /// Shared handle to the shape
    pub fn shape_arc(&self) -> Arc<Polygon> {
        Arc::clone(&self.shape)
    }

    /// Display colour
    pub fn color(&self) -> Color {
        self.color
    }

    /// World-space bounding box: local bounds translated by the position
    pub fn bounding_box(&self) -> Aabb {
        self.shape.bounds().translated(self.position)
    }

    /// Radius of the local bounding circle
    pub fn bounding_radius(&self) -> f64 {
        self.shape.bounding_radius()
    }

    /// Vertices translated into world space
    pub fn world_vertices(&self) -> impl Iterator<Item = Vec2> + '_ {
        let offset = self.position;
        self.shape.points().iter().map(move |&p| p + offset)
    }

    /// Whether a world-space point lies inside the body's polygon
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.shape.contains_point(point - self.position)
    }

    /// World-space position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Replace the position
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Move the body by a delta
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// World-space linear velocity
    pub fn linear_velocity(&self) -> Vec2 {
        self.linear_velocity
    }

    /// Replace the linear velocity; ignored while pinned
    pub fn set_linear_velocity(&mut self, velocity: Vec2) {
        if !self.pinned {
            self.linear_velocity = velocity;
        }
    }

    /// Add a velocity delta; ignored while pinned
    pub fn accelerate(&mut self, delta: Vec2) {
        if !self.pinned {
            self.linear_velocity += delta;
        }
    }

    /// Mass
    pub fn mass(&self) -> Mass {
        self.mass
    }

    /// Whether the body is excluded from integration
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Pin or unpin the body; pinning zeroes the velocity
    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
        if pinned {
            self.linear_velocity = Vec2::zero();
        }
    }

    /// Flip the pin state, returns the new state
    pub fn toggle_pinned(&mut self) -> bool {
        self.set_pinned(!self.pinned);
        self.pinned
    }

    /// Whether the body overlapped another one during the last step
    pub fn collides(&self) -> bool {
        self.collides
    }

    /// Set the per-step collision flag
    pub fn set_collides(&mut self, collides: bool) {
        self.collides = collides;
    }
}
