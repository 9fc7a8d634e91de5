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
//! Planar math primitives
//!
//! Double-precision 2D vectors, axis-aligned bounding boxes and force
//! vectors. World space uses a y-up convention: gravity points towards
//! negative y.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// 2D vector with double-precision components
///
/// Used for positions, velocities, accelerations and polygon vertices.
///
/// # Examples
///
/// ```
/// use rigid2d::math::Vec2;
///
/// let v = Vec2::new(3.0, 4.0);
/// assert_eq!(v.length(), 5.0);
/// assert!(v.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
}

impl Vec2 {
    /// Create a new vector
    pub const fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    /// The zero vector
    pub const fn zero() -> Self {
        Vec2::new(0.0, 0.0)
    }

    /// Dot product
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Squared length, avoids the square root for comparisons
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Euclidean length
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Counter-clockwise perpendicular
    pub fn perp(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    /// Check if both components are finite (not NaN or infinite)
    pub fn is_valid(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Get the vector as an array
    pub fn as_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from(arr: [f64; 2]) -> Self {
        Vec2::new(arr[0], arr[1])
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Vec2::new(x, y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        rhs * self
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Axis-aligned bounding box
///
/// Bounds are inclusive on both ends: two boxes sharing an edge overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Lower-left corner
    pub min: Vec2,
    /// Upper-right corner
    pub max: Vec2,
}

impl Aabb {
    /// Create a box from its corners
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Aabb { min, max }
    }

    /// Smallest box enclosing all points, `None` for an empty iterator
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec2>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Aabb::new(first, first);
        for p in iter {
            aabb.min.x = aabb.min.x.min(p.x);
            aabb.min.y = aabb.min.y.min(p.y);
            aabb.max.x = aabb.max.x.max(p.x);
            aabb.max.y = aabb.max.y.max(p.y);
        }
        Some(aabb)
    }

    /// Centre point
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Width and height
    pub fn extents(&self) -> Vec2 {
        self.max - self.min
    }

    /// The box moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Aabb {
        Aabb::new(self.min + offset, self.max + offset)
    }

    /// Inclusive overlap test on both axes
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// 2D force vector in Newtons
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Force {
    /// X component
    pub fx: f64,
    /// Y component
    pub fy: f64,
}

impl Force {
    /// Create a new force vector
    pub fn new(fx: f64, fy: f64) -> Self {
        Force { fx, fy }
    }

    /// Create a zero force
    pub fn zero() -> Self {
        Force::new(0.0, 0.0)
    }

    /// Check if the force is valid (all components finite)
    pub fn is_valid(&self) -> bool {
        self.fx.is_finite() && self.fy.is_finite()
    }

    /// Add another force to this one
    pub fn add(&mut self, other: &Force) {
        self.fx += other.fx;
        self.fy += other.fy;
    }

    /// Get the force as a vector
    pub fn as_vec(&self) -> Vec2 {
        Vec2::new(self.fx, self.fy)
    }
}
