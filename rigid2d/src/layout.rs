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
//! Initial placement of bodies
//!
//! Square bodies are laid out left to right across a viewport centred on
//! the origin, with equal gaps between them and the viewport edges, at
//! random heights in the upper half. All start pinned.

use std::sync::Arc;

use crate::body::{Color, Polygon, RigidBody};
use crate::math::Vec2;
use crate::world::World;
use rand::Rng;

/// Parameters for a generated row of square bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldLayout {
    /// Side length of each square
    pub body_size: f64,
    /// Number of bodies
    pub count: usize,
    /// Viewport width in world units
    pub width: f64,
    /// Viewport height in world units
    pub height: f64,
}

impl Default for WorldLayout {
    fn default() -> Self {
        WorldLayout {
            body_size: 50.0,
            count: 10,
            width: 800.0,
            height: 600.0,
        }
    }
}

impl WorldLayout {
    /// Gap between neighbouring bodies
    pub fn spacing(&self) -> f64 {
        let count = self.count as f64;
        (self.width / count - self.body_size) * count / (count + 1.0)
    }

    /// Check that the bodies fit the viewport
    pub fn validate(&self) -> Result<(), String> {
        if self.count == 0 {
            return Err("Layout needs at least one body".to_string());
        }
        if !self.body_size.is_finite() || self.body_size <= 0.0 {
            return Err(format!("Body size {} must be positive and finite", self.body_size));
        }
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err("Viewport dimensions must be finite".to_string());
        }
        if self.spacing() <= 0.0 {
            return Err(format!(
                "{} bodies of size {} do not fit a width of {}",
                self.count, self.body_size, self.width
            ));
        }
        if self.height / 2.0 - self.body_size < self.body_size {
            return Err(format!(
                "Height {} leaves no room for bodies of size {}",
                self.height, self.body_size
            ));
        }
        Ok(())
    }

    /// Build a world of pinned squares
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<World, String> {
        self.validate()?;

        let shape = Arc::new(Polygon::rectangle(self.body_size, self.body_size));
        let spacing = self.spacing();
        let half = self.body_size / 2.0;
        let max_y = self.height / 2.0 - self.body_size;

        let mut world = World::new();
        let mut edge = -self.width / 2.0;
        for _ in 0..self.count {
            let x = edge + half + spacing;
            let y = rng.gen_range(self.body_size..=max_y);
            let mut body = RigidBody::with_color(Arc::clone(&shape), Color::random(rng)).at(Vec2::new(x, y));
            body.set_pinned(true);
            world.add_body(body);
            edge = x + half;
        }
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_spacing() {
        // (800 / 10 - 50) * 10 / 11
        let layout = WorldLayout::default();
        assert!((layout.spacing() - 300.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_generated_bodies() {
        let layout = WorldLayout::default();
        let world = layout.generate(&mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(world.body_count(), 10);

        let spacing = layout.spacing();
        let bodies = world.bodies();
        for body in bodies {
            assert!(body.is_pinned());
            let bounds = body.bounding_box();
            assert!(bounds.min.x >= -400.0 && bounds.max.x <= 400.0);
            assert!(body.position().y >= 50.0 && body.position().y <= 250.0);
        }
        for pair in bodies.windows(2) {
            let gap = pair[1].bounding_box().min.x - pair[0].bounding_box().max.x;
            assert!((gap - spacing).abs() < 1e-9);
        }
        let left_gap = bodies[0].bounding_box().min.x + 400.0;
        let right_gap = 400.0 - bodies[9].bounding_box().max.x;
        assert!((left_gap - spacing).abs() < 1e-9);
        assert!((right_gap - spacing).abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_same_world() {
        let layout = WorldLayout::default();
        let a = layout.generate(&mut StdRng::seed_from_u64(42)).unwrap();
        let b = layout.generate(&mut StdRng::seed_from_u64(42)).unwrap();
        let heights = |w: &World| w.bodies().iter().map(|b| b.position().y).collect::<Vec<_>>();
        assert_eq!(heights(&a), heights(&b));
    }

    #[test]
    fn test_overfull_layout_rejected() {
        let layout = WorldLayout {
            count: 20,
            ..WorldLayout::default()
        };
        assert!(layout.generate(&mut StdRng::seed_from_u64(1)).is_err());
    }

    #[test]
    fn test_degenerate_layouts_rejected() {
        let empty = WorldLayout {
            count: 0,
            ..WorldLayout::default()
        };
        assert!(empty.validate().is_err());

        let flat = WorldLayout {
            height: 150.0,
            ..WorldLayout::default()
        };
        assert!(flat.validate().unwrap_err().contains("Height"));
    }
}
