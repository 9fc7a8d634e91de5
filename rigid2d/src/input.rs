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
//! Pointer-driven selection, dragging and pinning
//!
//! Points are in world space; mapping from window coordinates is left to
//! the caller.

use crate::body::BodyId;
use crate::math::Vec2;
use crate::shared::SharedWorld;

/// Pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Releasing clears the selection
    Primary,
    /// Releasing toggles the selected body's pin
    Secondary,
}

/// Input controller holding the current selection
pub struct PointerInput {
    world: SharedWorld,
    last_position: Option<Vec2>,
    selected: Option<BodyId>,
}

impl PointerInput {
    /// Create a controller acting on `world`
    pub fn new(world: SharedWorld) -> Self {
        PointerInput {
            world,
            last_position: None,
            selected: None,
        }
    }

    /// Currently selected body
    pub fn selected(&self) -> Option<BodyId> {
        self.selected
    }

    /// Press at `point`, selecting the first body under it
    pub fn press(&mut self, point: Vec2) -> Option<BodyId> {
        self.last_position = Some(point);
        self.selected = self.world.body_at(point);
        self.selected
    }

    /// Move the pointer, dragging the selection along
    pub fn move_to(&mut self, point: Vec2) {
        if let (Some(id), Some(last)) = (self.selected, self.last_position) {
            self.world.translate(id, point - last);
        }
        self.last_position = Some(point);
    }

    /// Release a button
    ///
    /// Returns the new pin state when the secondary button toggled one.
    pub fn release(&mut self, button: Button) -> Option<bool> {
        match button {
            Button::Primary => {
                self.last_position = None;
                self.selected = None;
                None
            }
            Button::Secondary => self.selected.and_then(|id| self.world.toggle_pinned(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Polygon, RigidBody};
    use crate::simulation::Simulation;
    use crate::world::World;

    fn input() -> PointerInput {
        let world = World::from_bodies(vec![
            RigidBody::new(Polygon::rectangle(10.0, 10.0)),
            RigidBody::new(Polygon::rectangle(10.0, 10.0)).at(Vec2::new(50.0, 0.0)),
        ]);
        PointerInput::new(SharedWorld::new(Simulation::with_defaults(world)))
    }

    #[test]
    fn test_press_selects_hit_body() {
        let mut input = input();
        assert_eq!(input.press(Vec2::new(51.0, 2.0)), Some(BodyId::new(1)));
        assert_eq!(input.selected(), Some(BodyId::new(1)));

        assert_eq!(input.press(Vec2::new(25.0, 0.0)), None);
        assert_eq!(input.selected(), None);
    }

    #[test]
    fn test_drag_moves_by_delta() {
        let mut input = input();
        input.press(Vec2::new(1.0, 1.0));
        input.move_to(Vec2::new(4.0, -1.0));
        input.move_to(Vec2::new(6.0, 0.0));

        let position = input.world.snapshot().body(BodyId::new(0)).unwrap().position;
        assert_eq!(position, Vec2::new(5.0, -1.0));
    }

    #[test]
    fn test_move_without_selection_is_noop() {
        let mut input = input();
        input.press(Vec2::new(25.0, 0.0));
        input.move_to(Vec2::new(30.0, 0.0));
        let snapshot = input.world.snapshot();
        assert_eq!(snapshot.body(BodyId::new(0)).unwrap().position, Vec2::zero());
        assert_eq!(snapshot.body(BodyId::new(1)).unwrap().position, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn test_primary_release_ends_drag() {
        let mut input = input();
        input.press(Vec2::zero());
        assert_eq!(input.release(Button::Primary), None);
        assert_eq!(input.selected(), None);

        input.move_to(Vec2::new(3.0, 3.0));
        assert_eq!(input.world.snapshot().body(BodyId::new(0)).unwrap().position, Vec2::zero());
    }

    #[test]
    fn test_secondary_release_toggles_pin() {
        let mut input = input();
        assert_eq!(input.release(Button::Secondary), None);

        input.press(Vec2::new(50.0, 0.0));
        assert_eq!(input.release(Button::Secondary), Some(true));
        assert!(input.world.snapshot().body(BodyId::new(1)).unwrap().pinned);
        // selection survives a secondary release
        assert_eq!(input.selected(), Some(BodyId::new(1)));
        assert_eq!(input.release(Button::Secondary), Some(false));
    }
}
