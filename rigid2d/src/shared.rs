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
//! World state shared between threads
//!
//! Three actors touch the bodies: the simulation thread stepping them, the
//! input side dragging and pinning them, and the render side drawing them.
//!
//! The simulation lives behind one coarse `Mutex`. A step holds it for the
//! whole reset, broad phase, narrow phase and integration; every input
//! mutation holds it for that one mutation.
//!
//! The render side never takes that lock. After every step and every input
//! mutation an immutable [`WorldSnapshot`] is swapped in, and readers clone
//! the current `Arc`. A reader sees a whole frame, possibly one frame old.
//!
//! # Lock Ordering
//!
//! The snapshot slot is only written while the simulation lock is held, and
//! readers of the slot never take the simulation lock.

use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use crate::body::{BodyId, Color, Polygon, RigidBody};
use crate::math::Vec2;
use crate::simulation::{Simulation, StepReport};
use log::warn;

/// Render-facing copy of one body
#[derive(Debug, Clone, PartialEq)]
pub struct BodySnapshot {
    /// Handle of the body
    pub id: BodyId,
    /// Local-space shape, shared with the body
    pub shape: Arc<Polygon>,
    /// World-space position
    pub position: Vec2,
    /// Display colour
    pub color: Color,
    /// Collision flag of the last step, for highlighting
    pub collides: bool,
    /// Pin state
    pub pinned: bool,
}

impl BodySnapshot {
    fn capture(id: BodyId, body: &RigidBody) -> Self {
        BodySnapshot {
            id,
            shape: body.shape_arc(),
            position: body.position(),
            color: body.color(),
            collides: body.collides(),
            pinned: body.is_pinned(),
        }
    }

    /// Vertices translated into world space
    pub fn world_vertices(&self) -> impl Iterator<Item = Vec2> + '_ {
        let offset = self.position;
        self.shape.points().iter().map(move |&p| p + offset)
    }
}

/// Immutable view of every body after a step or mutation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldSnapshot {
    frame: u64,
    bodies: Vec<BodySnapshot>,
}

impl WorldSnapshot {
    /// Capture the render-facing state of a simulation
    pub fn capture(simulation: &Simulation) -> Self {
        WorldSnapshot {
            frame: simulation.frame(),
            bodies: simulation
                .world()
                .iter()
                .map(|(id, body)| BodySnapshot::capture(id, body))
                .collect(),
        }
    }

    /// Number of steps completed when the snapshot was taken
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// All bodies in id order
    pub fn bodies(&self) -> &[BodySnapshot] {
        &self.bodies
    }

    /// One body by handle
    pub fn body(&self, id: BodyId) -> Option<&BodySnapshot> {
        self.bodies.get(id.index())
    }

    /// Bodies flagged as colliding
    pub fn colliding(&self) -> impl Iterator<Item = &BodySnapshot> {
        self.bodies.iter().filter(|b| b.collides)
    }
}

struct Shared {
    simulation: Mutex<Simulation>,
    snapshot: RwLock<Arc<WorldSnapshot>>,
}

/// Cloneable handle to a simulation shared between threads
///
/// # Examples
///
/// ```
/// use rigid2d::body::{Polygon, RigidBody};
/// use rigid2d::math::Vec2;
/// use rigid2d::{SharedWorld, Simulation, World};
///
/// let mut world = World::new();
/// let id = world.add_body(RigidBody::new(Polygon::rectangle(10.0, 10.0)));
/// let shared = SharedWorld::new(Simulation::with_defaults(world));
///
/// let input = shared.clone();
/// std::thread::spawn(move || input.toggle_pinned(id)).join().unwrap();
///
/// shared.step(0.1);
/// let snapshot = shared.snapshot();
/// assert!(snapshot.body(id).unwrap().pinned);
/// assert_eq!(snapshot.body(id).unwrap().position, Vec2::zero());
/// ```
#[derive(Clone)]
pub struct SharedWorld {
    inner: Arc<Shared>,
}

impl SharedWorld {
    /// Share a simulation and publish its initial snapshot
    pub fn new(simulation: Simulation) -> Self {
        let snapshot = Arc::new(WorldSnapshot::capture(&simulation));
        SharedWorld {
            inner: Arc::new(Shared {
                simulation: Mutex::new(simulation),
                snapshot: RwLock::new(snapshot),
            }),
        }
    }

    /// Run one simulation step under the lock and publish the result
    pub fn step(&self, elapsed: f64) -> StepReport {
        let mut simulation = self.lock();
        let report = simulation.step(elapsed);
        self.publish(&simulation);
        report
    }

    /// Latest published snapshot, never waits for a running step
    pub fn snapshot(&self) -> Arc<WorldSnapshot> {
        let slot = self.inner.snapshot.read().unwrap_or_else(|poisoned| {
            warn!("Snapshot lock poisoned, reading last published frame");
            poisoned.into_inner()
        });
        Arc::clone(&*slot)
    }

    /// Run a closure with exclusive access to the simulation
    ///
    /// A snapshot is published afterwards.
    pub fn with_simulation<R>(&self, f: impl FnOnce(&mut Simulation) -> R) -> R {
        let mut simulation = self.lock();
        let result = f(&mut simulation);
        self.publish(&simulation);
        result
    }

    /// First body containing the world-space point
    pub fn body_at(&self, point: Vec2) -> Option<BodyId> {
        self.lock().world().body_at(point)
    }

    /// Move a body to a position, false if the handle is unknown
    pub fn set_position(&self, id: BodyId, position: Vec2) -> bool {
        self.mutate_body(id, |body| body.set_position(position)).is_some()
    }

    /// Move a body by a delta, false if the handle is unknown
    pub fn translate(&self, id: BodyId, delta: Vec2) -> bool {
        self.mutate_body(id, |body| body.translate(delta)).is_some()
    }

    /// Pin or unpin a body, false if the handle is unknown
    pub fn set_pinned(&self, id: BodyId, pinned: bool) -> bool {
        self.mutate_body(id, |body| body.set_pinned(pinned)).is_some()
    }

    /// Flip a body's pin state, returns the new state
    pub fn toggle_pinned(&self, id: BodyId) -> Option<bool> {
        self.mutate_body(id, RigidBody::toggle_pinned)
    }

    /// Number of bodies
    pub fn body_count(&self) -> usize {
        self.snapshot().bodies().len()
    }

    fn mutate_body<R>(&self, id: BodyId, f: impl FnOnce(&mut RigidBody) -> R) -> Option<R> {
        let mut simulation = self.lock();
        let result = simulation.world_mut().body_mut(id).map(f);
        if result.is_some() {
            self.publish(&simulation);
        }
        result
    }

    fn lock(&self) -> MutexGuard<'_, Simulation> {
        self.inner.simulation.lock().unwrap_or_else(|poisoned| {
            warn!("Simulation lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn publish(&self, simulation: &Simulation) {
        let snapshot = Arc::new(WorldSnapshot::capture(simulation));
        let mut slot = self.inner.snapshot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = snapshot;
    }
}
