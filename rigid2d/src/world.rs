//! World management
//!
//! The World is the sole owner of every body in a simulation. Other
//! components refer to bodies through [`BodyId`] indices.

use crate::body::{BodyId, RigidBody};
use crate::math::Vec2;

/// The body collection
///
/// Bodies are appended and never removed, so a [`BodyId`] handed out by
/// [`World::add_body`] stays valid for the lifetime of the world.
#[derive(Debug, Clone, Default)]
pub struct World {
    bodies: Vec<RigidBody>,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        World { bodies: Vec::new() }
    }

    /// Create a world from existing bodies, ids follow iteration order
    pub fn from_bodies<I>(bodies: I) -> Self
    where
        I: IntoIterator<Item = RigidBody>,
    {
        World {
            bodies: bodies.into_iter().collect(),
        }
    }

    /// Add a body and return its handle
    pub fn add_body(&mut self, body: RigidBody) -> BodyId {
        let id = BodyId::new(self.bodies.len());
        self.bodies.push(body);
        id
    }

    /// Get a body by handle
    pub fn body(&self, id: BodyId) -> Option<&RigidBody> {
        self.bodies.get(id.index())
    }

    /// Get a body by handle, mutably
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.bodies.get_mut(id.index())
    }

    /// Get the number of bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the world holds no bodies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// All bodies in id order
    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    /// All bodies in id order, mutably
    pub fn bodies_mut(&mut self) -> &mut [RigidBody] {
        &mut self.bodies
    }

    /// Iterate `(id, body)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &RigidBody)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, body)| (BodyId::new(i), body))
    }

    /// First body, in id order, whose polygon contains the world-space point
    pub fn body_at(&self, point: Vec2) -> Option<BodyId> {
        self.iter()
            .find(|(_, body)| body.contains_point(point))
            .map(|(id, _)| id)
    }
}
