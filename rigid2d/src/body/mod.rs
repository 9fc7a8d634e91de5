//! Rigid bodies and their attributes
//!
//! This module provides the simulated entity and its building blocks:
//! - Stable body handles
//! - Polygon shapes in body-local space
//! - Mass and display colour

mod components;
mod id;
mod rigid_body;
mod shape;

pub use components::{Color, Mass};
pub use id::BodyId;
pub use rigid_body::RigidBody;
pub use shape::Polygon;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;

    fn square() -> RigidBody {
        RigidBody::with_color(Polygon::rectangle(2.0, 2.0), Color::rgb(200, 200, 200))
    }

    #[test]
    fn test_body_defaults() {
        let body = square();
        assert_eq!(body.position(), Vec2::zero());
        assert_eq!(body.linear_velocity(), Vec2::zero());
        assert_eq!(body.mass().value(), 1.0);
        assert!(!body.is_pinned());
        assert!(!body.collides());
    }

    #[test]
    fn test_pin_zeroes_velocity() {
        let mut body = square();
        body.set_linear_velocity(Vec2::new(4.0, -12.0));
        body.set_pinned(true);
        assert!(body.is_pinned());
        assert_eq!(body.linear_velocity(), Vec2::zero());
    }

    #[test]
    fn test_unpin_keeps_velocity_zero() {
        let mut body = square();
        body.set_pinned(true);
        assert!(!body.toggle_pinned());
        assert_eq!(body.linear_velocity(), Vec2::zero());
        assert!(body.toggle_pinned());
    }

    #[test]
    fn test_pinned_body_rejects_velocity() {
        let mut body = square();
        body.set_pinned(true);
        body.set_linear_velocity(Vec2::new(1.0, 1.0));
        body.accelerate(Vec2::new(0.0, -9.8));
        assert_eq!(body.linear_velocity(), Vec2::zero());
    }

    #[test]
    fn test_bounding_box_follows_position() {
        let mut body = square();
        body.set_position(Vec2::new(10.0, -3.0));
        let aabb = body.bounding_box();
        assert_eq!(aabb.min, Vec2::new(9.0, -4.0));
        assert_eq!(aabb.max, Vec2::new(11.0, -2.0));

        body.translate(Vec2::new(-1.0, 1.0));
        assert_eq!(body.bounding_box().min, Vec2::new(8.0, -3.0));
    }

    #[test]
    fn test_world_vertices_and_containment() {
        let body = square().at(Vec2::new(5.0, 5.0));
        let vertices: Vec<_> = body.world_vertices().collect();
        assert!(vertices.contains(&Vec2::new(6.0, 6.0)));
        assert!(vertices.contains(&Vec2::new(4.0, 4.0)));
        assert!(body.contains_point(Vec2::new(5.5, 4.5)));
        assert!(!body.contains_point(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn test_velocity_mutators() {
        let mut body = square().with_mass(Mass::new(3.0));
        body.accelerate(Vec2::new(1.0, 2.0));
        body.accelerate(Vec2::new(1.0, 0.0));
        assert_eq!(body.linear_velocity(), Vec2::new(2.0, 2.0));
        assert_eq!(body.mass().value(), 3.0);
    }

    #[test]
    fn test_shape_is_shared_between_clones() {
        let body = square();
        let clone = body.clone();
        assert!(std::sync::Arc::ptr_eq(&body.shape_arc(), &clone.shape_arc()));
    }
}
