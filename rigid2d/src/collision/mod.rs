//! Collision detection
//!
//! Two stages run every step:
//! - Broad phase: sweep-and-prune along one axis produces candidate groups
//! - Narrow phase: a bounding-circle rejection and an exact test per pair

mod broad_phase;
mod narrow_phase;

pub use broad_phase::{Bound, BoundingEndpoint, CollisionGroup, SweepAndPrune, SweepAxis};
pub use narrow_phase::{bounding_circles_overlap, polygons_overlap, ExactTest, NarrowPhase};
