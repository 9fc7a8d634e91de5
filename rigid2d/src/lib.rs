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
//! # rigid2d
//!
//! A real-time 2D rigid-body simulation core: polygonal bodies fall under
//! gravity, overlapping bodies are detected every step, and a simulation
//! thread runs alongside a render/input side that shares the world.
//!
//! ## Features
//!
//! - **Sweep and Prune**: persistent, incrementally re-sorted endpoints on one axis
//! - **Narrow Phase**: bounding-circle rejection followed by a separating-axis test
//! - **Integration**: semi-implicit Euler under uniform gravity, pinned bodies stay put
//! - **Shared World**: lock-free snapshot reads for rendering, locked input mutations
//! - **Frame Pipeline**: simulation thread with depth-one backpressure and frame pacing
//! - **Parallelization**: optional Rayon for the narrow phase and integration
//!
//! ## Example
//!
//! ```rust
//! use rigid2d::body::{Polygon, RigidBody};
//! use rigid2d::math::Vec2;
//! use rigid2d::{Simulation, World};
//!
//! let mut world = World::new();
//! let a = world.add_body(RigidBody::new(Polygon::rectangle(2.0, 2.0)));
//! let b = world.add_body(RigidBody::new(Polygon::rectangle(2.0, 2.0)).at(Vec2::new(1.0, 0.0)));
//!
//! let mut simulation = Simulation::with_defaults(world);
//! let report = simulation.step(0.1);
//!
//! assert_eq!(report.collisions, 1);
//! assert!(simulation.world().body(a).unwrap().collides());
//! assert!(simulation.world().body(b).unwrap().position().y < 0.0);
//! ```

#![warn(missing_docs)]

/// Vectors, bounding boxes and forces
pub mod math;

/// Bodies, their shapes and handles
pub mod body;

/// Body storage
pub mod world;

/// Broad and narrow phase collision detection
pub mod collision;

/// Force providers and integrators
pub mod integration;

/// Simulation and pipeline configuration
pub mod config;

/// The per-frame step
pub mod simulation;

/// Thread-shared world state and render snapshots
pub mod shared;

/// Simulation thread and frame pacing
pub mod pipeline;

/// Pointer selection, dragging and pinning
pub mod input;

/// Initial body placement
pub mod layout;

pub use config::{PipelineConfig, SimulationConfig};
pub use pipeline::FramePipeline;
pub use shared::{BodySnapshot, SharedWorld, WorldSnapshot};
pub use simulation::{Simulation, StepReport};
pub use world::World;
