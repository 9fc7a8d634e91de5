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
//! Sweep-and-prune broad phase
//!
//! Every body contributes two endpoints, the lower and upper edge of its
//! bounding box along the sweep axis. The endpoint sequence persists between
//! steps and is re-sorted with an insertion sort, which is close to linear
//! when bodies move little from one frame to the next and O(n²) in the worst
//! case.
//!
//! A linear scan over the sorted endpoints then counts open intervals.
//! Bodies whose intervals are connected through overlaps end up in the same
//! [`CollisionGroup`]. Two bodies in a group overlap directly or through a
//! chain of overlapping neighbours; bodies separated by a gap that no other
//! interval bridges never share a group.
//!
//! # Ties
//!
//! Intervals are inclusive: bodies touching at exactly one coordinate are
//! candidates. On equal coordinates `Begin` endpoints sort before `End`
//! endpoints so the inclusive boundary does not depend on insertion order.

use crate::body::{BodyId, RigidBody};
use log::trace;

/// Axis along which endpoints are sorted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SweepAxis {
    /// Horizontal axis
    #[default]
    X,
    /// Vertical axis
    Y,
}

/// Which edge of a bounding interval an endpoint marks
///
/// The derived ordering places `Begin` before `End`, used to break ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bound {
    /// Lower edge
    Begin,
    /// Upper edge
    End,
}

/// One edge of a body's bounding interval
///
/// Holds no coordinate. The position along the sweep axis is read from the
/// owning body's current bounding box each time it is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingEndpoint {
    bound: Bound,
    body: BodyId,
}

impl BoundingEndpoint {
    /// Create an endpoint for a body
    pub fn new(bound: Bound, body: BodyId) -> Self {
        BoundingEndpoint { bound, body }
    }

    /// Edge kind
    pub fn bound(&self) -> Bound {
        self.bound
    }

    /// Owning body
    pub fn body(&self) -> BodyId {
        self.body
    }

    /// Current coordinate along `axis`
    ///
    /// # Panics
    ///
    /// Panics if the owning body is not in `bodies`.
    pub fn coordinate(&self, axis: SweepAxis, bodies: &[RigidBody]) -> f64 {
        let aabb = bodies[self.body.index()].bounding_box();
        match (self.bound, axis) {
            (Bound::Begin, SweepAxis::X) => aabb.min.x,
            (Bound::Begin, SweepAxis::Y) => aabb.min.y,
            (Bound::End, SweepAxis::X) => aabb.max.x,
            (Bound::End, SweepAxis::Y) => aabb.max.y,
        }
    }

    fn sorts_before(&self, other: &BoundingEndpoint, axis: SweepAxis, bodies: &[RigidBody]) -> bool {
        let a = self.coordinate(axis, bodies);
        let b = other.coordinate(axis, bodies);
        a < b || (a == b && self.bound < other.bound)
    }
}

/// Bodies that are candidate-overlapping along the sweep axis
///
/// Members are distinct. A finished group from [`SweepAndPrune::sweep`]
/// always holds at least two bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionGroup {
    members: Vec<BodyId>,
}

impl CollisionGroup {
    /// Create an empty group
    pub fn new() -> Self {
        CollisionGroup { members: Vec::new() }
    }

    /// Add a body, returns false if it was already a member
    ///
    /// Linear in the group size; the sweep itself appends through
    /// `push_closed`.
    pub fn insert(&mut self, body: BodyId) -> bool {
        if self.members.contains(&body) {
            false
        } else {
            self.members.push(body);
            true
        }
    }

    /// Append a body whose interval just closed
    ///
    /// Every body has exactly one `End` endpoint per sweep, so no
    /// membership check is needed.
    fn push_closed(&mut self, body: BodyId) {
        self.members.push(body);
    }

    /// Whether the body is a member
    pub fn contains(&self, body: BodyId) -> bool {
        self.members.contains(&body)
    }

    /// Members in insertion order
    pub fn members(&self) -> &[BodyId] {
        &self.members
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Remove all members
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Every unordered pair of distinct members
    pub fn pairs(&self) -> impl Iterator<Item = (BodyId, BodyId)> + '_ {
        self.members
            .iter()
            .enumerate()
            .flat_map(move |(i, &a)| self.members[i + 1..].iter().map(move |&b| (a, b)))
    }

    /// Number of unordered pairs, n(n-1)/2
    pub fn pair_count(&self) -> usize {
        let n = self.members.len();
        n * n.saturating_sub(1) / 2
    }
}

/// Incremental sweep-and-prune over a persisted endpoint sequence
///
/// # Examples
///
/// ```
/// use rigid2d::body::{Polygon, RigidBody};
/// use rigid2d::collision::{SweepAndPrune, SweepAxis};
/// use rigid2d::math::Vec2;
///
/// let bodies = vec![
///     RigidBody::new(Polygon::rectangle(2.0, 2.0)),
///     RigidBody::new(Polygon::rectangle(2.0, 2.0)).at(Vec2::new(1.0, 0.0)),
///     RigidBody::new(Polygon::rectangle(2.0, 2.0)).at(Vec2::new(10.0, 0.0)),
/// ];
///
/// let mut sap = SweepAndPrune::new();
/// let groups = sap.sweep(&bodies, SweepAxis::X);
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SweepAndPrune {
    endpoints: Vec<BoundingEndpoint>,
    tracked_bodies: usize,
}

impl SweepAndPrune {
    /// Create a sweep with no endpoints; they are generated on first use
    pub fn new() -> Self {
        SweepAndPrune {
            endpoints: Vec::new(),
            tracked_bodies: 0,
        }
    }

    /// Endpoints in their current order
    pub fn endpoints(&self) -> &[BoundingEndpoint] {
        &self.endpoints
    }

    /// Sort endpoints by the bodies' current positions and group overlaps
    pub fn sweep(&mut self, bodies: &[RigidBody], axis: SweepAxis) -> Vec<CollisionGroup> {
        self.sync_endpoints(bodies);
        let swaps = self.sort_endpoints(bodies, axis);
        let groups = self.prune();
        trace!(
            "Sweep on {:?}: {} endpoints, {} swaps, {} groups",
            axis,
            self.endpoints.len(),
            swaps,
            groups.len()
        );
        groups
    }

    /// Append endpoints for bodies not seen before
    ///
    /// A shorter body slice than previously tracked means a different world,
    /// in which case the sequence is rebuilt.
    fn sync_endpoints(&mut self, bodies: &[RigidBody]) {
        if bodies.len() < self.tracked_bodies {
            self.endpoints.clear();
            self.tracked_bodies = 0;
        }
        for index in self.tracked_bodies..bodies.len() {
            let id = BodyId::new(index);
            self.endpoints.push(BoundingEndpoint::new(Bound::Begin, id));
            self.endpoints.push(BoundingEndpoint::new(Bound::End, id));
        }
        self.tracked_bodies = bodies.len();
    }

    /// Stable insertion sort, returns the number of swaps performed
    fn sort_endpoints(&mut self, bodies: &[RigidBody], axis: SweepAxis) -> usize {
        let mut swaps = 0;
        for i in 1..self.endpoints.len() {
            let mut j = i;
            while j > 0 && self.endpoints[j].sorts_before(&self.endpoints[j - 1], axis, bodies) {
                self.endpoints.swap(j, j - 1);
                swaps += 1;
                j -= 1;
            }
        }
        swaps
    }

    fn prune(&self) -> Vec<CollisionGroup> {
        let mut finished = Vec::new();
        let mut open_intervals = 0usize;
        let mut current: Option<CollisionGroup> = None;

        for endpoint in &self.endpoints {
            match endpoint.bound() {
                Bound::Begin => {
                    current.get_or_insert_with(CollisionGroup::new);
                    open_intervals += 1;
                }
                Bound::End => {
                    current
                        .get_or_insert_with(CollisionGroup::new)
                        .push_closed(endpoint.body());
                    open_intervals = open_intervals.saturating_sub(1);
                }
            }

            if open_intervals == 0 {
                // a lone body closed its own interval, reuse the group
                if current.as_ref().map_or(false, |g| g.len() >= 2) {
                    finished.extend(current.take());
                } else if let Some(group) = current.as_mut() {
                    group.clear();
                }
            }
        }

        if let Some(group) = current {
            if group.len() >= 2 {
                finished.push(group);
            }
        }

        finished
    }
}
