//! Resources and the reservation table.

use std::fmt;

use rustc_hash::FxHashMap;

use fc_core::{LaneId, RobotId, Tick, VertexId};

// ── Resource ──────────────────────────────────────────────────────────────────

/// A reservable unit of shared infrastructure: a vertex or a lane.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Resource {
    Vertex(VertexId),
    Lane(LaneId),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Vertex(v) => write!(f, "vertex {v}"),
            Resource::Lane(l) => write!(f, "lane {l}"),
        }
    }
}

// ── ReservationTable ──────────────────────────────────────────────────────────

/// Exclusive claims on resources.
///
/// Invariant: a resource has at most one holder.  Because every grant and
/// release happens inside the single sequential coordination loop, holds
/// span grant..release with no overlapping windows by construction.
#[derive(Default)]
pub struct ReservationTable {
    /// Resource → (holder, tick the claim was granted).
    holders: FxHashMap<Resource, (RobotId, Tick)>,
    /// Holder → resources, in grant order.
    held: FxHashMap<RobotId, Vec<Resource>>,
}

impl ReservationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The robot currently holding `resource`, if any.
    #[inline]
    pub fn holder(&self, resource: Resource) -> Option<RobotId> {
        self.holders.get(&resource).map(|&(robot, _)| robot)
    }

    /// Attempt to claim `resource` for `robot` at `tick`.
    ///
    /// Returns `true` if `robot` now holds the resource — either this call
    /// granted it, or the robot already held it (re-requests are free).
    pub fn try_reserve(&mut self, robot: RobotId, resource: Resource, tick: Tick) -> bool {
        match self.holders.get(&resource) {
            Some(&(holder, _)) => holder == robot,
            None => {
                self.holders.insert(resource, (robot, tick));
                self.held.entry(robot).or_default().push(resource);
                true
            }
        }
    }

    /// Release `resource` if `robot` holds it.  Idempotent: releasing a
    /// resource the robot does not hold is a no-op, not an error.
    pub fn release(&mut self, robot: RobotId, resource: Resource) {
        if self.holder(resource) != Some(robot) {
            return;
        }
        self.holders.remove(&resource);
        if let Some(list) = self.held.get_mut(&robot) {
            list.retain(|&r| r != resource);
            if list.is_empty() {
                self.held.remove(&robot);
            }
        }
    }

    /// Release everything `robot` holds, returning the resources in grant
    /// order.
    pub fn release_all(&mut self, robot: RobotId) -> Vec<Resource> {
        let resources = self.held.remove(&robot).unwrap_or_default();
        for r in &resources {
            self.holders.remove(r);
        }
        resources
    }

    /// The resources `robot` currently holds, in grant order.
    pub fn held_by(&self, robot: RobotId) -> &[Resource] {
        self.held.get(&robot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of active reservations.
    pub fn len(&self) -> usize {
        self.holders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }
}
