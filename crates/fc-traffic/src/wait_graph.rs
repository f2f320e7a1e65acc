//! The wait-for graph and cycle detection.
//!
//! An edge `A → B` means robot A is blocked on a resource currently held by
//! robot B.  A robot waits on at most one resource at a time (the next step
//! of its path), so every node has out-degree ≤ 1 and cycle detection from a
//! newly-waiting robot is a simple chain walk — O(currently waiting robots),
//! never a scan of the whole fleet.

use rustc_hash::FxHashMap;

use fc_core::RobotId;

use crate::Resource;

/// Explicit adjacency keyed by robot id.
#[derive(Default)]
pub struct WaitForGraph {
    waiting_on: FxHashMap<RobotId, (RobotId, Resource)>,
}

impl WaitForGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `robot` is blocked on `resource`, held by `holder`.
    ///
    /// Replaces any previous edge from `robot` — a robot only ever waits on
    /// its single next step.
    pub fn set_wait(&mut self, robot: RobotId, holder: RobotId, resource: Resource) {
        debug_assert_ne!(robot, holder);
        self.waiting_on.insert(robot, (holder, resource));
    }

    /// Remove `robot`'s outgoing edge (it stopped waiting).
    pub fn clear_wait(&mut self, robot: RobotId) {
        self.waiting_on.remove(&robot);
    }

    /// What `robot` is waiting on, if anything.
    pub fn waiting_on(&self, robot: RobotId) -> Option<(RobotId, Resource)> {
        self.waiting_on.get(&robot).copied()
    }

    /// Drop every edge from or to `robot` (robot removed from the fleet, or
    /// its claims were force-released).  Robots that were waiting on it will
    /// re-request next tick and either succeed or wait on the new holder.
    pub fn remove_robot(&mut self, robot: RobotId) {
        self.waiting_on.remove(&robot);
        self.waiting_on.retain(|_, &mut (holder, _)| holder != robot);
    }

    /// Find the deadlock cycle reachable from `start`, if one exists.
    ///
    /// Walks the wait chain from `start`; because out-degree ≤ 1 the walk
    /// either falls off the graph (no cycle) or revisits a robot.  Returns
    /// the robots on the cycle, in wait order.
    pub fn find_cycle(&self, start: RobotId) -> Option<Vec<RobotId>> {
        let mut chain: Vec<RobotId> = Vec::new();
        let mut cur = start;
        loop {
            if let Some(pos) = chain.iter().position(|&r| r == cur) {
                return Some(chain[pos..].to_vec());
            }
            chain.push(cur);
            match self.waiting_on.get(&cur) {
                Some(&(holder, _)) => cur = holder,
                None => return None,
            }
        }
    }

    /// Number of robots currently waiting.
    pub fn len(&self) -> usize {
        self.waiting_on.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting_on.is_empty()
    }
}
