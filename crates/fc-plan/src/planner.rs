//! Planning traits and the default A* implementation.
//!
//! # Pluggability
//!
//! `fc-sim` invokes planning through the [`Planner`] trait, so applications
//! can swap in custom algorithms without touching the coordinator.  The
//! congestion picture is injected the same way: the traffic manager
//! implements [`CongestionModel`] over its live reservation table, and the
//! planner adds the model's penalties to lane costs so routes bend around
//! contested resources instead of through them.
//!
//! # Cost units
//!
//! Search costs are carried internally as **integer milli-units** (graph
//! distance × 1000) so heap ordering is exact — no float comparison inside
//! the priority queue.  `Path::total_cost` converts back to distance units.
//!
//! # Determinism
//!
//! Equal-cost candidates are broken by (fewer hops, lower vertex id), so a
//! given graph + congestion picture always yields the same path.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use fc_core::{LaneId, VertexId};
use fc_graph::NavGraph;

use crate::{Path, PlanError, PlanResult};

// ── CongestionModel ───────────────────────────────────────────────────────────

/// The planner's view of current traffic.
///
/// Penalties are additive costs in graph-distance units and must be
/// non-negative and finite: a reserved resource gets *expensive*, never
/// impossible, so a congested-but-only route is still found (and fought
/// over at execution time through the reservation protocol).
pub trait CongestionModel {
    /// Extra cost for traversing `lane`.
    fn lane_penalty(&self, lane: LaneId) -> f32;

    /// Extra cost for entering `vertex`.
    fn vertex_penalty(&self, vertex: VertexId) -> f32;
}

/// A [`CongestionModel`] that sees an empty reservation table.
pub struct FreeFlow;

impl CongestionModel for FreeFlow {
    fn lane_penalty(&self, _lane: LaneId) -> f32 {
        0.0
    }
    fn vertex_penalty(&self, _vertex: VertexId) -> f32 {
        0.0
    }
}

// ── Planner trait ─────────────────────────────────────────────────────────────

/// Pluggable path-planning engine.
pub trait Planner {
    /// Compute a path from `start` to `goal` given the current congestion
    /// picture.
    ///
    /// `start == goal` yields a trivial path rather than an error.
    fn plan(
        &self,
        graph: &NavGraph,
        start: VertexId,
        goal: VertexId,
        traffic: &dyn CongestionModel,
    ) -> PlanResult<Path>;
}

// ── AStarPlanner ──────────────────────────────────────────────────────────────

/// A* over the CSR navigation graph with a straight-line heuristic.
///
/// The heuristic is admissible by construction: lane cost is the Euclidean
/// length of the lane and congestion penalties only ever add, so the
/// straight-line distance to the goal never overestimates.
pub struct AStarPlanner;

impl Planner for AStarPlanner {
    fn plan(
        &self,
        graph: &NavGraph,
        start: VertexId,
        goal: VertexId,
        traffic: &dyn CongestionModel,
    ) -> PlanResult<Path> {
        graph.check_vertex(start)?;
        graph.check_vertex(goal)?;
        astar(graph, start, goal, traffic)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// Convert a distance-unit cost to integer milli-units.
#[inline]
fn milli(cost: f32) -> u64 {
    debug_assert!(cost >= 0.0 && cost.is_finite());
    (cost * 1000.0).round() as u64
}

fn astar(
    graph: &NavGraph,
    start: VertexId,
    goal: VertexId,
    traffic: &dyn CongestionModel,
) -> PlanResult<Path> {
    if start == goal {
        return Ok(Path::trivial(start));
    }

    let n = graph.vertex_count();
    // Best known (cost, hops) to reach each vertex, lexicographic.
    let mut dist = vec![(u64::MAX, u32::MAX); n];
    // prev_lane[v] = lane that reached v; LaneId::INVALID for unreached vertices.
    let mut prev_lane = vec![LaneId::INVALID; n];

    dist[start.index()] = (0, 0);

    // Min-heap on (f, hops, vertex, g).  Reverse makes BinaryHeap (max)
    // behave as a min-heap; the hops and vertex-id keys give the
    // deterministic tie-break.
    let mut heap: BinaryHeap<Reverse<(u64, u32, VertexId, u64)>> = BinaryHeap::new();
    heap.push(Reverse((milli(graph.straight_line(start, goal)), 0, start, 0)));

    while let Some(Reverse((_f, hops, vertex, g))) = heap.pop() {
        if vertex == goal {
            return Ok(reconstruct(graph, &prev_lane, start, goal, g));
        }

        // Skip stale heap entries.
        if (g, hops) > dist[vertex.index()] {
            continue;
        }

        for lane in graph.out_lanes(vertex) {
            let neighbor = graph.lane_to[lane.index()];
            let step = graph.lane_cost[lane.index()]
                + traffic.lane_penalty(lane)
                + traffic.vertex_penalty(neighbor);
            let new_g = g.saturating_add(milli(step));
            let new_hops = hops + 1;

            if (new_g, new_hops) < dist[neighbor.index()] {
                dist[neighbor.index()] = (new_g, new_hops);
                prev_lane[neighbor.index()] = lane;
                let f = new_g.saturating_add(milli(graph.straight_line(neighbor, goal)));
                heap.push(Reverse((f, new_hops, neighbor, new_g)));
            }
        }
    }

    Err(PlanError::Unreachable { from: start, to: goal })
}

fn reconstruct(
    graph: &NavGraph,
    prev_lane: &[LaneId],
    start: VertexId,
    goal: VertexId,
    total_milli: u64,
) -> Path {
    let mut lanes = Vec::new();
    let mut cur = goal;
    while cur != start {
        let lane = prev_lane[cur.index()];
        debug_assert_ne!(lane, LaneId::INVALID);
        lanes.push(lane);
        cur = graph.lane_from[lane.index()];
    }
    lanes.reverse();

    let mut vertices = Vec::with_capacity(lanes.len() + 1);
    vertices.push(start);
    for &lane in &lanes {
        vertices.push(graph.lane_to[lane.index()]);
    }

    Path {
        vertices,
        lanes,
        total_cost: total_milli as f32 / 1000.0,
    }
}
