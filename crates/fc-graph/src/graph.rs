//! Navigation graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing lanes.
//! Given a `VertexId v`, its outgoing lanes occupy the slice:
//!
//! ```text
//! lane_from[ vertex_out_start[v] .. vertex_out_start[v+1] ]
//! ```
//!
//! All lane arrays (`lane_from`, `lane_to`, `lane_cost`, `lane_speed_limit`)
//! are sorted by source vertex and indexed by `LaneId`, so iterating a
//! vertex's outgoing lanes is a contiguous memory scan — ideal for the
//! planner's inner loop.
//!
//! Lane traversal cost is the Euclidean length of the lane, computed once at
//! build time.  This keeps the planner's straight-line heuristic admissible
//! by construction.

use fc_core::{LaneId, Point, VertexId};

use crate::{GraphError, GraphResult};

// ── NavGraph ──────────────────────────────────────────────────────────────────

/// Directed navigation graph in CSR format.
///
/// All fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`NavGraphBuilder`] or
/// [`load_nav_graph`](crate::load_nav_graph).
#[derive(Debug)]
pub struct NavGraph {
    // ── Vertex data ───────────────────────────────────────────────────────
    /// Planar position of each vertex.  Indexed by `VertexId`.
    pub vertex_pos: Vec<Point>,

    /// Display name of each vertex (may be empty).
    pub vertex_name: Vec<String>,

    /// Whether each vertex is a charging station.
    pub vertex_charger: Vec<bool>,

    // ── CSR lane adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing lanes of vertex `v` are at LaneIds
    /// `vertex_out_start[v] .. vertex_out_start[v+1]`.
    /// Length = `vertex_count + 1`.
    pub vertex_out_start: Vec<u32>,

    // ── Lane data (indexed by LaneId = position in sorted order) ──────────
    /// Source vertex of each lane.
    pub lane_from: Vec<VertexId>,

    /// Destination vertex of each lane.
    pub lane_to: Vec<VertexId>,

    /// Traversal cost of each lane (Euclidean length of the segment).
    pub lane_cost: Vec<f32>,

    /// Speed limit of each lane in distance units per tick.  `0.0` means
    /// unlimited (the robot's own speed applies).
    pub lane_speed_limit: Vec<f32>,
}

impl NavGraph {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.vertex_pos.len()
    }

    pub fn lane_count(&self) -> usize {
        self.lane_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_pos.is_empty()
    }

    // ── Vertex queries ────────────────────────────────────────────────────

    #[inline]
    pub fn vertex_exists(&self, v: VertexId) -> bool {
        v.index() < self.vertex_pos.len()
    }

    /// Reject unknown vertex ids with `GraphError::InvalidVertex`.
    #[inline]
    pub fn check_vertex(&self, v: VertexId) -> GraphResult<()> {
        if self.vertex_exists(v) {
            Ok(())
        } else {
            Err(GraphError::InvalidVertex(v))
        }
    }

    pub fn vertex_position(&self, v: VertexId) -> GraphResult<Point> {
        self.check_vertex(v)?;
        Ok(self.vertex_pos[v.index()])
    }

    pub fn is_charger(&self, v: VertexId) -> GraphResult<bool> {
        self.check_vertex(v)?;
        Ok(self.vertex_charger[v.index()])
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `LaneId`s of all outgoing lanes from `vertex`.
    ///
    /// This is a contiguous index range — no heap allocation.  Callers must
    /// ensure `vertex` exists; use [`neighbors`](Self::neighbors) for the
    /// checked form.
    #[inline]
    pub fn out_lanes(&self, vertex: VertexId) -> impl Iterator<Item = LaneId> + '_ {
        let start = self.vertex_out_start[vertex.index()] as usize;
        let end   = self.vertex_out_start[vertex.index() + 1] as usize;
        (start..end).map(|i| LaneId(i as u32))
    }

    /// The `(neighbor, lane)` pairs reachable in one hop from `vertex`.
    ///
    /// Fails with `InvalidVertex` for unknown ids.
    pub fn neighbors(
        &self,
        vertex: VertexId,
    ) -> GraphResult<impl Iterator<Item = (VertexId, LaneId)> + '_> {
        self.check_vertex(vertex)?;
        Ok(self
            .out_lanes(vertex)
            .map(|lane| (self.lane_to[lane.index()], lane)))
    }

    /// Out-degree of `vertex` (number of outgoing lanes).
    #[inline]
    pub fn out_degree(&self, vertex: VertexId) -> usize {
        let start = self.vertex_out_start[vertex.index()] as usize;
        let end   = self.vertex_out_start[vertex.index() + 1] as usize;
        end - start
    }

    /// The lane connecting `from` directly to `to`, if one exists.
    pub fn lane_between(&self, from: VertexId, to: VertexId) -> GraphResult<LaneId> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        self.out_lanes(from)
            .find(|&lane| self.lane_to[lane.index()] == to)
            .ok_or(GraphError::NoLane { from, to })
    }

    /// Euclidean straight-line distance between two vertices.
    ///
    /// Lower bound on any path cost between them (the planner's heuristic).
    #[inline]
    pub fn straight_line(&self, a: VertexId, b: VertexId) -> f32 {
        self.vertex_pos[a.index()].distance(self.vertex_pos[b.index()])
    }
}

// ── NavGraphBuilder ───────────────────────────────────────────────────────────

/// Construct a [`NavGraph`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts vertices and directed lanes in any order.  `build()`
/// sorts lanes by source vertex, constructs the CSR arrays, and computes
/// each lane's geometric cost.
///
/// # Example
///
/// ```
/// use fc_core::Point;
/// use fc_graph::NavGraphBuilder;
///
/// let mut b = NavGraphBuilder::new();
/// let a = b.add_vertex(Point::new(0.0, 0.0));
/// let c = b.add_vertex(Point::new(3.0, 4.0));
/// b.add_bidirectional(a, c, 0.0);
/// let graph = b.build();
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.lane_count(), 2); // both directions
/// ```
pub struct NavGraphBuilder {
    positions: Vec<Point>,
    names:     Vec<String>,
    chargers:  Vec<bool>,
    raw_lanes: Vec<RawLane>,
}

struct RawLane {
    from:        VertexId,
    to:          VertexId,
    speed_limit: f32,
}

impl NavGraphBuilder {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            names:     Vec::new(),
            chargers:  Vec::new(),
            raw_lanes: Vec::new(),
        }
    }

    /// Add an unnamed, non-charger vertex and return its `VertexId`
    /// (sequential from 0).
    pub fn add_vertex(&mut self, pos: Point) -> VertexId {
        self.add_vertex_with(pos, String::new(), false)
    }

    /// Add a vertex with a display name and charger flag.
    pub fn add_vertex_with(
        &mut self,
        pos:        Point,
        name:       String,
        is_charger: bool,
    ) -> VertexId {
        let id = VertexId(self.positions.len() as u32);
        self.positions.push(pos);
        self.names.push(name);
        self.chargers.push(is_charger);
        id
    }

    /// Add a **directed** lane from `from` to `to`.
    ///
    /// `speed_limit` is in distance units per tick; `0.0` means unlimited.
    /// The traversal cost is the Euclidean length, computed at `build()`.
    pub fn add_lane(&mut self, from: VertexId, to: VertexId, speed_limit: f32) {
        debug_assert!(from.index() < self.positions.len());
        debug_assert!(to.index() < self.positions.len());
        self.raw_lanes.push(RawLane { from, to, speed_limit });
    }

    /// Convenience: add lanes in **both directions** for a two-way segment.
    pub fn add_bidirectional(&mut self, a: VertexId, b: VertexId, speed_limit: f32) {
        self.add_lane(a, b, speed_limit);
        self.add_lane(b, a, speed_limit);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn lane_count(&self) -> usize {
        self.raw_lanes.len()
    }

    /// Consume the builder and produce a [`NavGraph`].
    ///
    /// Time complexity: O(L log L) for the lane sort, where L = lanes.
    pub fn build(self) -> NavGraph {
        let vertex_count = self.positions.len();
        let lane_count   = self.raw_lanes.len();

        // Sort lanes by source vertex for CSR construction.
        let mut raw = self.raw_lanes;
        raw.sort_by_key(|l| (l.from.0, l.to.0));

        let lane_from: Vec<VertexId> = raw.iter().map(|l| l.from).collect();
        let lane_to:   Vec<VertexId> = raw.iter().map(|l| l.to).collect();
        let lane_cost: Vec<f32> = raw
            .iter()
            .map(|l| self.positions[l.from.index()].distance(self.positions[l.to.index()]))
            .collect();
        let lane_speed_limit: Vec<f32> = raw.iter().map(|l| l.speed_limit).collect();

        // Build CSR row pointer (vertex_out_start).
        let mut vertex_out_start = vec![0u32; vertex_count + 1];
        for l in &raw {
            vertex_out_start[l.from.index() + 1] += 1;
        }
        for i in 1..=vertex_count {
            vertex_out_start[i] += vertex_out_start[i - 1];
        }
        debug_assert_eq!(vertex_out_start[vertex_count] as usize, lane_count);

        NavGraph {
            vertex_pos: self.positions,
            vertex_name: self.names,
            vertex_charger: self.chargers,
            vertex_out_start,
            lane_from,
            lane_to,
            lane_cost,
            lane_speed_limit,
        }
    }
}

impl Default for NavGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
