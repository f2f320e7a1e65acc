//! The result of a planning query.

use fc_core::{LaneId, VertexId};

/// An immutable planned route: the vertex sequence plus the lanes that
/// connect consecutive vertices.
///
/// Invariant: `lanes.len() == vertices.len() - 1` for non-trivial paths;
/// a trivial path (`start == goal`) has one vertex and no lanes.  A `Path`
/// is never edited in place — re-planning replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Vertices to visit in order, including start and goal.
    pub vertices: Vec<VertexId>,
    /// Lane `lanes[i]` connects `vertices[i]` to `vertices[i + 1]`.
    pub lanes: Vec<LaneId>,
    /// Total search cost, including any congestion penalties that were in
    /// effect when the path was planned.
    pub total_cost: f32,
}

impl Path {
    /// A path that starts and ends at the same vertex.
    pub fn trivial(vertex: VertexId) -> Self {
        Self {
            vertices: vec![vertex],
            lanes: Vec::new(),
            total_cost: 0.0,
        }
    }

    /// `true` if the start and goal are the same vertex.
    pub fn is_trivial(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Number of lane traversals.
    pub fn hop_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn start(&self) -> VertexId {
        self.vertices[0]
    }

    pub fn goal(&self) -> VertexId {
        *self.vertices.last().unwrap_or(&VertexId::INVALID)
    }

    /// The `(lane, destination_vertex)` of hop `i`, or `None` past the end.
    pub fn hop(&self, i: usize) -> Option<(LaneId, VertexId)> {
        let lane = *self.lanes.get(i)?;
        let to = *self.vertices.get(i + 1)?;
        Some((lane, to))
    }
}
