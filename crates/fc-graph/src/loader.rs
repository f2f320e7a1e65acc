//! JSON navigation-graph loader.
//!
//! # Document format
//!
//! ```json
//! {
//!   "levels": {
//!     "l1": {
//!       "vertices": [ [x, y, {"name": "A", "is_charger": true}], ... ],
//!       "lanes":    [ [from, to, {"speed_limit": 1.5, "bidirectional": true}], ... ]
//!     }
//!   }
//! }
//! ```
//!
//! Vertex ids are positional (index into the `vertices` array).  Only the
//! first level (by name order) is loaded; multi-level sites run one engine
//! per level.
//!
//! Validation is fail-fast: a dangling lane endpoint, a self-loop, or a
//! duplicate non-empty vertex name aborts the load before any robot can be
//! spawned over the broken topology.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;

use fc_core::{Point, VertexId};

use crate::{GraphLoadError, NavGraph, NavGraphBuilder};

// ── Document types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct GraphDoc {
    /// BTreeMap so "first level" is deterministic regardless of JSON order.
    levels: BTreeMap<String, LevelDoc>,
}

#[derive(Deserialize)]
struct LevelDoc {
    vertices: Vec<VertexEntry>,
    lanes:    Vec<LaneEntry>,
}

/// `[x, y, {attrs}]`
#[derive(Deserialize)]
struct VertexEntry(f32, f32, VertexAttrs);

#[derive(Deserialize, Default)]
#[serde(default)]
struct VertexAttrs {
    name:       String,
    is_charger: bool,
}

/// `[from, to, {attrs}]`
#[derive(Deserialize)]
struct LaneEntry(u32, u32, LaneAttrs);

#[derive(Deserialize, Default)]
#[serde(default)]
struct LaneAttrs {
    speed_limit:   f32,
    bidirectional: bool,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Load and validate a navigation graph from a JSON file.
pub fn load_nav_graph(path: &Path) -> Result<NavGraph, GraphLoadError> {
    let text = std::fs::read_to_string(path)?;
    parse_nav_graph(&text)
}

/// Parse and validate a navigation graph from a JSON string.
pub fn parse_nav_graph(text: &str) -> Result<NavGraph, GraphLoadError> {
    let doc: GraphDoc = serde_json::from_str(text)?;
    let level = doc
        .levels
        .into_values()
        .next()
        .ok_or(GraphLoadError::NoLevels)?;

    let vertex_count = level.vertices.len();
    let mut builder = NavGraphBuilder::new();

    let mut seen_names: BTreeSet<&str> = BTreeSet::new();
    for VertexEntry(x, y, attrs) in &level.vertices {
        if !attrs.name.is_empty() && !seen_names.insert(attrs.name.as_str()) {
            return Err(GraphLoadError::DuplicateVertexName(attrs.name.clone()));
        }
        builder.add_vertex_with(Point::new(*x, *y), attrs.name.clone(), attrs.is_charger);
    }

    for (i, &LaneEntry(from, to, ref attrs)) in level.lanes.iter().enumerate() {
        for endpoint in [from, to] {
            if endpoint as usize >= vertex_count {
                return Err(GraphLoadError::DanglingLane { lane_index: i, endpoint });
            }
        }
        if from == to {
            return Err(GraphLoadError::SelfLoop { lane_index: i, vertex: from });
        }
        let (a, b) = (VertexId(from), VertexId(to));
        if attrs.bidirectional {
            builder.add_bidirectional(a, b, attrs.speed_limit);
        } else {
            builder.add_lane(a, b, attrs.speed_limit);
        }
    }

    Ok(builder.build())
}
