//! Graph-subsystem error types.

use thiserror::Error;

use fc_core::VertexId;

/// Errors from queries against a built [`NavGraph`](crate::NavGraph).
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("vertex {0} does not exist")]
    InvalidVertex(VertexId),

    #[error("no lane from {from} to {to}")]
    NoLane { from: VertexId, to: VertexId },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Errors raised while loading a navigation-graph document.
///
/// All of these are fatal at startup: the engine refuses to schedule any
/// robot over a malformed topology.
#[derive(Debug, Error)]
pub enum GraphLoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document contains no levels")]
    NoLevels,

    #[error("lane {lane_index} references missing vertex {endpoint}")]
    DanglingLane { lane_index: usize, endpoint: u32 },

    #[error("lane {lane_index} is a self-loop on vertex {vertex}")]
    SelfLoop { lane_index: usize, vertex: u32 },

    #[error("duplicate vertex name {0:?}")]
    DuplicateVertexName(String),
}
