//! Planner error type.

use thiserror::Error;

use fc_core::VertexId;
use fc_graph::GraphError;

/// Errors produced by `fc-plan`.
///
/// `Unreachable` is recoverable by design: the fleet keeps running and the
/// affected robot simply stays where it is.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("no route from {from} to {to}")]
    Unreachable { from: VertexId, to: VertexId },

    #[error("vertex {0} does not exist")]
    InvalidVertex(VertexId),
}

impl From<GraphError> for PlanError {
    fn from(e: GraphError) -> Self {
        match e {
            GraphError::InvalidVertex(v) => PlanError::InvalidVertex(v),
            // A planner never asks for a specific lane; treat a missing lane
            // as an unreachable hop.
            GraphError::NoLane { from, to } => PlanError::Unreachable { from, to },
        }
    }
}

pub type PlanResult<T> = Result<T, PlanError>;
