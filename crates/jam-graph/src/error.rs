//! Graph-subsystem error type.

use thiserror::Error;

use jam_core::{EdgeId, VertexId};

/// Errors produced by `jam-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("{edge} references {vertex} but the graph has only {vertex_count} vertices")]
    VertexOutOfRange {
        edge:         EdgeId,
        vertex:       VertexId,
        vertex_count: usize,
    },

    #[error("{edge} is a self-loop on {vertex}")]
    SelfLoop { edge: EdgeId, vertex: VertexId },

    #[error("{edge} has invalid base cost {cost}")]
    InvalidCost { edge: EdgeId, cost: f64 },

    /// No path exists under the requested edge weights.  Callers routing
    /// agents treat this as an ordinary outcome rather than a failure.
    #[error("no route from {from} to {to}")]
    NoRoute { from: VertexId, to: VertexId },

    #[error("{0} not found in graph")]
    VertexNotFound(VertexId),
}

pub type GraphResult<T> = Result<T, GraphError>;
