use jam_core::{AgentId, CoreError, VertexId};
use jam_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{agent} references {vertex} but the graph has only {vertex_count} vertices")]
    AgentVertexOutOfRange {
        agent:        AgentId,
        vertex:       VertexId,
        vertex_count: usize,
    },

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
