//! Error types for jam-io.

use thiserror::Error;

use jam_graph::GraphError;
use jam_sim::SimError;

/// Errors that can occur loading problems or writing results.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("{file}: unknown vertex id {id}")]
    UnknownVertex { file: &'static str, id: i64 },

    #[error("invalid graph: {0}")]
    Graph(#[from] GraphError),

    #[error("invalid problem: {0}")]
    Sim(#[from] SimError),
}

/// Alias for `Result<T, IoError>`.
pub type IoResult<T> = Result<T, IoError>;
