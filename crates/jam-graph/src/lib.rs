//! `jam-graph` — road graph, congestion cost model, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`graph`]   | `Graph` (flat edge table + CSR incidence), `GraphBuilder`   |
//! | [`cost`]    | `CostPolicy` trait, `Blocking`, `Penalty`, `heuristic`      |
//! | [`router`]  | `Router` trait, `Route`, `AStarRouter`, `DijkstraRouter`    |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                              |
//!
//! # Ownership of load
//!
//! Edges are undirected and stored exactly once, in a flat table indexed by
//! `EdgeId`.  Adjacency lists hold `EdgeId`s into that table, so there is one
//! load counter per edge no matter how many endpoints reference it.

pub mod cost;
pub mod error;
pub mod graph;
pub mod router;

#[cfg(test)]
mod tests;

pub use cost::{heuristic, Blocking, ConfiguredPolicy, CostPolicy, EdgeWeights, Penalty};
pub use error::{GraphError, GraphResult};
pub use graph::{Graph, GraphBuilder};
pub use router::{AStarRouter, DijkstraRouter, Route, Router};
