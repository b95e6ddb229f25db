//! `jam-core` — foundational types for the `jam` congestion-aware router.
//!
//! Every other `jam-*` crate depends on this one.  It has no `jam-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`ids`]     | `VertexId`, `EdgeId`, `AgentId`                          |
//! | [`geo`]     | `Point`, Manhattan distance                              |
//! | [`time`]    | `Tick`                                                   |
//! | [`config`]  | `SimConfig`, `CostPolicyKind`, `LoadAccounting`          |
//! | [`error`]   | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CostPolicyKind, LoadAccounting, SimConfig};
pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use ids::{AgentId, EdgeId, VertexId};
pub use time::Tick;
