//! `jam-fleet` — the agents being routed and their per-run state.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`car`]     | `Car` — immutable origin/destination pair                     |
//! | [`state`]   | `AgentStatus`, `AgentState` — position, remaining route       |
//! | [`store`]   | `FleetStore` — SoA per-agent state plus movement histories    |
//!
//! # Lifecycle
//!
//! ```text
//! NoRoute → Planning → EnRoute | Stuck
//! EnRoute → EnRoute | Waiting | Stuck | Arrived
//! Waiting → EnRoute | Waiting | Stuck | Arrived
//! ```
//!
//! `Stuck` and `Arrived` are terminal.  Only the simulation engine mutates a
//! `FleetStore`, and only between ticks.

pub mod car;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use car::Car;
pub use state::{AgentState, AgentStatus};
pub use store::FleetStore;
