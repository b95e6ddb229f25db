//! `jam-sim` — tick-synchronous congestion-aware routing engine.
//!
//! # Tick loop
//!
//! ```text
//! while some agent is active and tick < config.tick_ceiling:
//!   ① Decide  — each active agent, independently:
//!                 at destination          → Arrive
//!                 next edge usable        → Advance
//!                 otherwise search:
//!                   found                 → Advance along the new route
//!                   only through edges
//!                   that will reopen      → Wait (congestion is transient)
//!                   not at all            → Stuck
//!               (parallel with the `parallel` feature)
//!   ② Apply   — ascending AgentId; moves admitted while the edge has room
//!               under the policy, otherwise the agent waits.
//!   ③ Commit  — rewrite every edge load (this tick's moves, or running
//!               per-edge totals under cumulative accounting),
//!               then refresh every dynamic cost.
//! ```
//!
//! Costs read in tick T are always those committed at the end of T-1.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the decision phase on Rayon's thread pool.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use jam_core::SimConfig;
//! use jam_sim::{NoopObserver, Problem, SimBuilder};
//!
//! let problem = Problem::new(graph, cars)?;
//! let mut sim = SimBuilder::from_config(SimConfig::default(), problem).build()?;
//! let report = sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod decision;
pub mod error;
pub mod observer;
pub mod problem;
pub mod report;
pub mod sim;
pub mod validate;


pub use builder::SimBuilder;
pub use decision::{Action, Decision, Planner};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use problem::Problem;
pub use report::{AgentOutcome, SimReport, Termination, TickSummary};
pub use sim::Sim;
pub use validate::{validate_solution, Violation};
