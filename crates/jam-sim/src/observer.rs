//! Simulation observer trait for progress reporting and data collection.

use jam_core::Tick;
use jam_fleet::FleetStore;
use jam_graph::Graph;

use crate::{Termination, TickSummary};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         if summary.tick.0 % self.interval == 0 {
///             println!("{}: {} active", summary.tick, summary.active);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any decisions.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after loads and costs have been committed for `tick`.
    ///
    /// Read-only access to the fleet and the graph lets output writers record
    /// positions or loads without the sim knowing any output format.
    fn on_snapshot(&mut self, _tick: Tick, _fleet: &FleetStore, _graph: &Graph) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called once after the loop stops.  `final_tick` is the number of ticks
    /// executed.
    fn on_sim_end(&mut self, _final_tick: Tick, _termination: Termination) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
