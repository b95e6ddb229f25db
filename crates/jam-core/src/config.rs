//! Simulation configuration.
//!
//! Every tunable of the engine is an explicit field here, passed into the
//! simulation at construction time.  Nothing is a compiled-in constant, so
//! tests can exercise boundary values directly.

use crate::{CoreError, CoreResult};

/// Which edge cost policy is active for a run.
///
/// The two policies are deliberately kept as separate strategies; see
/// `jam_graph::cost` for their semantics.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum CostPolicyKind {
    /// An edge at or over capacity is impassable.
    #[default]
    Blocking,
    /// An edge over capacity costs `base * (1 + k * overload)`.
    Penalty { congestion_factor: f64 },
}

/// How edge loads are rebuilt after each tick.
///
/// The two variants give different congestion dynamics and are not
/// interchangeable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LoadAccounting {
    /// Load counts only the agents that crossed the edge in the tick just
    /// committed.
    #[default]
    PerTick,
    /// Load counts every traversal committed since tick 0.
    Cumulative,
}

/// Top-level simulation configuration.
///
/// Typically built in code or loaded from JSON by the application crate and
/// passed to the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Active edge cost policy.  Default: blocking.
    pub cost_policy: CostPolicyKind,

    /// Under the penalty policy an agent replans when the next edge's dynamic
    /// cost exceeds `replan_threshold * base_cost`.  Default: 1.2.
    pub replan_threshold: f64,

    /// Liveness safeguard.  The run stops after this many ticks even if some
    /// agents are still active.  Default: 10 000.
    pub tick_ceiling: u64,

    /// Load accounting variant.  Default: per-tick.
    pub load_accounting: LoadAccounting,

    /// Worker thread count for the parallel decision phase.  `None` uses all
    /// logical cores.  Ignored without the `parallel` feature of `jam-sim`.
    pub num_threads: Option<usize>,
}

impl SimConfig {
    pub const DEFAULT_REPLAN_THRESHOLD: f64 = 1.2;
    pub const DEFAULT_TICK_CEILING: u64 = 10_000;
    pub const DEFAULT_CONGESTION_FACTOR: f64 = 1.0;

    /// Default configuration running the penalty policy with factor `k`.
    pub fn penalty(congestion_factor: f64) -> Self {
        Self {
            cost_policy: CostPolicyKind::Penalty { congestion_factor },
            ..Self::default()
        }
    }

    /// Check that every tunable is in range.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] naming the first offending field.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.replan_threshold.is_finite() || self.replan_threshold < 1.0 {
            return Err(CoreError::Config(format!(
                "replan_threshold must be a finite value >= 1.0, got {}",
                self.replan_threshold
            )));
        }
        if self.tick_ceiling == 0 {
            return Err(CoreError::Config("tick_ceiling must be at least 1".into()));
        }
        if let CostPolicyKind::Penalty { congestion_factor } = self.cost_policy {
            if !congestion_factor.is_finite() || congestion_factor < 0.0 {
                return Err(CoreError::Config(format!(
                    "congestion_factor must be finite and non-negative, got {congestion_factor}"
                )));
            }
        }
        if self.num_threads == Some(0) {
            return Err(CoreError::Config("num_threads must be at least 1 when set".into()));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cost_policy:      CostPolicyKind::Blocking,
            replan_threshold: Self::DEFAULT_REPLAN_THRESHOLD,
            tick_ceiling:     Self::DEFAULT_TICK_CEILING,
            load_accounting:  LoadAccounting::PerTick,
            num_threads:      None,
        }
    }
}
