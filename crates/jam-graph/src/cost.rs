//! Edge cost policies and the A* heuristic.
//!
//! # Policies
//!
//! Base cost is static and lives on the [`Graph`].  Dynamic cost is derived
//! from base cost, load and capacity by a [`CostPolicy`]:
//!
//! | Policy       | `dynamic_cost`                                   | Impassable? |
//! |--------------|--------------------------------------------------|-------------|
//! | [`Blocking`] | `base` below capacity, `+inf` at or above it     | yes         |
//! | [`Penalty`]  | `base * (1 + k * max(0, load - capacity))`       | never       |
//!
//! The two are separate strategies.  [`ConfiguredPolicy`] selects one at run
//! time from [`CostPolicyKind`].

use jam_core::{CostPolicyKind, EdgeId, VertexId};

use crate::Graph;

// ── CostPolicy trait ──────────────────────────────────────────────────────────

/// Load-dependent edge cost strategy.
///
/// # Thread safety
///
/// `Send + Sync` so a single policy can be shared by every worker in the
/// parallel decision phase.
pub trait CostPolicy: Send + Sync {
    /// Cost of traversing an edge with the given base cost at `load`.
    fn dynamic_cost(&self, base: f64, load: u32, capacity: u32) -> f64;

    /// Whether an agent whose next edge currently costs `current` should
    /// search for a new route.
    fn needs_replan(&self, base: f64, current: f64, threshold: f64) -> bool;

    /// Whether one more agent may enter an edge already carrying `load`
    /// agents this tick.
    fn admits(&self, load: u32, capacity: u32) -> bool {
        let _ = (load, capacity);
        true
    }

    /// Whether this policy can make an edge impassable.
    fn may_block(&self) -> bool {
        false
    }
}

// ── Blocking ──────────────────────────────────────────────────────────────────

/// Edges at or over capacity are removed from the search.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Blocking;

impl CostPolicy for Blocking {
    #[inline]
    fn dynamic_cost(&self, base: f64, load: u32, capacity: u32) -> f64 {
        if load < capacity { base } else { f64::INFINITY }
    }

    #[inline]
    fn needs_replan(&self, _base: f64, current: f64, _threshold: f64) -> bool {
        !current.is_finite()
    }

    #[inline]
    fn admits(&self, load: u32, capacity: u32) -> bool {
        load < capacity
    }

    fn may_block(&self) -> bool {
        true
    }
}

// ── Penalty ───────────────────────────────────────────────────────────────────

/// Edges over capacity grow linearly more expensive with each extra agent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Penalty {
    pub congestion_factor: f64,
}

impl Penalty {
    pub fn new(congestion_factor: f64) -> Self {
        Self { congestion_factor }
    }
}

impl CostPolicy for Penalty {
    #[inline]
    fn dynamic_cost(&self, base: f64, load: u32, capacity: u32) -> f64 {
        let overload = load.saturating_sub(capacity) as f64;
        base * (1.0 + self.congestion_factor * overload)
    }

    #[inline]
    fn needs_replan(&self, base: f64, current: f64, threshold: f64) -> bool {
        current > threshold * base
    }
}

// ── ConfiguredPolicy ──────────────────────────────────────────────────────────

/// Run-time choice between the built-in policies.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfiguredPolicy {
    Blocking(Blocking),
    Penalty(Penalty),
}

impl From<CostPolicyKind> for ConfiguredPolicy {
    fn from(kind: CostPolicyKind) -> Self {
        match kind {
            CostPolicyKind::Blocking => Self::Blocking(Blocking),
            CostPolicyKind::Penalty { congestion_factor } => {
                Self::Penalty(Penalty::new(congestion_factor))
            }
        }
    }
}

impl CostPolicy for ConfiguredPolicy {
    #[inline]
    fn dynamic_cost(&self, base: f64, load: u32, capacity: u32) -> f64 {
        match self {
            Self::Blocking(p) => p.dynamic_cost(base, load, capacity),
            Self::Penalty(p)  => p.dynamic_cost(base, load, capacity),
        }
    }

    #[inline]
    fn needs_replan(&self, base: f64, current: f64, threshold: f64) -> bool {
        match self {
            Self::Blocking(p) => p.needs_replan(base, current, threshold),
            Self::Penalty(p)  => p.needs_replan(base, current, threshold),
        }
    }

    #[inline]
    fn admits(&self, load: u32, capacity: u32) -> bool {
        match self {
            Self::Blocking(p) => p.admits(load, capacity),
            Self::Penalty(p)  => p.admits(load, capacity),
        }
    }

    fn may_block(&self) -> bool {
        match self {
            Self::Blocking(p) => p.may_block(),
            Self::Penalty(p)  => p.may_block(),
        }
    }
}

// ── Edge weights ──────────────────────────────────────────────────────────────

/// Which per-edge cost a search relaxes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum EdgeWeights {
    /// Dynamic cost as of the last cost refresh.
    #[default]
    Current,
    /// Base cost on every edge that can admit an agent in some later tick,
    /// `+inf` on the rest.
    ///
    /// A zero-capacity edge never admits anyone.  With `loads_persist` set
    /// (loads only ever grow) an edge already at capacity never frees up
    /// either.  Any other full edge is treated as passable.
    Passable { loads_persist: bool },
}

impl EdgeWeights {
    #[inline]
    pub fn weight(self, graph: &Graph, e: EdgeId) -> f64 {
        match self {
            Self::Current => graph.current_cost(e),
            Self::Passable { loads_persist } => {
                let capacity = graph.capacity(e);
                if capacity == 0 || (loads_persist && graph.load(e) >= capacity) {
                    f64::INFINITY
                } else {
                    graph.base_cost(e)
                }
            }
        }
    }
}

// ── Heuristic ─────────────────────────────────────────────────────────────────

/// Lower bound on the cost of any path from `from` to `goal`.
///
/// Manhattan distance scaled by [`Graph::cost_scale`], the smallest
/// cost-per-unit-distance of any edge.  Every edge costs at least
/// `cost_scale` times the Manhattan distance it spans, and dynamic costs
/// never fall below base costs, so the bound holds under every load.  It is
/// also consistent: the triangle inequality on Manhattan distance carries
/// through the constant scale.  When base costs are the Manhattan lengths of
/// their edges `cost_scale` is 1.
#[inline]
pub fn heuristic(graph: &Graph, from: VertexId, goal: VertexId) -> f64 {
    graph.position(from).manhattan(graph.position(goal)) * graph.cost_scale()
}
