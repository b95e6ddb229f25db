//! Run results handed to reporting code.

use std::fmt;

use jam_core::{AgentId, Tick, VertexId};
use jam_fleet::{AgentStatus, FleetStore};

/// Why the tick loop stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Termination {
    /// Every agent reached `Arrived` or `Stuck`.
    Converged,
    /// The configured tick ceiling was hit with agents still active.
    TickCeiling,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Converged   => "converged",
            Self::TickCeiling => "tick_ceiling",
        })
    }
}

/// Counters for one committed tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:      Tick,
    /// Agents still non-terminal after the commit.
    pub active:    usize,
    /// Agents that crossed an edge.
    pub advanced:  usize,
    /// Agents held in place.
    pub waiting:   usize,
    /// Agents that ran a search.
    pub replanned: usize,
    /// Agents that became `Arrived` this tick.
    pub arrived:   usize,
    /// Agents that became `Stuck` this tick.
    pub stuck:     usize,
    /// Highest edge load after the commit.
    pub max_load:  u32,
}

/// Final state of one agent.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentOutcome {
    pub agent:   AgentId,
    pub status:  AgentStatus,
    /// Every vertex occupied, origin first.
    pub history: Vec<VertexId>,
    pub replans: u32,
    pub waits:   u32,
    /// Base cost of every edge crossed plus one per tick spent waiting.
    pub cost:    f64,
}

/// Everything a run produces.
#[derive(Clone, Debug, PartialEq)]
pub struct SimReport {
    /// Ticks executed.
    pub ticks:       u64,
    pub termination: Termination,
    /// Indexed by `AgentId`.
    pub outcomes:    Vec<AgentOutcome>,
}

impl SimReport {
    pub(crate) fn collect(fleet: &FleetStore, ticks: u64, termination: Termination) -> Self {
        let outcomes = fleet
            .agent_ids()
            .map(|agent| {
                let state = fleet.state(agent);
                AgentOutcome {
                    agent,
                    status:  state.status,
                    history: fleet.history(agent).to_vec(),
                    replans: state.replans,
                    waits:   state.waits,
                    cost:    state.travelled + f64::from(state.waits),
                }
            })
            .collect();
        Self { ticks, termination, outcomes }
    }

    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    pub fn count(&self, status: AgentStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Sum of every agent's cost.
    pub fn total_cost(&self) -> f64 {
        self.outcomes.iter().map(|o| o.cost).sum()
    }

    pub fn outcome(&self, agent: AgentId) -> &AgentOutcome {
        &self.outcomes[agent.index()]
    }
}
