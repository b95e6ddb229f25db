//! Plain data row types written by output backends.

use jam_fleet::AgentStatus;
use jam_sim::{AgentOutcome, TickSummary};

use crate::VertexIds;

/// Final outcome of one agent, with its path in file vertex ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub agent_id: u32,
    pub status:   AgentStatus,
    pub replans:  u32,
    pub waits:    u32,
    pub path:     Vec<i64>,
}

impl HistoryRow {
    pub fn from_outcome(outcome: &AgentOutcome, ids: &VertexIds) -> Self {
        Self {
            agent_id: outcome.agent.0,
            status:   outcome.status,
            replans:  outcome.replans,
            waits:    outcome.waits,
            path:     outcome.history.iter().map(|&v| ids.original(v)).collect(),
        }
    }
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:      u64,
    pub active:    u64,
    pub advanced:  u64,
    pub waiting:   u64,
    pub replanned: u64,
    pub arrived:   u64,
    pub stuck:     u64,
    pub max_load:  u32,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:      s.tick.0,
            active:    s.active as u64,
            advanced:  s.advanced as u64,
            waiting:   s.waiting as u64,
            replanned: s.replanned as u64,
            arrived:   s.arrived as u64,
            stuck:     s.stuck as u64,
            max_load:  s.max_load,
        }
    }
}
