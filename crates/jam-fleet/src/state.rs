//! Per-agent routing state.

use std::collections::VecDeque;
use std::fmt;

use jam_core::VertexId;

/// Lifecycle status of one agent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentStatus {
    /// No route has been computed yet.
    #[default]
    NoRoute,
    /// A search is pending for this tick.
    Planning,
    /// Following a route.
    EnRoute,
    /// Held in place for one tick by congestion.
    Waiting,
    /// No path to the destination exists.  Terminal.
    Stuck,
    /// At the destination.  Terminal.
    Arrived,
}

impl AgentStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Stuck | Self::Arrived)
    }

    /// Lowercase name used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoRoute  => "no_route",
            Self::Planning => "planning",
            Self::EnRoute  => "en_route",
            Self::Waiting  => "waiting",
            Self::Stuck    => "stuck",
            Self::Arrived  => "arrived",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable routing state for a single agent.
///
/// `route` holds the remaining planned vertices **including** the current
/// position at its front, so a usable route has at least two entries.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentState {
    pub position:  VertexId,
    pub route:     VecDeque<VertexId>,
    pub status:    AgentStatus,
    /// Searches run for this agent so far.
    pub replans:   u32,
    /// Ticks spent waiting.
    pub waits:     u32,
    /// Sum of the base costs of every edge crossed.
    pub travelled: f64,
}

impl AgentState {
    /// Fresh state at `origin` with no route.
    pub fn at(origin: VertexId) -> Self {
        Self {
            position:  origin,
            route:     VecDeque::new(),
            status:    AgentStatus::NoRoute,
            replans:   0,
            waits:     0,
            travelled: 0.0,
        }
    }

    /// The vertex after the current position, if the route has one.
    #[inline]
    pub fn next_hop(&self) -> Option<VertexId> {
        if self.route.front() == Some(&self.position) {
            self.route.get(1).copied()
        } else {
            None
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
