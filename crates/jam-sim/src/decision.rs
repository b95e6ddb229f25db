//! Per-agent decision phase.
//!
//! [`Planner::decide`] is a pure function of the agent's own state and the
//! graph as committed at the end of the previous tick.  It never writes
//! shared state, so every agent's decision can be computed independently
//! (and in parallel).  The engine applies the resulting [`Decision`]s
//! afterwards, in ascending `AgentId` order.

use std::collections::VecDeque;

use jam_core::{AgentId, EdgeId, VertexId};
use jam_fleet::{AgentState, Car};
use jam_graph::{CostPolicy, EdgeWeights, Graph, GraphError, Router};

// ── Decision ──────────────────────────────────────────────────────────────────

/// What an agent intends to do this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Cross `edge` from `from` to `to`.  Subject to capacity admission.
    Advance { from: VertexId, to: VertexId, edge: EdgeId },
    /// Stay put for the tick.
    Wait,
    /// Already at the destination.
    Arrive,
    /// No path to the destination exists.
    Stuck,
}

/// One agent's output from the decision phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub agent:     AgentId,
    pub action:    Action,
    /// Route found by a search this tick, starting at the current position.
    /// `None` keeps the existing route.
    pub route:     Option<VecDeque<VertexId>>,
    /// Whether a search ran this tick.
    pub replanned: bool,
}

impl Decision {
    fn keep(agent: AgentId, action: Action) -> Self {
        Self { agent, action, route: None, replanned: false }
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

/// Read-only view of everything an agent may consult while deciding.
pub struct Planner<'a, P: CostPolicy + ?Sized, R: Router + ?Sized> {
    pub graph:            &'a Graph,
    pub policy:           &'a P,
    pub router:           &'a R,
    pub replan_threshold: f64,
    /// Loads only grow during the run, so a full edge stays full.
    pub loads_persist:    bool,
}

impl<P: CostPolicy + ?Sized, R: Router + ?Sized> Planner<'_, P, R> {
    /// Decide `agent`'s action for this tick.
    ///
    /// 1. At the destination: arrive, no search.
    /// 2. Replan if there is no usable next hop, the next hop has no incident
    ///    edge, or the policy flags the next edge.
    /// 3. A search that fails under current costs is retried over every edge
    ///    that can still open up ([`EdgeWeights::Passable`]) when the policy
    ///    can block edges.  Success there means the congestion is transient,
    ///    so the agent keeps the route and waits.  Failure in every search
    ///    means the agent is stuck.
    /// 4. Otherwise advance one hop.
    pub fn decide(&self, agent: AgentId, car: &Car, state: &AgentState) -> Decision {
        let position = state.position;
        if position == car.destination {
            return Decision::keep(agent, Action::Arrive);
        }

        if let Some(next) = state.next_hop() {
            match self.graph.edge_between(position, next) {
                Some(edge) if !self.flags(edge) => {
                    return Decision::keep(agent, Action::Advance { from: position, to: next, edge });
                }
                Some(_) => {}
                None => log::warn!(
                    "{agent}: route hop {position} -> {next} has no incident edge, replanning"
                ),
            }
        }

        self.replan(agent, position, car.destination)
    }

    /// Whether the policy wants an agent facing `edge` to search again.
    fn flags(&self, edge: EdgeId) -> bool {
        self.policy.needs_replan(
            self.graph.base_cost(edge),
            self.graph.current_cost(edge),
            self.replan_threshold,
        )
    }

    fn replan(&self, agent: AgentId, from: VertexId, to: VertexId) -> Decision {
        let route = match self.search(from, to, EdgeWeights::Current) {
            Some(route) => route,
            None if self.policy.may_block() => match self.search(from, to, self.passable()) {
                Some(route) => {
                    log::debug!("{agent}: every route from {from} is congested, waiting");
                    return Decision {
                        agent,
                        action: Action::Wait,
                        route: Some(route),
                        replanned: true,
                    };
                }
                None => return stuck(agent, from, to),
            },
            None => return stuck(agent, from, to),
        };

        let action = match route.get(1).copied() {
            Some(next) => match self.graph.edge_between(from, next) {
                Some(edge) if self.graph.current_cost(edge).is_finite() => {
                    Action::Advance { from, to: next, edge }
                }
                _ => Action::Wait,
            },
            None => Action::Arrive,
        };

        Decision { agent, action, route: Some(route), replanned: true }
    }

    fn passable(&self) -> EdgeWeights {
        EdgeWeights::Passable { loads_persist: self.loads_persist }
    }

    fn search(&self, from: VertexId, to: VertexId, weights: EdgeWeights) -> Option<VecDeque<VertexId>> {
        match self.router.route(self.graph, from, to, weights) {
            Ok(route) => Some(route.vertices.into()),
            Err(GraphError::NoRoute { .. }) => None,
            Err(e) => {
                log::warn!("search {from} -> {to} failed: {e}");
                None
            }
        }
    }
}

fn stuck(agent: AgentId, from: VertexId, to: VertexId) -> Decision {
    log::debug!("{agent}: no route from {from} to {to}, stuck");
    Decision { agent, action: Action::Stuck, route: None, replanned: true }
}
