//! The `FleetStore` — every agent's trip, state and movement history.

use std::collections::VecDeque;

use jam_core::{AgentId, VertexId};

use crate::{AgentState, AgentStatus, Car};

/// Per-agent data, indexed by `AgentId`.
///
/// All three vectors always have the same length.  `histories[i]` starts with
/// the origin of `cars[i]` and gains one vertex for every committed move.
pub struct FleetStore {
    pub cars:      Vec<Car>,
    pub states:    Vec<AgentState>,
    pub histories: Vec<Vec<VertexId>>,
}

impl FleetStore {
    /// Every agent at its origin with no route.
    pub fn new(cars: Vec<Car>) -> Self {
        let states    = cars.iter().map(|c| AgentState::at(c.origin)).collect();
        let histories = cars.iter().map(|c| vec![c.origin]).collect();
        Self { cars, states, histories }
    }

    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    /// Iterator over every agent id in ascending order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + use<> {
        (0..self.cars.len() as u32).map(AgentId)
    }

    #[inline]
    pub fn car(&self, agent: AgentId) -> Car {
        self.cars[agent.index()]
    }

    #[inline]
    pub fn state(&self, agent: AgentId) -> &AgentState {
        &self.states[agent.index()]
    }

    #[inline]
    pub fn history(&self, agent: AgentId) -> &[VertexId] {
        &self.histories[agent.index()]
    }

    #[inline]
    pub fn status(&self, agent: AgentId) -> AgentStatus {
        self.states[agent.index()].status
    }

    pub fn all_terminal(&self) -> bool {
        self.states.iter().all(AgentState::is_terminal)
    }

    /// Number of agents not yet `Arrived` or `Stuck`.
    pub fn active_count(&self) -> usize {
        self.states.iter().filter(|s| !s.is_terminal()).count()
    }

    pub fn count_status(&self, status: AgentStatus) -> usize {
        self.states.iter().filter(|s| s.status == status).count()
    }

    // ── Mutation (engine apply phase) ─────────────────────────────────────

    pub fn set_status(&mut self, agent: AgentId, status: AgentStatus) {
        self.states[agent.index()].status = status;
    }

    /// Replace the remaining route and count one search.
    pub fn adopt_route(&mut self, agent: AgentId, route: VecDeque<VertexId>) {
        let state = &mut self.states[agent.index()];
        state.route = route;
        state.replans += 1;
    }

    /// Count a search that found nothing.
    pub fn record_failed_search(&mut self, agent: AgentId) {
        let state = &mut self.states[agent.index()];
        state.route.clear();
        state.replans += 1;
    }

    /// Move `agent` one hop to `to` over an edge of base cost `cost`,
    /// dropping the old front of its route and appending `to` to its history.
    pub fn advance(&mut self, agent: AgentId, to: VertexId, cost: f64) {
        let state = &mut self.states[agent.index()];
        state.route.pop_front();
        state.position = to;
        state.travelled += cost;
        self.histories[agent.index()].push(to);
    }

    /// Hold `agent` in place for this tick.
    pub fn hold(&mut self, agent: AgentId) {
        let state = &mut self.states[agent.index()];
        state.status = AgentStatus::Waiting;
        state.waits += 1;
    }
}
