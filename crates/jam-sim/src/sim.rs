//! The `Sim` struct and its tick loop.

use jam_core::{AgentId, EdgeId, LoadAccounting, SimConfig, Tick};
use jam_fleet::{AgentStatus, FleetStore};
use jam_graph::{CostPolicy, Graph, Router};

use crate::decision::{Action, Decision, Planner};
use crate::{SimObserver, SimReport, Termination, TickSummary};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The congestion-aware routing engine.
///
/// `Sim<P, R>` owns the graph and every agent's state and drives the tick
/// loop:
///
/// 1. **Decision phase** (optionally parallel with the `parallel` feature):
///    every non-terminal agent decides to advance, wait, arrive, or give up,
///    reading only its own state and the costs committed last tick.
/// 2. **Apply phase** (sequential, ascending `AgentId`): decisions are
///    committed.  Moves onto an edge are admitted only while the policy
///    accepts one more entrant this tick; rejected agents wait.
/// 3. **Commit**: loads are rewritten under the configured
///    [`LoadAccounting`] and dynamic costs are refreshed.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: CostPolicy, R: Router> {
    /// Run configuration (threshold, ceiling, accounting, threads).
    pub config: SimConfig,

    /// Road graph.  Only loads and dynamic costs change during a run.
    pub graph: Graph,

    /// Trips, per-agent state, and movement histories.
    pub fleet: FleetStore,

    pub policy: P,
    pub router: R,

    /// The next tick to execute; equals the number of ticks run so far.
    pub(crate) tick: Tick,

    /// Committed traversals per edge since tick 0, indexed by `EdgeId`.
    /// Only advanced under [`LoadAccounting::Cumulative`].
    pub(crate) crossings: Vec<u32>,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<P: CostPolicy, R: Router> Sim<P, R> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until every agent is terminal or the tick ceiling is reached.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimReport {
        let termination = loop {
            if self.fleet.all_terminal() {
                break Termination::Converged;
            }
            if self.tick.0 >= self.config.tick_ceiling {
                log::warn!(
                    "tick ceiling {} reached with {} agents still active",
                    self.config.tick_ceiling,
                    self.fleet.active_count()
                );
                break Termination::TickCeiling;
            }
            self.step(observer);
        };

        observer.on_sim_end(self.tick, termination);
        log::info!(
            "run {termination} after {} ticks: {} arrived, {} stuck, {} active",
            self.tick.0,
            self.fleet.count_status(AgentStatus::Arrived),
            self.fleet.count_status(AgentStatus::Stuck),
            self.fleet.active_count()
        );
        SimReport::collect(&self.fleet, self.tick.0, termination)
    }

    /// Run exactly `n` ticks from the current position, ignoring the ceiling
    /// and convergence.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> Vec<TickSummary> {
        (0..n).map(|_| self.step(observer)).collect()
    }

    /// Execute one tick.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> TickSummary {
        let now = self.tick;
        observer.on_tick_start(now);

        for state in &mut self.fleet.states {
            if state.status == AgentStatus::NoRoute {
                state.status = AgentStatus::Planning;
            }
        }

        // ── Phase 1: decisions (produce) ──────────────────────────────────
        let decisions = self.compute_decisions();

        // ── Phase 2: apply (consume) ──────────────────────────────────────
        let mut summary = TickSummary { tick: now, ..TickSummary::default() };
        let moves = self.apply_decisions(decisions, &mut summary);

        // ── Phase 3: commit loads and costs ───────────────────────────────
        self.commit_loads(moves);

        summary.active   = self.fleet.active_count();
        summary.max_load = self.graph.max_load();

        observer.on_snapshot(now, &self.fleet, &self.graph);
        observer.on_tick_end(&summary);

        self.tick = now.next();
        summary
    }

    /// Number of ticks executed so far.
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Decide for every non-terminal agent, in ascending `AgentId` order.
    ///
    /// With the `parallel` Cargo feature the decisions run on Rayon's thread
    /// pool; the collected order is the same.
    fn compute_decisions(&self) -> Vec<Decision> {
        let planner = Planner {
            graph:            &self.graph,
            policy:           &self.policy,
            router:           &self.router,
            replan_threshold: self.config.replan_threshold,
            loads_persist:    self.config.load_accounting == LoadAccounting::Cumulative,
        };
        let fleet = &self.fleet;
        let active: Vec<AgentId> = fleet
            .agent_ids()
            .filter(|&agent| !fleet.state(agent).is_terminal())
            .collect();

        #[cfg(not(feature = "parallel"))]
        {
            active
                .iter()
                .map(|&agent| planner.decide(agent, &fleet.cars[agent.index()], fleet.state(agent)))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let decide_all = || -> Vec<Decision> {
                active
                    .par_iter()
                    .map(|&agent| planner.decide(agent, &fleet.cars[agent.index()], fleet.state(agent)))
                    .collect()
            };
            match &self.pool {
                Some(pool) => pool.install(decide_all),
                None       => decide_all(),
            }
        }
    }

    /// Commit decisions and return the edges crossed this tick.
    fn apply_decisions(&mut self, decisions: Vec<Decision>, summary: &mut TickSummary) -> Vec<EdgeId> {
        // Occupancy each edge would carry after this tick's commit.
        let mut occupancy: Vec<u32> = match self.config.load_accounting {
            LoadAccounting::PerTick    => vec![0; self.graph.edge_count()],
            LoadAccounting::Cumulative => self.graph.loads().to_vec(),
        };
        let mut moves = Vec::new();

        for Decision { agent, action, route, replanned } in decisions {
            if replanned {
                summary.replanned += 1;
                match route {
                    Some(route) => self.fleet.adopt_route(agent, route),
                    None        => self.fleet.record_failed_search(agent),
                }
            }

            match action {
                Action::Arrive => {
                    self.fleet.set_status(agent, AgentStatus::Arrived);
                    summary.arrived += 1;
                }
                Action::Stuck => {
                    self.fleet.set_status(agent, AgentStatus::Stuck);
                    summary.stuck += 1;
                }
                Action::Wait => {
                    self.fleet.hold(agent);
                    summary.waiting += 1;
                }
                Action::Advance { to, edge, .. } => {
                    let load = &mut occupancy[edge.index()];
                    if !self.policy.admits(*load, self.graph.capacity(edge)) {
                        log::trace!("{agent}: {edge} full this tick, holding");
                        self.fleet.hold(agent);
                        summary.waiting += 1;
                        continue;
                    }
                    *load += 1;
                    moves.push(edge);
                    self.fleet.advance(agent, to, self.graph.base_cost(edge));
                    summary.advanced += 1;

                    if to == self.fleet.car(agent).destination {
                        self.fleet.set_status(agent, AgentStatus::Arrived);
                        summary.arrived += 1;
                    } else {
                        self.fleet.set_status(agent, AgentStatus::EnRoute);
                    }
                }
            }
        }
        moves
    }

    /// Rewrite every edge load, then every dynamic cost.
    fn commit_loads(&mut self, moves: Vec<EdgeId>) {
        match self.config.load_accounting {
            LoadAccounting::PerTick => self.graph.recompute_loads(moves),
            LoadAccounting::Cumulative => {
                for e in moves {
                    self.crossings[e.index()] += 1;
                }
                self.graph.assign_loads(&self.crossings);
            }
        }
        self.graph.refresh_costs(&self.policy);
    }
}
