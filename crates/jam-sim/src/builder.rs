//! Fluent builder for constructing a [`Sim`].

use jam_core::{SimConfig, Tick};
use jam_fleet::FleetStore;
use jam_graph::{AStarRouter, ConfiguredPolicy, CostPolicy, Router};

use crate::{Problem, Sim, SimResult};

/// Fluent builder for [`Sim<P, R>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — threshold, tick ceiling, load accounting, threads
/// - [`Problem`] — graph plus cars, already validated
/// - `P: CostPolicy` — the edge cost strategy
/// - `R: Router` — the search (e.g. [`AStarRouter`])
///
/// [`SimBuilder::from_config`] picks the policy named in the config and A*.
///
/// # Example
///
/// ```rust,ignore
/// let problem = Problem::new(graph, cars)?;
/// let mut sim = SimBuilder::from_config(SimConfig::default(), problem).build()?;
/// let report = sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<P: CostPolicy, R: Router> {
    config:  SimConfig,
    problem: Problem,
    policy:  P,
    router:  R,
}

impl SimBuilder<ConfiguredPolicy, AStarRouter> {
    /// Builder using `config.cost_policy` and [`AStarRouter`].
    pub fn from_config(config: SimConfig, problem: Problem) -> Self {
        let policy = ConfiguredPolicy::from(config.cost_policy);
        Self::new(config, problem, policy, AStarRouter)
    }
}

impl<P: CostPolicy, R: Router> SimBuilder<P, R> {
    /// Create a builder with all required inputs.
    ///
    /// `policy` is used as given; `config.cost_policy` is not consulted.
    pub fn new(config: SimConfig, problem: Problem, policy: P, router: R) -> Self {
        Self { config, problem, policy, router }
    }

    /// Swap the search implementation.
    pub fn router<R2: Router>(self, router: R2) -> SimBuilder<P, R2> {
        SimBuilder {
            config:  self.config,
            problem: self.problem,
            policy:  self.policy,
            router,
        }
    }

    /// Validate the configuration, derive initial edge costs, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P, R>> {
        self.config.validate()?;

        let Problem { mut graph, cars } = self.problem;
        graph.refresh_costs(&self.policy);

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| crate::SimError::Config(format!("thread pool: {e}")))?,
            ),
            None => None,
        };

        log::debug!(
            "sim ready: {} vertices, {} edges, {} agents",
            graph.vertex_count(),
            graph.edge_count(),
            cars.len()
        );

        let crossings = vec![0; graph.edge_count()];
        Ok(Sim {
            config:     self.config,
            graph,
            fleet:      FleetStore::new(cars),
            policy:     self.policy,
            router:     self.router,
            tick:       Tick::ZERO,
            crossings,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
