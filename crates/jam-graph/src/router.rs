//! Routing trait and best-first search implementations.
//!
//! # Pluggability
//!
//! `jam-sim` calls routing via the [`Router`] trait.  [`AStarRouter`] is the
//! engine default; [`DijkstraRouter`] runs the same search with a zero
//! heuristic and serves as a reference for optimality checks.
//!
//! # Freshness
//!
//! Dynamic costs change every tick, so nothing is cached between calls.  Each
//! call is a fresh search over the graph's current edge state.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use jam_core::VertexId;

use crate::{heuristic, EdgeWeights, Graph, GraphError, GraphResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Vertices from source to destination inclusive.
    pub vertices: Vec<VertexId>,
    /// Sum of the edge weights along the path.
    pub cost: f64,
}

impl Route {
    /// `true` if the source and destination are the same vertex.
    pub fn is_trivial(&self) -> bool {
        self.vertices.len() <= 1
    }

    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so they can be shared across Rayon
/// worker threads during the parallel decision phase.
pub trait Router: Send + Sync {
    /// Compute a route from `from` to `to` relaxing edges by `weights`.
    ///
    /// `from == to` yields a single-vertex route of cost 0.  A missing path
    /// is reported as [`GraphError::NoRoute`].
    fn route(
        &self,
        graph: &Graph,
        from: VertexId,
        to: VertexId,
        weights: EdgeWeights,
    ) -> GraphResult<Route>;
}

// ── Implementations ───────────────────────────────────────────────────────────

/// A* guided by [`heuristic`].
#[derive(Copy, Clone, Debug, Default)]
pub struct AStarRouter;

impl Router for AStarRouter {
    fn route(
        &self,
        graph: &Graph,
        from: VertexId,
        to: VertexId,
        weights: EdgeWeights,
    ) -> GraphResult<Route> {
        best_first(graph, from, to, weights, true)
    }
}

/// Uninformed search (A* with a zero heuristic).
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        graph: &Graph,
        from: VertexId,
        to: VertexId,
        weights: EdgeWeights,
    ) -> GraphResult<Route> {
        best_first(graph, from, to, weights, false)
    }
}

// ── Search internals ──────────────────────────────────────────────────────────

fn best_first(
    graph: &Graph,
    from: VertexId,
    to: VertexId,
    weights: EdgeWeights,
    use_heuristic: bool,
) -> GraphResult<Route> {
    for v in [from, to] {
        if !graph.contains_vertex(v) {
            return Err(GraphError::VertexNotFound(v));
        }
    }
    if from == to {
        return Ok(Route { vertices: vec![from], cost: 0.0 });
    }

    let h = |v: VertexId| if use_heuristic { heuristic(graph, v, to) } else { 0.0 };

    let n = graph.vertex_count();
    // g[v] = best known path cost to v.
    let mut g      = vec![f64::INFINITY; n];
    let mut parent = vec![VertexId::INVALID; n];
    let mut closed = vec![false; n];

    g[from.index()] = 0.0;

    // Min-heap on f = g + h.  Secondary key VertexId breaks ties toward the
    // lower id.
    let mut frontier: BinaryHeap<Reverse<(OrderedFloat<f64>, VertexId)>> = BinaryHeap::new();
    frontier.push(Reverse((OrderedFloat(h(from)), from)));

    while let Some(Reverse((_, v))) = frontier.pop() {
        if closed[v.index()] {
            continue;
        }
        if v == to {
            return Ok(reconstruct(&parent, from, to, g[to.index()]));
        }
        closed[v.index()] = true;

        for e in graph.incident_edges(v) {
            let w = weights.weight(graph, e);
            if !w.is_finite() {
                continue;
            }
            let u = graph.other_end(e, v);
            if closed[u.index()] {
                continue;
            }
            let candidate = g[v.index()] + w;
            if candidate < g[u.index()] {
                g[u.index()] = candidate;
                parent[u.index()] = v;
                frontier.push(Reverse((OrderedFloat(candidate + h(u)), u)));
            }
        }
    }

    Err(GraphError::NoRoute { from, to })
}

fn reconstruct(parent: &[VertexId], from: VertexId, to: VertexId, cost: f64) -> Route {
    let mut vertices = vec![to];
    let mut cur = to;
    while cur != from {
        cur = parent[cur.index()];
        vertices.push(cur);
    }
    vertices.reverse();
    Route { vertices, cost }
}
