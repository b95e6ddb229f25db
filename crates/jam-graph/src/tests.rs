//! Unit tests for jam-graph.
//!
//! All tests use small hand-built graphs with unit grid coordinates.

#[cfg(test)]
mod helpers {
    use jam_core::{Point, VertexId};
    use crate::{Graph, GraphBuilder};

    /// Vertices 0..n on the x axis joined in a line, every edge capacity `cap`.
    pub fn line(n: u32, cap: u32) -> Graph {
        let mut b = GraphBuilder::new();
        for i in 0..n {
            b.add_vertex(Point::new(i as f64, 0.0));
        }
        for i in 1..n {
            b.add_edge(VertexId(i - 1), VertexId(i), cap);
        }
        b.build().unwrap()
    }

    /// Two routes from 0 to 4:
    ///
    /// ```text
    ///   0:(0,0) ─ 1:(1,0) ─ 2:(2,0)
    ///   │                     │
    ///   3:(0,1) ───────────── 4:(2,1)
    /// ```
    ///
    /// Edges: e0 0-1, e1 1-2, e2 2-4, e3 0-3, e4 3-4 (cost 10).
    /// Shortest 0→4 is 0-1-2-4 with cost 3; 0-3-4 costs 11.
    pub fn detour() -> Graph {
        let mut b = GraphBuilder::new();
        let v0 = b.add_vertex(Point::new(0.0, 0.0));
        let v1 = b.add_vertex(Point::new(1.0, 0.0));
        let v2 = b.add_vertex(Point::new(2.0, 0.0));
        let v3 = b.add_vertex(Point::new(0.0, 1.0));
        let v4 = b.add_vertex(Point::new(2.0, 1.0));
        b.add_edge(v0, v1, 1);
        b.add_edge(v1, v2, 1);
        b.add_edge(v2, v4, 1);
        b.add_edge(v0, v3, 1);
        b.add_weighted_edge(v3, v4, 1, 10.0);
        b.build().unwrap()
    }

    pub fn vs(ids: &[u32]) -> Vec<VertexId> {
        ids.iter().map(|&i| VertexId(i)).collect()
    }
}

// ── Builder & structure ───────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use jam_core::{EdgeId, Point, VertexId};
    use crate::{GraphBuilder, GraphError};

    #[test]
    fn empty_build() {
        let g = GraphBuilder::new().build().unwrap();
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
        assert_eq!(g.max_load(), 0);
        assert_eq!(g.cost_scale(), 0.0);
    }

    #[test]
    fn manhattan_base_cost() {
        let mut b = GraphBuilder::new();
        let a = b.add_vertex(Point::new(0.0, 0.0));
        let c = b.add_vertex(Point::new(3.0, -4.0));
        let e = b.add_edge(a, c, 2);
        let g = b.build().unwrap();
        assert_eq!(g.base_cost(e), 7.0);
        assert_eq!(g.current_cost(e), 7.0);
        assert_eq!(g.capacity(e), 2);
        assert_eq!(g.load(e), 0);
    }

    #[test]
    fn explicit_weight_overrides_distance() {
        let mut b = GraphBuilder::new();
        let a = b.add_vertex(Point::new(0.0, 0.0));
        let c = b.add_vertex(Point::new(1.0, 0.0));
        let e = b.add_weighted_edge(a, c, 1, 5.5);
        let g = b.build().unwrap();
        assert_eq!(g.base_cost(e), 5.5);
    }

    #[test]
    fn out_of_range_vertex_rejected() {
        let mut b = GraphBuilder::new();
        let a = b.add_vertex(Point::new(0.0, 0.0));
        b.add_edge(a, VertexId(7), 1);
        match b.build() {
            Err(GraphError::VertexOutOfRange { edge, vertex, vertex_count }) => {
                assert_eq!(edge, EdgeId(0));
                assert_eq!(vertex, VertexId(7));
                assert_eq!(vertex_count, 1);
            }
            other => panic!("expected VertexOutOfRange, got {:?}", other.err()),
        }
    }

    #[test]
    fn self_loop_rejected() {
        let mut b = GraphBuilder::new();
        let a = b.add_vertex(Point::new(0.0, 0.0));
        b.add_edge(a, a, 1);
        assert!(matches!(b.build(), Err(GraphError::SelfLoop { .. })));
    }

    #[test]
    fn negative_and_nan_costs_rejected() {
        for cost in [-1.0, f64::NAN, f64::INFINITY] {
            let mut b = GraphBuilder::new();
            let a = b.add_vertex(Point::new(0.0, 0.0));
            let c = b.add_vertex(Point::new(1.0, 0.0));
            b.add_weighted_edge(a, c, 1, cost);
            assert!(matches!(b.build(), Err(GraphError::InvalidCost { .. })), "cost {cost}");
        }
    }

    #[test]
    fn each_edge_listed_once_per_endpoint() {
        let g = super::helpers::detour();
        assert_eq!(g.incident.len(), 2 * g.edge_count());
        for e in 0..g.edge_count() {
            let e = EdgeId(e as u32);
            let (a, b) = g.endpoints(e);
            assert_eq!(g.incident_edges(a).filter(|&x| x == e).count(), 1);
            assert_eq!(g.incident_edges(b).filter(|&x| x == e).count(), 1);
        }
        for v in 0..g.vertex_count() {
            let v = VertexId(v as u32);
            for e in g.incident_edges(v) {
                let (a, b) = g.endpoints(e);
                assert!(a == v || b == v);
            }
        }
    }

    #[test]
    fn incident_edges_sorted() {
        let g = super::helpers::detour();
        let at0: Vec<_> = g.incident_edges(VertexId(0)).collect();
        assert_eq!(at0, vec![EdgeId(0), EdgeId(3)]);
        assert_eq!(g.degree(VertexId(4)), 2);
    }

    #[test]
    fn edge_between_prefers_cheapest_parallel_edge() {
        let mut b = GraphBuilder::new();
        let a = b.add_vertex(Point::new(0.0, 0.0));
        let c = b.add_vertex(Point::new(1.0, 0.0));
        b.add_weighted_edge(a, c, 1, 4.0);
        let cheap = b.add_weighted_edge(a, c, 1, 2.0);
        let g = b.build().unwrap();
        assert_eq!(g.edge_between(a, c), Some(cheap));
        assert_eq!(g.edge_between(c, a), Some(cheap));
        assert_eq!(g.edge_between(a, a), None);
        assert_eq!(g.edge_between(a, VertexId(9)), None);
    }

    #[test]
    fn other_end_is_symmetric() {
        let g = super::helpers::line(3, 1);
        let e = g.edge_between(VertexId(1), VertexId(2)).unwrap();
        assert_eq!(g.other_end(e, VertexId(1)), VertexId(2));
        assert_eq!(g.other_end(e, VertexId(2)), VertexId(1));
    }

    #[test]
    fn cost_scale_is_min_cost_per_distance() {
        let g = super::helpers::detour();
        // e4 spans 2 units at cost 10; every other edge costs its length.
        assert_eq!(g.cost_scale(), 1.0);

        let mut b = GraphBuilder::new();
        let a = b.add_vertex(Point::new(0.0, 0.0));
        let c = b.add_vertex(Point::new(4.0, 0.0));
        b.add_weighted_edge(a, c, 1, 2.0);
        let g = b.build().unwrap();
        assert_eq!(g.cost_scale(), 0.5);
    }
}

// ── Loads ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loads {
    use jam_core::EdgeId;
    use crate::{Blocking, Penalty};

    #[test]
    fn recompute_counts_traversals() {
        let mut g = super::helpers::line(4, 2);
        g.recompute_loads([EdgeId(0), EdgeId(0), EdgeId(2)]);
        assert_eq!(g.loads(), &[2, 0, 1]);
        assert_eq!(g.max_load(), 2);
    }

    #[test]
    fn recompute_resets_previous_loads() {
        let mut g = super::helpers::line(4, 2);
        g.recompute_loads([EdgeId(0), EdgeId(1)]);
        g.recompute_loads([EdgeId(2)]);
        assert_eq!(g.loads(), &[0, 0, 1]);
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut g = super::helpers::line(5, 1);
        let moves = [EdgeId(3), EdgeId(1), EdgeId(3)];
        g.recompute_loads(moves);
        let first = g.loads().to_vec();
        g.recompute_loads(moves);
        assert_eq!(g.loads(), first.as_slice());
    }

    #[test]
    fn assign_overwrites_every_load() {
        let mut g = super::helpers::line(4, 2);
        g.recompute_loads([EdgeId(0), EdgeId(0)]);
        g.assign_loads(&[0, 3, 1]);
        assert_eq!(g.loads(), &[0, 3, 1]);
        assert_eq!(g.max_load(), 3);
    }

    #[test]
    fn refresh_costs_blocking() {
        let mut g = super::helpers::line(3, 1);
        g.recompute_loads([EdgeId(0)]);
        g.refresh_costs(&Blocking);
        assert!(g.current_cost(EdgeId(0)).is_infinite());
        assert_eq!(g.current_cost(EdgeId(1)), 1.0);
    }

    #[test]
    fn refresh_costs_penalty() {
        let mut g = super::helpers::line(3, 1);
        g.recompute_loads([EdgeId(0), EdgeId(0), EdgeId(0)]);
        g.refresh_costs(&Penalty::new(0.5));
        // overload 2 → 1 * (1 + 0.5 * 2)
        assert_eq!(g.current_cost(EdgeId(0)), 2.0);
        assert_eq!(g.current_cost(EdgeId(1)), 1.0);
    }
}

// ── Cost policies ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod policies {
    use jam_core::{CostPolicyKind, VertexId};
    use crate::{heuristic, Blocking, ConfiguredPolicy, CostPolicy, EdgeWeights, Penalty};

    #[test]
    fn blocking_threshold_is_capacity() {
        let p = Blocking;
        assert_eq!(p.dynamic_cost(3.0, 0, 1), 3.0);
        assert!(p.dynamic_cost(3.0, 1, 1).is_infinite());
        assert!(p.dynamic_cost(3.0, 5, 1).is_infinite());
        assert!(p.dynamic_cost(3.0, 0, 0).is_infinite());
        assert!(p.admits(0, 1));
        assert!(!p.admits(1, 1));
        assert!(p.may_block());
    }

    #[test]
    fn blocking_replans_only_on_impassable() {
        let p = Blocking;
        assert!(!p.needs_replan(1.0, 1.0, 1.2));
        assert!(p.needs_replan(1.0, f64::INFINITY, 1.2));
    }

    #[test]
    fn penalty_never_blocks() {
        let p = Penalty::new(2.0);
        assert_eq!(p.dynamic_cost(1.0, 1, 1), 1.0);
        assert_eq!(p.dynamic_cost(1.0, 3, 1), 5.0);
        assert!(p.dynamic_cost(1.0, 1_000, 1).is_finite());
        assert!(p.admits(1_000, 1));
        assert!(!p.may_block());
    }

    #[test]
    fn penalty_replan_threshold_is_strict() {
        let p = Penalty::new(1.0);
        assert!(!p.needs_replan(10.0, 12.0, 1.2));
        assert!(p.needs_replan(10.0, 12.5, 1.2));
    }

    #[test]
    fn zero_factor_penalty_is_free_flow() {
        let p = Penalty::new(0.0);
        assert_eq!(p.dynamic_cost(4.0, 9, 1), 4.0);
    }

    #[test]
    fn configured_policy_delegates() {
        let blocking = ConfiguredPolicy::from(CostPolicyKind::Blocking);
        assert!(blocking.may_block());
        assert!(blocking.dynamic_cost(1.0, 1, 1).is_infinite());

        let penalty = ConfiguredPolicy::from(CostPolicyKind::Penalty { congestion_factor: 1.0 });
        assert!(!penalty.may_block());
        assert_eq!(penalty.dynamic_cost(1.0, 2, 1), 2.0);
        assert!(penalty.needs_replan(1.0, 2.0, 1.2));
    }

    #[test]
    fn passable_weights_ignore_transient_load() {
        let mut g = super::helpers::line(2, 1);
        let e = g.edge_between(VertexId(0), VertexId(1)).unwrap();
        g.recompute_loads([e]);
        g.refresh_costs(&Blocking);
        assert!(EdgeWeights::Current.weight(&g, e).is_infinite());
        assert_eq!(EdgeWeights::Passable { loads_persist: false }.weight(&g, e), 1.0);
    }

    #[test]
    fn passable_weights_drop_permanently_full_edges() {
        let mut g = super::helpers::line(2, 1);
        let e = g.edge_between(VertexId(0), VertexId(1)).unwrap();
        assert_eq!(EdgeWeights::Passable { loads_persist: true }.weight(&g, e), 1.0);
        g.recompute_loads([e]);
        assert!(EdgeWeights::Passable { loads_persist: true }.weight(&g, e).is_infinite());

        let closed = super::helpers::line(2, 0);
        let e = closed.edge_between(VertexId(0), VertexId(1)).unwrap();
        assert!(EdgeWeights::Passable { loads_persist: false }.weight(&closed, e).is_infinite());
    }

    #[test]
    fn heuristic_is_scaled_manhattan() {
        let g = super::helpers::detour();
        assert_eq!(heuristic(&g, VertexId(0), VertexId(4)), 3.0);
        assert_eq!(heuristic(&g, VertexId(4), VertexId(4)), 0.0);
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use jam_core::{Point, VertexId};
    use crate::{
        AStarRouter, Blocking, DijkstraRouter, EdgeWeights, GraphBuilder, GraphError, Router,
    };
    use super::helpers::vs;

    #[test]
    fn trivial_route() {
        let g = super::helpers::line(3, 1);
        let r = AStarRouter.route(&g, VertexId(1), VertexId(1), EdgeWeights::Current).unwrap();
        assert_eq!(r.vertices, vs(&[1]));
        assert_eq!(r.cost, 0.0);
        assert!(r.is_trivial());
        assert_eq!(r.hops(), 0);
    }

    #[test]
    fn line_route() {
        let g = super::helpers::line(4, 1);
        let r = AStarRouter.route(&g, VertexId(0), VertexId(3), EdgeWeights::Current).unwrap();
        assert_eq!(r.vertices, vs(&[0, 1, 2, 3]));
        assert_eq!(r.cost, 3.0);
        assert_eq!(r.hops(), 3);
    }

    #[test]
    fn unique_shortest_path_found() {
        let g = super::helpers::detour();
        let r = AStarRouter.route(&g, VertexId(0), VertexId(4), EdgeWeights::Current).unwrap();
        assert_eq!(r.vertices, vs(&[0, 1, 2, 4]));
        assert_eq!(r.cost, 3.0);
    }

    #[test]
    fn reverse_direction_uses_same_edges() {
        let g = super::helpers::detour();
        let r = AStarRouter.route(&g, VertexId(4), VertexId(0), EdgeWeights::Current).unwrap();
        assert_eq!(r.vertices, vs(&[4, 2, 1, 0]));
    }

    #[test]
    fn blocked_edge_forces_detour() {
        let mut g = super::helpers::detour();
        let e12 = g.edge_between(VertexId(1), VertexId(2)).unwrap();
        g.recompute_loads([e12]);
        g.refresh_costs(&Blocking);

        let r = AStarRouter.route(&g, VertexId(0), VertexId(4), EdgeWeights::Current).unwrap();
        assert_eq!(r.vertices, vs(&[0, 3, 4]));
        assert_eq!(r.cost, 11.0);

        // The load is transient, so the short path is still passable.
        let passable = EdgeWeights::Passable { loads_persist: false };
        let free = AStarRouter.route(&g, VertexId(0), VertexId(4), passable).unwrap();
        assert_eq!(free.vertices, vs(&[0, 1, 2, 4]));
    }

    #[test]
    fn fully_blocked_region_is_no_route() {
        let mut g = super::helpers::line(3, 1);
        let e = g.edge_between(VertexId(0), VertexId(1)).unwrap();
        g.recompute_loads([e]);
        g.refresh_costs(&Blocking);
        let err = AStarRouter.route(&g, VertexId(0), VertexId(2), EdgeWeights::Current);
        assert!(matches!(err, Err(GraphError::NoRoute { .. })));
    }

    #[test]
    fn disconnected_components_no_route() {
        let mut b = GraphBuilder::new();
        let a = b.add_vertex(Point::new(0.0, 0.0));
        let c = b.add_vertex(Point::new(1.0, 0.0));
        let d = b.add_vertex(Point::new(5.0, 0.0));
        let f = b.add_vertex(Point::new(6.0, 0.0));
        b.add_edge(a, c, 1);
        b.add_edge(d, f, 1);
        let g = b.build().unwrap();

        match AStarRouter.route(&g, a, f, EdgeWeights::Passable { loads_persist: false }) {
            Err(GraphError::NoRoute { from, to }) => {
                assert_eq!(from, a);
                assert_eq!(to, f);
            }
            other => panic!("expected NoRoute, got {other:?}"),
        }
    }

    #[test]
    fn unknown_vertex_reported() {
        let g = super::helpers::line(2, 1);
        let err = AStarRouter.route(&g, VertexId(0), VertexId(9), EdgeWeights::Current);
        assert!(matches!(err, Err(GraphError::VertexNotFound(VertexId(9)))));
    }

    #[test]
    fn astar_matches_dijkstra_cost() {
        let g = super::helpers::detour();
        for from in 0..5 {
            for to in 0..5 {
                let (from, to) = (VertexId(from), VertexId(to));
                let a = AStarRouter.route(&g, from, to, EdgeWeights::Current).unwrap();
                let d = DijkstraRouter.route(&g, from, to, EdgeWeights::Current).unwrap();
                assert_eq!(a.cost, d.cost, "{from} → {to}");
            }
        }
    }

    #[test]
    fn route_cost_matches_edges() {
        let g = super::helpers::detour();
        let r = AStarRouter.route(&g, VertexId(3), VertexId(2), EdgeWeights::Current).unwrap();
        let sum: f64 = r
            .vertices
            .windows(2)
            .map(|w| g.current_cost(g.edge_between(w[0], w[1]).unwrap()))
            .sum();
        assert_eq!(r.cost, sum);
    }
}
