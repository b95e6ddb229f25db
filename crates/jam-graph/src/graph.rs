//! Road graph representation and builder.
//!
//! # Data layout
//!
//! Edges live once, in structure-of-arrays form indexed by `EdgeId`
//! (`edge_a`, `edge_b`, `edge_capacity`, `edge_base_cost`, plus the mutable
//! `load` and `current_cost`).  Incidence uses **Compressed Sparse Row (CSR)**
//! format: the edges touching vertex `v` are
//!
//! ```text
//! incident[ incident_start[v] .. incident_start[v+1] ]
//! ```
//!
//! Each edge appears exactly once under each of its two endpoints.  Self-loops
//! are rejected at build time because they would appear twice under one
//! endpoint.
//!
//! # Mutation
//!
//! Topology is frozen by [`GraphBuilder::build`].  The only mutable state is
//! per-edge load and the dynamic cost derived from it, both rewritten in a
//! single pass by [`Graph::recompute_loads`] (or [`Graph::assign_loads`])
//! and [`Graph::refresh_costs`].

use jam_core::{EdgeId, Point, VertexId};

use crate::{CostPolicy, GraphError, GraphResult};

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Undirected road graph with one load counter per edge.
///
/// Static fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`GraphBuilder`].
pub struct Graph {
    // ── Vertex data ───────────────────────────────────────────────────────
    /// Position of each vertex.  Indexed by `VertexId`.
    pub vertex_pos: Vec<Point>,

    // ── CSR incidence ─────────────────────────────────────────────────────
    /// CSR row pointer.  Length = `vertex_count + 1`.
    pub incident_start: Vec<u32>,

    /// Incident `EdgeId`s grouped by vertex, ascending within each group.
    pub incident: Vec<EdgeId>,

    // ── Static edge data (indexed by EdgeId) ──────────────────────────────
    /// First endpoint as given to the builder.
    pub edge_a: Vec<VertexId>,

    /// Second endpoint as given to the builder.
    pub edge_b: Vec<VertexId>,

    /// Maximum number of concurrent occupants.
    pub edge_capacity: Vec<u32>,

    /// Load-independent traversal cost.
    pub edge_base_cost: Vec<f64>,

    // ── Dynamic edge data ─────────────────────────────────────────────────
    load:         Vec<u32>,
    current_cost: Vec<f64>,

    /// Minimum over all edges of `base_cost / manhattan(endpoints)`.  Scales
    /// Manhattan distance into an admissible cost lower bound.
    cost_scale: f64,
}

impl Graph {
    /// Construct an empty graph with no vertices or edges.
    pub fn empty() -> Self {
        Self {
            vertex_pos:     Vec::new(),
            incident_start: vec![0],
            incident:       Vec::new(),
            edge_a:         Vec::new(),
            edge_b:         Vec::new(),
            edge_capacity:  Vec::new(),
            edge_base_cost: Vec::new(),
            load:           Vec::new(),
            current_cost:   Vec::new(),
            cost_scale:     0.0,
        }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.vertex_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_pos.is_empty()
    }

    #[inline]
    pub fn contains_vertex(&self, v: VertexId) -> bool {
        v.index() < self.vertex_count()
    }

    #[inline]
    pub fn position(&self, v: VertexId) -> Point {
        self.vertex_pos[v.index()]
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all edges touching `v`.
    #[inline]
    pub fn incident_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.incident_start[v.index()] as usize;
        let end   = self.incident_start[v.index() + 1] as usize;
        self.incident[start..end].iter().copied()
    }

    #[inline]
    pub fn degree(&self, v: VertexId) -> usize {
        let start = self.incident_start[v.index()] as usize;
        let end   = self.incident_start[v.index() + 1] as usize;
        end - start
    }

    #[inline]
    pub fn endpoints(&self, e: EdgeId) -> (VertexId, VertexId) {
        (self.edge_a[e.index()], self.edge_b[e.index()])
    }

    /// The endpoint of `e` that is not `v`.
    #[inline]
    pub fn other_end(&self, e: EdgeId, v: VertexId) -> VertexId {
        let (a, b) = self.endpoints(e);
        if a == v { b } else { a }
    }

    /// The edge joining `u` and `v`, if any.
    ///
    /// With parallel edges the one with the lowest current cost wins, ties
    /// broken by lower `EdgeId`.  That matches the edge a search would relax.
    pub fn edge_between(&self, u: VertexId, v: VertexId) -> Option<EdgeId> {
        if !self.contains_vertex(u) || !self.contains_vertex(v) {
            return None;
        }
        self.incident_edges(u)
            .filter(|&e| self.other_end(e, u) == v)
            .min_by(|&x, &y| {
                self.current_cost(x)
                    .total_cmp(&self.current_cost(y))
                    .then(x.cmp(&y))
            })
    }

    // ── Edge attributes ───────────────────────────────────────────────────

    #[inline]
    pub fn capacity(&self, e: EdgeId) -> u32 {
        self.edge_capacity[e.index()]
    }

    #[inline]
    pub fn base_cost(&self, e: EdgeId) -> f64 {
        self.edge_base_cost[e.index()]
    }

    #[inline]
    pub fn load(&self, e: EdgeId) -> u32 {
        self.load[e.index()]
    }

    /// Dynamic cost as of the last [`refresh_costs`](Self::refresh_costs).
    #[inline]
    pub fn current_cost(&self, e: EdgeId) -> f64 {
        self.current_cost[e.index()]
    }

    pub fn loads(&self) -> &[u32] {
        &self.load
    }

    /// Highest load on any edge (0 for an edgeless graph).
    pub fn max_load(&self) -> u32 {
        self.load.iter().copied().max().unwrap_or(0)
    }

    /// Heuristic multiplier; see [`crate::heuristic`].
    #[inline]
    pub fn cost_scale(&self) -> f64 {
        self.cost_scale
    }

    // ── Load maintenance ──────────────────────────────────────────────────

    /// Overwrite every load with `loads`, indexed by `EdgeId`.
    ///
    /// # Panics
    ///
    /// If `loads.len()` differs from the edge count.
    pub fn assign_loads(&mut self, loads: &[u32]) {
        self.load.copy_from_slice(loads);
    }

    /// Reset every load to zero, then add one for each traversal.
    ///
    /// The result depends only on the multiset of `traversals`, so calling
    /// this twice with the same input leaves identical loads.
    pub fn recompute_loads<I>(&mut self, traversals: I)
    where
        I: IntoIterator<Item = EdgeId>,
    {
        self.load.fill(0);
        for e in traversals {
            self.load[e.index()] += 1;
        }
    }

    /// Rederive every edge's dynamic cost from its current load.
    pub fn refresh_costs<P: CostPolicy + ?Sized>(&mut self, policy: &P) {
        for i in 0..self.edge_a.len() {
            self.current_cost[i] =
                policy.dynamic_cost(self.edge_base_cost[i], self.load[i], self.edge_capacity[i]);
        }
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`Graph`] incrementally, then call [`build`](Self::build).
///
/// Edge ids are assigned in insertion order.  `build()` validates every edge
/// and constructs the CSR incidence arrays.
///
/// # Example
///
/// ```
/// use jam_core::Point;
/// use jam_graph::GraphBuilder;
///
/// let mut b = GraphBuilder::new();
/// let a = b.add_vertex(Point::new(0.0, 0.0));
/// let c = b.add_vertex(Point::new(3.0, 4.0));
/// let e = b.add_edge(a, c, 2); // base cost = Manhattan distance = 7
/// let g = b.build().unwrap();
/// assert_eq!(g.base_cost(e), 7.0);
/// assert_eq!(g.degree(a), 1);
/// ```
#[derive(Default)]
pub struct GraphBuilder {
    vertices:  Vec<Point>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    a:         VertexId,
    b:         VertexId,
    capacity:  u32,
    /// `None` ⇒ Manhattan distance between the endpoints.
    base_cost: Option<f64>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            vertices:  Vec::with_capacity(vertices),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a vertex and return its `VertexId` (sequential from 0).
    pub fn add_vertex(&mut self, pos: Point) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(pos);
        id
    }

    /// Add an undirected edge whose base cost is the Manhattan distance
    /// between its endpoints.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId, capacity: u32) -> EdgeId {
        self.push_edge(a, b, capacity, None)
    }

    /// Add an undirected edge with an explicit base cost.
    pub fn add_weighted_edge(&mut self, a: VertexId, b: VertexId, capacity: u32, base_cost: f64) -> EdgeId {
        self.push_edge(a, b, capacity, Some(base_cost))
    }

    pub fn vertex_count(&self) -> usize { self.vertices.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    fn push_edge(&mut self, a: VertexId, b: VertexId, capacity: u32, base_cost: Option<f64>) -> EdgeId {
        let id = EdgeId(self.raw_edges.len() as u32);
        self.raw_edges.push(RawEdge { a, b, capacity, base_cost });
        id
    }

    /// Consume the builder and produce a [`Graph`].
    ///
    /// # Errors
    ///
    /// - [`GraphError::VertexOutOfRange`] if an edge names an unknown vertex.
    /// - [`GraphError::SelfLoop`] if an edge joins a vertex to itself.
    /// - [`GraphError::InvalidCost`] for a negative or non-finite base cost.
    pub fn build(self) -> GraphResult<Graph> {
        let vertex_count = self.vertices.len();
        let edge_count   = self.raw_edges.len();

        let mut edge_a         = Vec::with_capacity(edge_count);
        let mut edge_b         = Vec::with_capacity(edge_count);
        let mut edge_capacity  = Vec::with_capacity(edge_count);
        let mut edge_base_cost = Vec::with_capacity(edge_count);
        let mut cost_scale     = f64::INFINITY;

        for (i, raw) in self.raw_edges.iter().enumerate() {
            let edge = EdgeId(i as u32);
            for vertex in [raw.a, raw.b] {
                if vertex.index() >= vertex_count {
                    return Err(GraphError::VertexOutOfRange { edge, vertex, vertex_count });
                }
            }
            if raw.a == raw.b {
                return Err(GraphError::SelfLoop { edge, vertex: raw.a });
            }

            let span = self.vertices[raw.a.index()].manhattan(self.vertices[raw.b.index()]);
            let cost = raw.base_cost.unwrap_or(span);
            if !cost.is_finite() || cost < 0.0 {
                return Err(GraphError::InvalidCost { edge, cost });
            }
            if span > 0.0 {
                cost_scale = cost_scale.min(cost / span);
            }

            edge_a.push(raw.a);
            edge_b.push(raw.b);
            edge_capacity.push(raw.capacity);
            edge_base_cost.push(cost);
        }

        // No edge spans any distance: Manhattan distance carries no cost
        // information, fall back to a zero heuristic.
        if !cost_scale.is_finite() {
            cost_scale = 0.0;
        }

        // CSR row pointer from endpoint degrees.
        let mut incident_start = vec![0u32; vertex_count + 1];
        for (a, b) in edge_a.iter().zip(&edge_b) {
            incident_start[a.index() + 1] += 1;
            incident_start[b.index() + 1] += 1;
        }
        for i in 1..=vertex_count {
            incident_start[i] += incident_start[i - 1];
        }
        debug_assert_eq!(incident_start[vertex_count] as usize, 2 * edge_count);

        // Scatter edges into their endpoints' slots.  Walking edges in id
        // order keeps each vertex's slice sorted.
        let mut cursor: Vec<u32> = incident_start[..vertex_count].to_vec();
        let mut incident = vec![EdgeId::INVALID; 2 * edge_count];
        for (i, (a, b)) in edge_a.iter().zip(&edge_b).enumerate() {
            for v in [a, b] {
                incident[cursor[v.index()] as usize] = EdgeId(i as u32);
                cursor[v.index()] += 1;
            }
        }

        Ok(Graph {
            vertex_pos: self.vertices,
            incident_start,
            incident,
            current_cost: edge_base_cost.clone(),
            load: vec![0; edge_count],
            edge_a,
            edge_b,
            edge_capacity,
            edge_base_cost,
            cost_scale,
        })
    }
}
