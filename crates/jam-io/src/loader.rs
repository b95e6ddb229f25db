//! CSV problem loader.
//!
//! # Directory layout
//!
//! A problem directory holds three files:
//!
//! ```csv
//! # vertices.csv
//! id,x,y
//! 10,0,0
//! 20,1,0
//!
//! # edges.csv
//! from,to,capacity,cost
//! 10,20,2,
//! 20,30,1,4.5
//!
//! # cars.csv
//! origin,destination
//! 10,30
//! ```
//!
//! Vertex ids are arbitrary integers.  They are remapped to dense
//! `VertexId`s in ascending order of the original id, so the mapping does
//! not depend on row order.  The `cost` column of `edges.csv` may be empty or
//! absent; the base cost then defaults to the Manhattan distance between the
//! endpoints.
//!
//! An edge or car naming a vertex absent from `vertices.csv` is fatal.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use jam_core::{Point, VertexId};
use jam_fleet::Car;
use jam_graph::{Graph, GraphBuilder};
use jam_sim::Problem;

use crate::{IoError, IoResult};

pub const VERTICES_FILE: &str = "vertices.csv";
pub const EDGES_FILE: &str = "edges.csv";
pub const CARS_FILE: &str = "cars.csv";

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct VertexRecord {
    id: i64,
    x:  f64,
    y:  f64,
}

#[derive(Deserialize)]
struct EdgeRecord {
    from:     i64,
    to:       i64,
    capacity: u32,
    #[serde(default)]
    cost:     Option<f64>,
}

#[derive(Deserialize)]
struct CarRecord {
    origin:      i64,
    destination: i64,
}

// ── Vertex id mapping ─────────────────────────────────────────────────────────

/// Bidirectional map between file vertex ids and dense `VertexId`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexIds {
    /// Original ids, ascending.  Index = dense `VertexId`.
    sorted: Vec<i64>,
}

impl VertexIds {
    /// Identity mapping for graphs not loaded from files.
    pub fn identity(vertex_count: usize) -> Self {
        Self { sorted: (0..vertex_count as i64).collect() }
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Dense id for a file id.
    pub fn dense(&self, original: i64) -> Option<VertexId> {
        self.sorted
            .binary_search(&original)
            .ok()
            .map(|i| VertexId(i as u32))
    }

    /// File id for a dense id.
    pub fn original(&self, v: VertexId) -> i64 {
        self.sorted[v.index()]
    }

    fn resolve(&self, file: &'static str, id: i64) -> IoResult<VertexId> {
        self.dense(id).ok_or(IoError::UnknownVertex { file, id })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load `vertices.csv`, `edges.csv` and `cars.csv` from `dir`.
pub fn load_problem_dir(dir: &Path) -> IoResult<(Problem, VertexIds)> {
    let vertices = File::open(dir.join(VERTICES_FILE))?;
    let edges    = File::open(dir.join(EDGES_FILE))?;
    let cars     = File::open(dir.join(CARS_FILE))?;
    let loaded = load_problem_readers(vertices, edges, cars)?;
    log::info!(
        "loaded {}: {} vertices, {} edges, {} cars",
        dir.display(),
        loaded.0.graph.vertex_count(),
        loaded.0.graph.edge_count(),
        loaded.0.cars.len()
    );
    Ok(loaded)
}

/// Like [`load_problem_dir`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor` or byte slice).
pub fn load_problem_readers<V: Read, E: Read, C: Read>(
    vertices: V,
    edges:    E,
    cars:     C,
) -> IoResult<(Problem, VertexIds)> {
    let (graph, ids) = load_graph_readers(vertices, edges)?;
    let cars = load_cars_reader(cars, &ids)?;
    let problem = Problem::new(graph, cars)?;
    Ok((problem, ids))
}

/// Parse the vertex and edge tables into a [`Graph`].
pub fn load_graph_readers<V: Read, E: Read>(vertices: V, edges: E) -> IoResult<(Graph, VertexIds)> {
    // ── Vertices ──────────────────────────────────────────────────────────
    let mut rows: Vec<VertexRecord> = reader(vertices)
        .deserialize()
        .collect::<Result<_, csv::Error>>()?;
    rows.sort_by_key(|r| r.id);
    if let Some(dup) = rows.windows(2).find(|w| w[0].id == w[1].id) {
        return Err(IoError::Parse(format!("{VERTICES_FILE}: duplicate vertex id {}", dup[0].id)));
    }

    let ids = VertexIds { sorted: rows.iter().map(|r| r.id).collect() };
    let mut builder = GraphBuilder::with_capacity(rows.len(), 0);
    for r in &rows {
        builder.add_vertex(Point::new(r.x, r.y));
    }

    // ── Edges ─────────────────────────────────────────────────────────────
    for result in reader(edges).deserialize::<EdgeRecord>() {
        let r = result?;
        let a = ids.resolve(EDGES_FILE, r.from)?;
        let b = ids.resolve(EDGES_FILE, r.to)?;
        match r.cost {
            Some(cost) => builder.add_weighted_edge(a, b, r.capacity, cost),
            None       => builder.add_edge(a, b, r.capacity),
        };
    }

    Ok((builder.build()?, ids))
}

/// Parse the car table against an existing id mapping.
pub fn load_cars_reader<C: Read>(cars: C, ids: &VertexIds) -> IoResult<Vec<Car>> {
    reader(cars)
        .deserialize::<CarRecord>()
        .map(|result| -> IoResult<Car> {
            let r = result?;
            Ok(Car::new(
                ids.resolve(CARS_FILE, r.origin)?,
                ids.resolve(CARS_FILE, r.destination)?,
            ))
        })
        .collect()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source)
}
