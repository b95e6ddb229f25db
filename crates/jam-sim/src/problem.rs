//! The input to a simulation run.

use jam_core::AgentId;
use jam_fleet::Car;
use jam_graph::Graph;

use crate::{SimError, SimResult};

/// A road graph plus the ordered list of cars to route across it.
///
/// Car `i` becomes `AgentId(i)`.
pub struct Problem {
    pub graph: Graph,
    pub cars:  Vec<Car>,
}

impl Problem {
    /// Bundle `graph` and `cars`, checking every car's endpoints exist.
    ///
    /// # Errors
    ///
    /// [`SimError::AgentVertexOutOfRange`] for the first car naming a vertex
    /// the graph does not have.
    pub fn new(graph: Graph, cars: Vec<Car>) -> SimResult<Self> {
        let vertex_count = graph.vertex_count();
        for (i, car) in cars.iter().enumerate() {
            for vertex in [car.origin, car.destination] {
                if !graph.contains_vertex(vertex) {
                    return Err(SimError::AgentVertexOutOfRange {
                        agent: AgentId(i as u32),
                        vertex,
                        vertex_count,
                    });
                }
            }
        }
        Ok(Self { graph, cars })
    }

    pub fn agent_count(&self) -> usize {
        self.cars.len()
    }
}
