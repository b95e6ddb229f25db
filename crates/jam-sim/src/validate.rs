//! Post-run consistency checks on movement histories.

use thiserror::Error;

use jam_core::{AgentId, VertexId};
use jam_fleet::{AgentStatus, Car};
use jam_graph::Graph;

use crate::AgentOutcome;

/// One way an agent's history can disagree with its trip or the graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{agent} has an empty history")]
    EmptyHistory { agent: AgentId },

    #[error("{agent} history starts at {found}, origin is {origin}")]
    WrongStart { agent: AgentId, origin: VertexId, found: VertexId },

    #[error("{agent} step {step} jumps {from} -> {to} with no edge between them")]
    NoEdge { agent: AgentId, step: usize, from: VertexId, to: VertexId },

    #[error("{agent} is arrived at {found} but its destination is {destination}")]
    NotAtDestination { agent: AgentId, destination: VertexId, found: VertexId },
}

/// Check every outcome against its car and the graph.
///
/// Returns all violations found, empty when the solution is consistent.
pub fn validate_solution(graph: &Graph, cars: &[Car], outcomes: &[AgentOutcome]) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (car, outcome) in cars.iter().zip(outcomes) {
        let agent = outcome.agent;
        let (Some(&first), Some(&last)) = (outcome.history.first(), outcome.history.last()) else {
            violations.push(Violation::EmptyHistory { agent });
            continue;
        };

        if first != car.origin {
            violations.push(Violation::WrongStart { agent, origin: car.origin, found: first });
        }
        for (step, pair) in outcome.history.windows(2).enumerate() {
            if graph.edge_between(pair[0], pair[1]).is_none() {
                violations.push(Violation::NoEdge { agent, step, from: pair[0], to: pair[1] });
            }
        }
        if outcome.status == AgentStatus::Arrived && last != car.destination {
            violations.push(Violation::NotAtDestination {
                agent,
                destination: car.destination,
                found: last,
            });
        }
    }
    violations
}
