//! Unit tests for jam-fleet.

#[cfg(test)]
mod status {
    use crate::AgentStatus;

    #[test]
    fn terminal_states() {
        assert!(AgentStatus::Stuck.is_terminal());
        assert!(AgentStatus::Arrived.is_terminal());
        for s in [
            AgentStatus::NoRoute,
            AgentStatus::Planning,
            AgentStatus::EnRoute,
            AgentStatus::Waiting,
        ] {
            assert!(!s.is_terminal(), "{s}");
        }
    }

    #[test]
    fn default_is_no_route() {
        assert_eq!(AgentStatus::default(), AgentStatus::NoRoute);
    }

    #[test]
    fn display_names() {
        assert_eq!(AgentStatus::EnRoute.to_string(), "en_route");
        assert_eq!(AgentStatus::Arrived.to_string(), "arrived");
    }
}

#[cfg(test)]
mod state {
    use std::collections::VecDeque;

    use jam_core::VertexId;
    use crate::{AgentState, AgentStatus};

    #[test]
    fn fresh_state_has_no_next_hop() {
        let s = AgentState::at(VertexId(3));
        assert_eq!(s.position, VertexId(3));
        assert_eq!(s.status, AgentStatus::NoRoute);
        assert_eq!(s.next_hop(), None);
    }

    #[test]
    fn next_hop_is_second_route_vertex() {
        let mut s = AgentState::at(VertexId(0));
        s.route = VecDeque::from(vec![VertexId(0), VertexId(4), VertexId(2)]);
        assert_eq!(s.next_hop(), Some(VertexId(4)));
    }

    #[test]
    fn route_not_starting_at_position_has_no_next_hop() {
        let mut s = AgentState::at(VertexId(0));
        s.route = VecDeque::from(vec![VertexId(1), VertexId(2)]);
        assert_eq!(s.next_hop(), None);
    }
}

#[cfg(test)]
mod store {
    use std::collections::VecDeque;

    use jam_core::{AgentId, VertexId};
    use crate::{AgentStatus, Car, FleetStore};

    fn two_cars() -> FleetStore {
        FleetStore::new(vec![
            Car::new(VertexId(0), VertexId(2)),
            Car::new(VertexId(5), VertexId(5)),
        ])
    }

    #[test]
    fn new_store_starts_at_origins() {
        let f = two_cars();
        assert_eq!(f.len(), 2);
        assert_eq!(f.history(AgentId(0)), &[VertexId(0)]);
        assert_eq!(f.state(AgentId(1)).position, VertexId(5));
        assert_eq!(f.active_count(), 2);
        assert!(!f.all_terminal());
        assert!(f.car(AgentId(1)).is_trivial());
    }

    #[test]
    fn advance_updates_route_position_history() {
        let mut f = two_cars();
        let a = AgentId(0);
        f.adopt_route(a, VecDeque::from(vec![VertexId(0), VertexId(1), VertexId(2)]));
        f.set_status(a, AgentStatus::EnRoute);
        f.advance(a, VertexId(1), 2.5);

        let s = f.state(a);
        assert_eq!(s.position, VertexId(1));
        assert_eq!(s.next_hop(), Some(VertexId(2)));
        assert_eq!(s.replans, 1);
        assert_eq!(s.travelled, 2.5);
        assert_eq!(f.history(a), &[VertexId(0), VertexId(1)]);
    }

    #[test]
    fn hold_counts_waits_without_moving() {
        let mut f = two_cars();
        f.hold(AgentId(0));
        f.hold(AgentId(0));
        assert_eq!(f.state(AgentId(0)).waits, 2);
        assert_eq!(f.status(AgentId(0)), AgentStatus::Waiting);
        assert_eq!(f.history(AgentId(0)).len(), 1);
    }

    #[test]
    fn failed_search_clears_route() {
        let mut f = two_cars();
        f.adopt_route(AgentId(0), VecDeque::from(vec![VertexId(0), VertexId(1)]));
        f.record_failed_search(AgentId(0));
        assert!(f.state(AgentId(0)).route.is_empty());
        assert_eq!(f.state(AgentId(0)).replans, 2);
    }

    #[test]
    fn terminal_counting() {
        let mut f = two_cars();
        f.set_status(AgentId(0), AgentStatus::Stuck);
        f.set_status(AgentId(1), AgentStatus::Arrived);
        assert!(f.all_terminal());
        assert_eq!(f.active_count(), 0);
        assert_eq!(f.count_status(AgentStatus::Stuck), 1);
    }

    #[test]
    fn agent_ids_ascending() {
        let f = two_cars();
        let ids: Vec<_> = f.agent_ids().collect();
        assert_eq!(ids, vec![AgentId(0), AgentId(1)]);
    }
}
