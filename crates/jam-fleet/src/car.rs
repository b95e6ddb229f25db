//! Agent trip definition.

use jam_core::VertexId;

/// One vehicle's trip.  Immutable for the duration of a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Car {
    pub origin:      VertexId,
    pub destination: VertexId,
}

impl Car {
    #[inline]
    pub fn new(origin: VertexId, destination: VertexId) -> Self {
        Self { origin, destination }
    }

    /// `true` if the car starts at its destination.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.origin == self.destination
    }
}
