//! Nearest-neighbor stop sequencing.
//!
//! Greedy tour construction: start at the first stop, then keep jumping to the
//! closest stop not yet visited. Not optimal, but deterministic and O(N^2),
//! which is fine for the tens of stops a delivery route carries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::haversine::haversine_km;
use crate::stop::Stop;
use crate::traits::Waypoint;

/// Visiting order for `points`, as indices into the input slice.
///
/// Index 0 is always first. On an exact distance tie the candidate that comes
/// first in input order wins. That rule is arbitrary but kept stable so the
/// same input always yields the same route.
pub fn nearest_neighbor_order<W: Waypoint>(points: &[W]) -> Vec<usize> {
    let n = points.len();
    if n == 0 {
        return Vec::new();
    }

    let mut order = Vec::with_capacity(n);
    let mut unvisited: Vec<usize> = (1..n).collect();
    order.push(0);

    while !unvisited.is_empty() {
        debug_assert_eq!(unvisited.len(), n - order.len());

        let current = points[order[order.len() - 1]].location();
        let mut best_pos = 0;
        let mut best_dist = f64::INFINITY;
        for (pos, &candidate) in unvisited.iter().enumerate() {
            let dist = haversine_km(current, points[candidate].location());
            if dist < best_dist {
                best_dist = dist;
                best_pos = pos;
            }
        }

        // `remove` keeps the remaining candidates in input order for tie-breaks.
        order.push(unvisited.remove(best_pos));
    }

    order
}

/// Reorder `stops` with the nearest-neighbor heuristic and number them 1..N.
#[tracing::instrument(skip(stops), fields(count = stops.len()))]
pub fn sequence_stops(stops: Vec<Stop>) -> OrderedRoute {
    if stops.len() < 2 {
        return OrderedRoute::from_stops(stops);
    }

    let order = nearest_neighbor_order(&stops);
    let mut slots: Vec<Option<Stop>> = stops.into_iter().map(Some).collect();
    let ordered = order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect();

    OrderedRoute::from_stops(ordered)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    OutOfBounds { index: usize, len: usize },
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::OutOfBounds { index, len } => {
                write!(f, "stop index {} out of bounds for route of {} stops", index, len)
            }
        }
    }
}

impl std::error::Error for SequenceError {}

/// Stops in visiting order, numbered 1..N with no gaps.
///
/// Every mutation renumbers, so the numbering always matches the position.
/// Deserializes through `Vec<Stop>`, so each stop's coordinates are checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Stop>", into = "Vec<Stop>")]
pub struct OrderedRoute {
    stops: Vec<Stop>,
}

impl OrderedRoute {
    /// Take `stops` in the given order.
    pub fn from_stops(stops: Vec<Stop>) -> Self {
        let mut route = Self { stops };
        route.renumber();
        route
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn into_stops(self) -> Vec<Stop> {
        self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn waypoints(&self) -> Vec<(f64, f64)> {
        self.stops.iter().map(Waypoint::location).collect()
    }

    pub fn push(&mut self, mut stop: Stop) {
        stop.sequence = self.stops.len() + 1;
        self.stops.push(stop);
    }

    /// Drag-reorder: move the stop at position `from` to position `to`
    /// (both 0-based).
    pub fn move_stop(&mut self, from: usize, to: usize) -> Result<(), SequenceError> {
        let len = self.stops.len();
        for index in [from, to] {
            if index >= len {
                return Err(SequenceError::OutOfBounds { index, len });
            }
        }
        let stop = self.stops.remove(from);
        self.stops.insert(to, stop);
        self.renumber();
        Ok(())
    }

    /// Remove the stop with `id`, closing the gap in the numbering.
    pub fn remove_stop(&mut self, id: &str) -> Option<Stop> {
        let index = self.stops.iter().position(|stop| stop.id == id)?;
        let removed = self.stops.remove(index);
        self.renumber();
        Some(removed)
    }

    fn renumber(&mut self) {
        for (i, stop) in self.stops.iter_mut().enumerate() {
            stop.sequence = i + 1;
        }
    }
}

impl From<Vec<Stop>> for OrderedRoute {
    fn from(stops: Vec<Stop>) -> Self {
        Self::from_stops(stops)
    }
}

impl From<OrderedRoute> for Vec<Stop> {
    fn from(route: OrderedRoute) -> Self {
        route.stops
    }
}
