//! Polyline representation for route geometries.
//!
//! Geometry is derived for map rendering and distance estimates. It is never
//! persisted. Service-specific coordinate order ([lng, lat]) is converted at
//! the boundary, so everything in here is (lat, lng).

use serde::{Deserialize, Serialize};

use crate::traits::Waypoint;

/// A route geometry as decoded (latitude, longitude) points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    ///
    /// Each point is a (latitude, longitude) tuple.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Two-point line between `from` and `to`.
    pub fn straight(from: (f64, f64), to: (f64, f64)) -> Self {
        Self { points: vec![from, to] }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    /// Number of points, not segments.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Final point, where the next segment joins.
    pub fn last(&self) -> Option<(f64, f64)> {
        self.points.last().copied()
    }

    /// Splice a segment onto the end of this polyline.
    ///
    /// The first segment is taken whole. For later segments the first point
    /// is the previous segment's last point, so it is dropped.
    pub fn append_segment(&mut self, segment: Polyline) {
        if self.points.is_empty() {
            self.points = segment.points;
        } else {
            self.points.extend(segment.points.into_iter().skip(1));
        }
    }
}

impl From<Vec<(f64, f64)>> for Polyline {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(points)
    }
}

impl<W: Waypoint> FromIterator<W> for Polyline {
    fn from_iter<I: IntoIterator<Item = W>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|w| w.location()).collect())
    }
}
