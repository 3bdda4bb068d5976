//! Distance and duration estimates for a route.
//!
//! A rough planning figure: straight-line distance between consecutive points
//! at a constant average speed. Traffic, road class and dwell time are ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::haversine::haversine_km;
use crate::traits::Waypoint;

/// Average driving speed assumed for duration estimates.
pub const AVERAGE_SPEED_KMH: f64 = 50.0;

/// Sum of great-circle distances between consecutive points, in kilometers.
pub fn total_distance_km<W: Waypoint>(points: &[W]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_km(pair[0].location(), pair[1].location()))
        .sum()
}

/// Whole-minute driving time split for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TravelDuration {
    pub hours: u64,
    pub minutes: u64,
}

impl TravelDuration {
    pub fn from_minutes(total_minutes: u64) -> Self {
        Self {
            hours: total_minutes / 60,
            minutes: total_minutes % 60,
        }
    }

    /// Time to cover `distance_km` at `speed_kmh`, rounded to the nearest minute.
    ///
    /// A non-positive or non-finite speed gives zero.
    pub fn for_distance(distance_km: f64, speed_kmh: f64) -> Self {
        if !(speed_kmh.is_finite() && speed_kmh > 0.0) {
            return Self::default();
        }
        let minutes = (distance_km / speed_kmh * 60.0).round();
        Self::from_minutes(if minutes.is_finite() && minutes > 0.0 { minutes as u64 } else { 0 })
    }

    /// Saturates rather than overflowing on absurd deserialized values.
    pub fn total_minutes(&self) -> u64 {
        self.hours.saturating_mul(60).saturating_add(self.minutes)
    }
}

impl fmt::Display for TravelDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteEstimate {
    pub distance_km: f64,
    pub duration: TravelDuration,
}

impl RouteEstimate {
    pub fn new(distance_km: f64, speed_kmh: f64) -> Self {
        Self {
            distance_km,
            duration: TravelDuration::for_distance(distance_km, speed_kmh),
        }
    }

    pub fn for_points<W: Waypoint>(points: &[W], speed_kmh: f64) -> Self {
        Self::new(total_distance_km(points), speed_kmh)
    }
}

impl fmt::Display for RouteEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} km, {}", self.distance_km, self.duration)
    }
}
