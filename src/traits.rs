//! Core seams for the route sequencer.
//!
//! Kept small so callers can plug in their own stop types and services.

use std::fmt;

use crate::polyline::Polyline;

/// Anything with a (lat, lng) position in degrees.
pub trait Waypoint {
    fn location(&self) -> (f64, f64);
}

impl Waypoint for (f64, f64) {
    fn location(&self) -> (f64, f64) {
        *self
    }
}

impl<T: Waypoint + ?Sized> Waypoint for &T {
    fn location(&self) -> (f64, f64) {
        (**self).location()
    }
}

/// Driving directions for a single pair of points.
///
/// Implementations return the full road geometry from `from` to `to` in
/// (lat, lng) order. Stitching treats every error as "no route".
pub trait DirectionsProvider {
    fn route_between(&self, from: (f64, f64), to: (f64, f64)) -> Result<Polyline, DirectionsError>;
}

/// Point to human-readable address. Display only; `None` on any failure.
pub trait ReverseGeocoder {
    fn address_for(&self, location: (f64, f64)) -> Option<String>;
}

#[derive(Debug)]
pub enum DirectionsError {
    Http(reqwest::Error),
    /// Service answered with a code other than "Ok".
    Status(String),
    NoRoute,
    InvalidGeometry,
}

impl fmt::Display for DirectionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionsError::Http(err) => write!(f, "directions request failed: {}", err),
            DirectionsError::Status(code) => write!(f, "directions service returned {}", code),
            DirectionsError::NoRoute => write!(f, "no route found"),
            DirectionsError::InvalidGeometry => write!(f, "route geometry is empty or malformed"),
        }
    }
}

impl std::error::Error for DirectionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DirectionsError::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DirectionsError {
    fn from(err: reqwest::Error) -> Self {
        DirectionsError::Http(err)
    }
}

/// Returns a straight two-point line for every pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLine;

impl DirectionsProvider for StraightLine {
    fn route_between(&self, from: (f64, f64), to: (f64, f64)) -> Result<Polyline, DirectionsError> {
        Ok(Polyline::straight(from, to))
    }
}
