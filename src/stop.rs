//! Delivery stops.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::traits::Waypoint;

/// Optional descriptive data carried alongside a stop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopDetails {
    pub customer: Option<String>,
    pub address: Option<String>,
    pub contact: Option<String>,
}

/// A single delivery location.
///
/// `sequence` is 1-based once the stop belongs to a route; 0 means the stop
/// has not been sequenced yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStop")]
pub struct Stop {
    pub id: String,
    lat: f64,
    lng: f64,
    pub sequence: usize,
    pub details: StopDetails,
}

/// Wire shape of a [`Stop`]; coordinates are checked on the way in.
#[derive(Deserialize)]
struct RawStop {
    id: String,
    lat: f64,
    lng: f64,
    #[serde(default)]
    sequence: usize,
    #[serde(default)]
    details: StopDetails,
}

impl TryFrom<RawStop> for Stop {
    type Error = CoordinateError;

    fn try_from(raw: RawStop) -> Result<Self, Self::Error> {
        validate_coordinate(raw.lat, raw.lng)?;
        Ok(Self {
            id: raw.id,
            lat: raw.lat,
            lng: raw.lng,
            sequence: raw.sequence,
            details: raw.details,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateError {
    NotFinite { lat: f64, lng: f64 },
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateError::NotFinite { lat, lng } => {
                write!(f, "coordinate ({}, {}) is not finite", lat, lng)
            }
            CoordinateError::LatitudeOutOfRange(lat) => {
                write!(f, "latitude {} outside [-90, 90]", lat)
            }
            CoordinateError::LongitudeOutOfRange(lng) => {
                write!(f, "longitude {} outside [-180, 180]", lng)
            }
        }
    }
}

impl std::error::Error for CoordinateError {}

/// Check a (lat, lng) pair in degrees.
pub fn validate_coordinate(lat: f64, lng: f64) -> Result<(), CoordinateError> {
    if !lat.is_finite() || !lng.is_finite() {
        return Err(CoordinateError::NotFinite { lat, lng });
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(CoordinateError::LatitudeOutOfRange(lat));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(CoordinateError::LongitudeOutOfRange(lng));
    }
    Ok(())
}

impl Stop {
    pub fn new(id: impl Into<String>, lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        validate_coordinate(lat, lng)?;
        Ok(Self {
            id: id.into(),
            lat,
            lng,
            sequence: 0,
            details: StopDetails::default(),
        })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.details.customer = Some(customer.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.details.address = Some(address.into());
        self
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.details.contact = Some(contact.into());
        self
    }

    /// Re-check coordinates.
    pub fn validate(&self) -> Result<(), CoordinateError> {
        validate_coordinate(self.lat, self.lng)
    }
}

impl Waypoint for Stop {
    fn location(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stop_is_unsequenced() {
        let stop = Stop::new("s1", 14.6, 121.0).unwrap();
        assert_eq!(stop.sequence, 0);
        assert_eq!(stop.location(), (14.6, 121.0));
        assert_eq!(stop.details, StopDetails::default());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(Stop::new("n", 90.0, 180.0).is_ok());
        assert!(Stop::new("s", -90.0, -180.0).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(
            Stop::new("x", 90.5, 0.0).unwrap_err(),
            CoordinateError::LatitudeOutOfRange(90.5)
        );
        assert_eq!(
            Stop::new("x", 0.0, -181.0).unwrap_err(),
            CoordinateError::LongitudeOutOfRange(-181.0)
        );
    }

    #[test]
    fn test_rejects_nan() {
        let err = Stop::new("x", f64::NAN, 0.0).unwrap_err();
        assert!(matches!(err, CoordinateError::NotFinite { .. }));
        assert!(Stop::new("x", 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_builder_details() {
        let stop = Stop::new("s1", 14.6, 121.0)
            .unwrap()
            .with_customer("Acme Hardware")
            .with_address("Ayala Ave, Makati")
            .with_contact("0917 555 0100");
        assert_eq!(stop.details.customer.as_deref(), Some("Acme Hardware"));
        assert_eq!(stop.details.address.as_deref(), Some("Ayala Ave, Makati"));
        assert_eq!(stop.details.contact.as_deref(), Some("0917 555 0100"));
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        let err = serde_json::from_str::<Stop>(r#"{"id":"x","lat":1000.0,"lng":-5000.0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("latitude 1000 outside"), "got {}", err);

        let err = serde_json::from_str::<Stop>(r#"{"id":"y","lat":14.6,"lng":-181.0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("longitude -181 outside"), "got {}", err);
    }

    #[test]
    fn test_deserialize_valid_stop() {
        let stop: Stop = serde_json::from_str(
            r#"{"id":"s1","lat":14.6,"lng":121.0,"details":{"customer":"Acme","address":null,"contact":null}}"#,
        )
        .unwrap();
        assert_eq!(stop.location(), (14.6, 121.0));
        assert_eq!(stop.sequence, 0);
        assert_eq!(stop.details.customer.as_deref(), Some("Acme"));
        assert!(stop.validate().is_ok());
    }
}
