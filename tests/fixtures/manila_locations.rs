//! Metro Manila locations for realistic test fixtures.
//!
//! Coordinates are approximate positions of well-known landmarks.

use route_sequencer::stop::Stop;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    pub fn stop(&self) -> Stop {
        Stop::new(self.name, self.lat, self.lng)
            .expect("fixture coordinates are valid")
            .with_customer(self.name)
    }
}

// ============================================================================
// Depots
// ============================================================================

pub const DEPOTS: &[Location] = &[
    Location::new("Pasig Warehouse", 14.5764, 121.0851),
    Location::new("Valenzuela Hub", 14.7011, 120.9830),
];

// ============================================================================
// Delivery customers
// ============================================================================

pub const CUSTOMERS: &[Location] = &[
    Location::new("SM Megamall", 14.5849, 121.0566),
    Location::new("Greenbelt", 14.5526, 121.0216),
    Location::new("Bonifacio High Street", 14.5509, 121.0509),
    Location::new("Trinoma", 14.6535, 121.0335),
    Location::new("Eastwood City", 14.6091, 121.0807),
    Location::new("Divisoria Mall", 14.6030, 120.9714),
    Location::new("Rockwell Center", 14.5650, 121.0365),
    Location::new("UP Diliman", 14.6538, 121.0685),
    Location::new("Mall of Asia", 14.5352, 120.9822),
    Location::new("Ortigas Center", 14.5869, 121.0614),
];

/// Stops for the first `n` customers, unsequenced, in fixture order.
pub fn customer_stops(n: usize) -> Vec<Stop> {
    CUSTOMERS.iter().take(n).map(Location::stop).collect()
}
