//! Test fixtures for route-sequencer.
//!
//! Provides:
//! - Real Metro Manila delivery locations
//! - A one-shot HTTP stub standing in for the directions and geocoding services

#![allow(dead_code)]

pub mod http_stub;
pub mod manila_locations;

pub use manila_locations::*;
