//! route-sequencer core
//!
//! Orders delivery stops into a route, stitches road geometry between them and
//! estimates distance and driving time.

pub mod traits;
pub mod stop;
pub mod haversine;
pub mod polyline;
pub mod sequencer;
pub mod osrm;
pub mod geocode;
pub mod stitcher;
pub mod estimate;
pub mod planner;
