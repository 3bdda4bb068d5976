//! Route planning pipeline.
//!
//! Unordered stops -> ordered stops -> road geometry -> distance/duration.

use crate::estimate::{AVERAGE_SPEED_KMH, RouteEstimate};
use crate::polyline::Polyline;
use crate::sequencer::{OrderedRoute, sequence_stops};
use crate::stitcher::{CancelToken, StitchOptions, StitchReport, stitch_route_detailed};
use crate::stop::Stop;
use crate::traits::{DirectionsProvider, StraightLine};

#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub average_speed_kmh: f64,
    /// Ask the directions provider for road geometry. When false every leg
    /// is a straight line and no requests are made.
    pub road_geometry: bool,
    pub parallel: bool,
    pub cancel: Option<CancelToken>,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            average_speed_kmh: AVERAGE_SPEED_KMH,
            road_geometry: true,
            parallel: false,
            cancel: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    pub route: OrderedRoute,
    pub geometry: Polyline,
    /// Measured over `geometry`, so road detours count.
    pub estimate: RouteEstimate,
    /// Legs drawn as straight lines because routing failed or was cancelled.
    pub fallback_segments: usize,
}

/// Sequence `stops` nearest-neighbor first, then stitch and estimate.
pub fn plan_route<P>(stops: Vec<Stop>, provider: &P, options: &PlanOptions) -> RoutePlan
where
    P: DirectionsProvider + Sync,
{
    plan_ordered(sequence_stops(stops), provider, options)
}

/// Stitch and estimate a route whose order the caller already fixed.
#[tracing::instrument(skip_all, fields(stops = route.len()))]
pub fn plan_ordered<P>(route: OrderedRoute, provider: &P, options: &PlanOptions) -> RoutePlan
where
    P: DirectionsProvider + Sync,
{
    let waypoints = route.waypoints();
    let stitch_options = StitchOptions {
        parallel: options.parallel,
        cancel: options.cancel.clone(),
    };

    let report: StitchReport = if options.road_geometry {
        stitch_route_detailed(provider, &waypoints, &stitch_options)
    } else {
        stitch_route_detailed(&StraightLine, &waypoints, &stitch_options)
    };

    let estimate = RouteEstimate::for_points(report.geometry.points(), options.average_speed_kmh);
    let fallback_segments = if options.road_geometry { report.fallback_count() } else { 0 };

    tracing::info!(
        stops = route.len(),
        distance_km = estimate.distance_km,
        duration = %estimate.duration,
        fallback_segments,
        "route planned"
    );

    RoutePlan {
        route,
        geometry: report.geometry,
        estimate,
        fallback_segments,
    }
}
