//! Road-route stitching.
//!
//! Fetches driving geometry for each consecutive pair of waypoints and splices
//! the segments into one continuous path. A pair that cannot be routed becomes
//! a straight line; one bad segment never sinks the whole route.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::polyline::Polyline;
use crate::traits::DirectionsProvider;

/// Cooperative cancellation flag, checked before each segment request.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StitchOptions {
    /// Fetch segments concurrently. Splicing still happens in pair order.
    pub parallel: bool,
    pub cancel: Option<CancelToken>,
}

/// Where a segment's geometry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentSource {
    Road,
    Fallback,
    /// Skipped after cancellation; drawn as a straight line.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StitchReport {
    pub geometry: Polyline,
    /// One entry per consecutive waypoint pair.
    pub segments: Vec<SegmentSource>,
}

impl StitchReport {
    pub fn fallback_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|source| **source != SegmentSource::Road)
            .count()
    }
}

/// Stitch road geometry through `waypoints`, one request at a time.
pub fn stitch_route<P: DirectionsProvider>(provider: &P, waypoints: &[(f64, f64)]) -> Polyline {
    stitch_sequential(provider, waypoints, None).geometry
}

pub fn stitch_route_with<P>(provider: &P, waypoints: &[(f64, f64)], options: &StitchOptions) -> Polyline
where
    P: DirectionsProvider + Sync,
{
    stitch_route_detailed(provider, waypoints, options).geometry
}

/// Stitch and report per-segment provenance, sequentially or in parallel
/// depending on `options`.
///
/// Fewer than two waypoints come back unchanged with no segments.
pub fn stitch_route_detailed<P>(
    provider: &P,
    waypoints: &[(f64, f64)],
    options: &StitchOptions,
) -> StitchReport
where
    P: DirectionsProvider + Sync,
{
    let cancel = options.cancel.as_ref();
    if options.parallel {
        stitch_parallel(provider, waypoints, cancel)
    } else {
        stitch_sequential(provider, waypoints, cancel)
    }
}

/// Segment `i + 1` is only requested once segment `i` has settled.
#[tracing::instrument(skip(provider, waypoints, cancel), fields(waypoints = waypoints.len()))]
pub fn stitch_sequential<P: DirectionsProvider>(
    provider: &P,
    waypoints: &[(f64, f64)],
    cancel: Option<&CancelToken>,
) -> StitchReport {
    let fetched = waypoints
        .windows(2)
        .enumerate()
        .map(|(index, pair)| fetch_segment(provider, index, pair[0], pair[1], cancel))
        .collect();
    splice(waypoints, fetched)
}

/// Requests every segment concurrently on the rayon pool. Results are
/// collected in pair order, so the geometry matches [`stitch_sequential`].
#[tracing::instrument(skip(provider, waypoints, cancel), fields(waypoints = waypoints.len()))]
pub fn stitch_parallel<P>(
    provider: &P,
    waypoints: &[(f64, f64)],
    cancel: Option<&CancelToken>,
) -> StitchReport
where
    P: DirectionsProvider + Sync,
{
    let fetched = waypoints
        .par_windows(2)
        .enumerate()
        .map(|(index, pair)| fetch_segment(provider, index, pair[0], pair[1], cancel))
        .collect();
    splice(waypoints, fetched)
}

fn splice(waypoints: &[(f64, f64)], fetched: Vec<(Polyline, SegmentSource)>) -> StitchReport {
    if waypoints.len() < 2 {
        return StitchReport {
            geometry: Polyline::new(waypoints.to_vec()),
            segments: Vec::new(),
        };
    }

    let mut geometry = Polyline::default();
    let mut segments = Vec::with_capacity(fetched.len());
    for (segment, source) in fetched {
        geometry.append_segment(segment);
        segments.push(source);
    }

    StitchReport { geometry, segments }
}

fn fetch_segment<P: DirectionsProvider>(
    provider: &P,
    index: usize,
    from: (f64, f64),
    to: (f64, f64),
    cancel: Option<&CancelToken>,
) -> (Polyline, SegmentSource) {
    if cancel.is_some_and(CancelToken::is_cancelled) {
        return (Polyline::straight(from, to), SegmentSource::Cancelled);
    }

    match provider.route_between(from, to) {
        // A single point can't be spliced.
        Ok(segment) if segment.len() >= 2 => {
            tracing::debug!(segment = index, points = segment.len(), "road segment");
            (segment, SegmentSource::Road)
        }
        Ok(segment) => {
            tracing::warn!(segment = index, points = segment.len(), "degenerate road segment, using straight line");
            (Polyline::straight(from, to), SegmentSource::Fallback)
        }
        Err(err) => {
            tracing::warn!(segment = index, %err, "no road route, using straight line");
            (Polyline::straight(from, to), SegmentSource::Fallback)
        }
    }
}
