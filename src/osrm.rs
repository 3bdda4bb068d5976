//! OSRM HTTP adapter for per-pair driving directions.

use std::env;

use serde::Deserialize;

use crate::polyline::Polyline;
use crate::traits::{DirectionsError, DirectionsProvider};

/// Where and how to reach an OSRM `route` service.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Scheme, host and port, without a trailing slash.
    pub base_url: String,
    /// Routing profile segment of the URL, e.g. `driving`.
    pub profile: String,
    /// Upper bound for a single segment request.
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

impl OsrmConfig {
    /// Defaults, overridden by `OSRM_BASE_URL`, `OSRM_PROFILE` and
    /// `OSRM_TIMEOUT_SECS` when set. Unparseable timeouts are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = env::var("OSRM_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Ok(profile) = env::var("OSRM_PROFILE") {
            config.profile = profile;
        }
        if let Some(timeout) = env::var("OSRM_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()) {
            config.timeout_secs = timeout;
        }
        config
    }
}

/// Blocking OSRM client answering one waypoint pair per request.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    /// Builds the HTTP client with the configured per-request timeout.
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &OsrmConfig {
        &self.config
    }

    /// `route` request for one pair; OSRM wants `lng,lat` order.
    fn route_url(&self, from: (f64, f64), to: (f64, f64)) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson",
            self.config.base_url, self.config.profile, from.1, from.0, to.1, to.0
        )
    }
}

impl DirectionsProvider for OsrmClient {
    #[tracing::instrument(skip(self))]
    fn route_between(&self, from: (f64, f64), to: (f64, f64)) -> Result<Polyline, DirectionsError> {
        let body = self
            .client
            .get(self.route_url(from, to))
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>())?;

        body.into_polyline()
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// GeoJSON order: [lng, lat].
    coordinates: Vec<[f64; 2]>,
}

impl OsrmRouteResponse {
    fn into_polyline(self) -> Result<Polyline, DirectionsError> {
        if self.code != "Ok" {
            return Err(DirectionsError::Status(self.code));
        }
        let route = self.routes.into_iter().next().ok_or(DirectionsError::NoRoute)?;
        if route.geometry.coordinates.is_empty() {
            return Err(DirectionsError::InvalidGeometry);
        }

        Ok(Polyline::new(
            route
                .geometry
                .coordinates
                .into_iter()
                .map(|[lng, lat]| (lat, lng))
                .collect(),
        ))
    }
}
