//! Reverse geocoding for stop labels.
//!
//! Display only. A failed lookup leaves the address empty and the rest of
//! the planning flow carries on.

use std::env;

use serde::Deserialize;

use crate::stop::Stop;
use crate::traits::{ReverseGeocoder, Waypoint};

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying user agent.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("route-sequencer/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
        }
    }
}

impl NominatimConfig {
    /// Defaults, overridden by `NOMINATIM_BASE_URL` and `NOMINATIM_USER_AGENT`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = env::var("NOMINATIM_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Ok(user_agent) = env::var("NOMINATIM_USER_AGENT") {
            config.user_agent = user_agent;
        }
        config
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }
}

#[derive(Debug, Deserialize)]
struct NominatimReverse {
    display_name: Option<String>,
}

impl ReverseGeocoder for NominatimClient {
    #[tracing::instrument(skip(self))]
    fn address_for(&self, location: (f64, f64)) -> Option<String> {
        let (lat, lng) = location;
        let url = format!("{}/reverse", self.config.base_url);

        let response = self
            .client
            .get(url)
            .query(&[("format", "jsonv2")])
            .query(&[("lat", format!("{:.6}", lat)), ("lon", format!("{:.6}", lng))])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<NominatimReverse>());

        match response {
            Ok(body) => body.display_name.filter(|name| !name.is_empty()),
            Err(err) => {
                tracing::warn!(%err, "reverse geocoding failed");
                None
            }
        }
    }
}

/// Fill in missing addresses. Returns how many stops got one.
pub fn annotate_addresses<G: ReverseGeocoder>(geocoder: &G, stops: &mut [Stop]) -> usize {
    let mut filled = 0;
    for stop in stops.iter_mut().filter(|stop| stop.details.address.is_none()) {
        if let Some(address) = geocoder.address_for(stop.location()) {
            stop.details.address = Some(address);
            filled += 1;
        }
    }
    filled
}
