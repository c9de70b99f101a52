// src/geocode/google.rs

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Number;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use super::{Candidate, Coordinates, GeocodeClient, Lookup};
use crate::error::Result;

/// Google Maps Geocoding API over blocking HTTP.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Response {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeHit>,
}

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Option<Location>,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: Number,
    lng: Number,
}

impl GoogleGeocoder {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    fn request_url(&self, address: &str) -> std::result::Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.endpoint)?;
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("address", address);
            if let Some(key) = &self.api_key {
                q.append_pair("key", key);
            }
        }
        Ok(url)
    }

    fn fetch(&self, address: &str) -> anyhow::Result<String> {
        let url = self.request_url(address)?;
        let body = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .text()?;
        Ok(body)
    }
}

/// Turn a Geocoding API body into a lookup outcome.
pub(crate) fn parse_response(body: &str) -> Lookup {
    let resp: Response = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return Lookup::ProviderError(format!("unparsable response: {}", e)),
    };

    match resp.status.as_str() {
        "OK" => Lookup::from_candidates(resp.results.into_iter().map(|hit| Candidate {
            coordinates: hit.geometry.and_then(|g| g.location).map(|loc| Coordinates {
                lat: loc.lat.to_string(),
                lng: loc.lng.to_string(),
            }),
        })),
        "ZERO_RESULTS" => Lookup::NoResult,
        status => Lookup::ProviderError(match resp.error_message {
            Some(msg) => format!("{}: {}", status, msg),
            None => status.to_string(),
        }),
    }
}

impl GeocodeClient for GoogleGeocoder {
    #[instrument(level = "debug", skip(self))]
    fn search(&self, address: &str) -> Lookup {
        let lookup = match self.fetch(address) {
            Ok(body) => parse_response(&body),
            Err(e) => Lookup::ProviderError(format!("{:#}", e)),
        };
        match &lookup {
            Lookup::ProviderError(msg) => warn!(address, error = %msg, "google lookup failed"),
            other => debug!(address, outcome = ?other, "google lookup"),
        }
        lookup
    }
}
