// src/geocode/nominatim.rs

use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use super::{Candidate, Coordinates, GeocodeClient, Lookup};
use crate::error::Result;

/// OpenStreetMap Nominatim search. Needs an identifying User-Agent.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: Option<String>,
    lon: Option<String>,
}

impl NominatimGeocoder {
    pub fn new(endpoint: impl Into<String>, user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    fn request_url(&self, address: &str) -> std::result::Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.endpoint)?;
        url.query_pairs_mut()
            .append_pair("q", address)
            .append_pair("format", "json")
            .append_pair("limit", "1");
        Ok(url)
    }

    fn fetch(&self, address: &str) -> anyhow::Result<String> {
        let url = self.request_url(address)?;
        Ok(self.client.get(url).send()?.error_for_status()?.text()?)
    }
}

pub(crate) fn parse_response(body: &str) -> Lookup {
    match serde_json::from_str::<Vec<Place>>(body) {
        Ok(places) => Lookup::from_candidates(places.into_iter().map(|p| Candidate {
            coordinates: match (p.lat, p.lon) {
                (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
                _ => None,
            },
        })),
        Err(e) => Lookup::ProviderError(format!("unparsable response: {}", e)),
    }
}

impl GeocodeClient for NominatimGeocoder {
    #[instrument(level = "debug", skip(self))]
    fn search(&self, address: &str) -> Lookup {
        let lookup = match self.fetch(address) {
            Ok(body) => parse_response(&body),
            Err(e) => Lookup::ProviderError(format!("{:#}", e)),
        };
        match &lookup {
            Lookup::ProviderError(msg) => warn!(address, error = %msg, "nominatim lookup failed"),
            other => debug!(address, outcome = ?other, "nominatim lookup"),
        }
        lookup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_coordinates_pass_through() {
        let body = r#"[{"place_id":1,"lat":"51.5033635","lon":"-0.1276248","display_name":"10 Downing Street"}]"#;
        assert_eq!(
            parse_response(body),
            Lookup::Found(Coordinates::new("51.5033635", "-0.1276248"))
        );
    }

    #[test]
    fn empty_array_is_no_result() {
        assert_eq!(parse_response("[]"), Lookup::NoResult);
    }

    #[test]
    fn error_object_is_provider_error() {
        let body = r#"{"error":{"code":429,"message":"Too Many Requests"}}"#;
        assert!(matches!(parse_response(body), Lookup::ProviderError(_)));
    }

    #[test]
    fn request_url_asks_for_one_json_hit() -> anyhow::Result<()> {
        let n = NominatimGeocoder::new(
            "https://example.test/search",
            "csv-geocoder-tests",
            Duration::from_secs(1),
        )?;
        assert_eq!(
            n.request_url("Baker St")?.as_str(),
            "https://example.test/search?q=Baker+St&format=json&limit=1"
        );
        Ok(())
    }
}
