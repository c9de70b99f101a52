// src/geocode/mod.rs

pub mod google;
pub mod nominatim;

pub use google::GoogleGeocoder;
pub use nominatim::NominatimGeocoder;

use std::time::Duration;

use crate::config::ProviderConfig;
use crate::error::Result;

/// A coordinate pair, kept in the provider's own textual form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub lat: String,
    pub lng: String,
}

impl Coordinates {
    pub fn new(lat: impl Into<String>, lng: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lng: lng.into(),
        }
    }
}

/// One hit returned by a provider. Some providers hand back hits
/// without geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub coordinates: Option<Coordinates>,
}

/// Outcome of a single lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(Coordinates),
    NoResult,
    ProviderError(String),
}

impl Lookup {
    /// Only the first candidate counts. If it has no coordinates the
    /// lookup failed, even when later candidates do.
    pub fn from_candidates<I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = Candidate>,
    {
        match candidates.into_iter().next() {
            Some(Candidate {
                coordinates: Some(c),
            }) => Lookup::Found(c),
            _ => Lookup::NoResult,
        }
    }
}

/// Resolves an address to coordinates. Implementations never panic or
/// return an error for a bad lookup; they report it through [`Lookup`].
pub trait GeocodeClient {
    fn search(&self, address: &str) -> Lookup;
}

impl<T: GeocodeClient + ?Sized> GeocodeClient for &T {
    fn search(&self, address: &str) -> Lookup {
        (**self).search(address)
    }
}

impl<T: GeocodeClient + ?Sized> GeocodeClient for Box<T> {
    fn search(&self, address: &str) -> Lookup {
        (**self).search(address)
    }
}

/// Build the HTTP client described by `config`.
pub fn client_from_config(
    config: &ProviderConfig,
    timeout: Duration,
) -> Result<Box<dyn GeocodeClient + Send + Sync>> {
    Ok(match config {
        ProviderConfig::Google { api_key, endpoint } => Box::new(GoogleGeocoder::new(
            endpoint.clone(),
            api_key.clone(),
            timeout,
        )?),
        ProviderConfig::Nominatim {
            endpoint,
            user_agent,
        } => Box::new(NominatimGeocoder::new(
            endpoint.clone(),
            user_agent,
            timeout,
        )?),
    })
}
