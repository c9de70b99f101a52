// src/config.rs

use serde::{Deserialize, Deserializer};
use std::time::Duration;

pub const DEFAULT_ADDRESS_LABEL: &str = "Address";
/// Pause before each lookup; keeps us under ~5 requests/second.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(210);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const GOOGLE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";
pub const NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = concat!("csv-geocoder/", env!("CARGO_PKG_VERSION"));

/// Knobs for one enrichment run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Case-insensitive pattern matched against header cells.
    pub address_label: String,
    /// Blocking pause before every provider call, in seconds when deserialized.
    #[serde(deserialize_with = "duration_from_secs")]
    pub delay: Duration,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            address_label: DEFAULT_ADDRESS_LABEL.to_string(),
            delay: DEFAULT_DELAY,
        }
    }
}

impl GeocoderConfig {
    pub fn with_address_label(mut self, label: impl Into<String>) -> Self {
        self.address_label = label.into();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

fn duration_from_secs<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
}

/// Which geocoding service to talk to, and how.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ProviderConfig {
    Google {
        api_key: Option<String>,
        #[serde(default = "default_google_endpoint")]
        endpoint: String,
    },
    Nominatim {
        #[serde(default = "default_nominatim_endpoint")]
        endpoint: String,
        #[serde(default = "default_user_agent")]
        user_agent: String,
    },
}

impl ProviderConfig {
    pub fn google(api_key: Option<String>) -> Self {
        ProviderConfig::Google {
            api_key,
            endpoint: default_google_endpoint(),
        }
    }

    pub fn nominatim() -> Self {
        ProviderConfig::Nominatim {
            endpoint: default_nominatim_endpoint(),
            user_agent: default_user_agent(),
        }
    }

    /// Point the provider at a different base URL (proxies, test servers).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        match &mut self {
            ProviderConfig::Google { endpoint, .. } | ProviderConfig::Nominatim { endpoint, .. } => {
                *endpoint = url.into();
            }
        }
        self
    }

    pub fn endpoint(&self) -> &str {
        match self {
            ProviderConfig::Google { endpoint, .. } | ProviderConfig::Nominatim { endpoint, .. } => {
                endpoint
            }
        }
    }
}

fn default_google_endpoint() -> String {
    GOOGLE_ENDPOINT.to_string()
}

fn default_nominatim_endpoint() -> String {
    NOMINATIM_ENDPOINT.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = GeocoderConfig::default();
        assert_eq!(cfg.address_label, "Address");
        assert_eq!(cfg.delay, Duration::from_millis(210));
    }

    #[test]
    fn deserializes_fractional_delay_and_fills_missing_fields() {
        let cfg: GeocoderConfig = serde_json::from_str(r#"{"delay": 0.5}"#).unwrap();
        assert_eq!(cfg.delay, Duration::from_millis(500));
        assert_eq!(cfg.address_label, DEFAULT_ADDRESS_LABEL);
    }

    #[test]
    fn rejects_negative_delay() {
        let res: Result<GeocoderConfig, _> = serde_json::from_str(r#"{"delay": -1.0}"#);
        assert!(res.is_err());
    }

    #[test]
    fn provider_tag_selects_variant_with_default_endpoint() {
        let p: ProviderConfig =
            serde_json::from_str(r#"{"provider": "google", "api_key": "k"}"#).unwrap();
        assert_eq!(p.endpoint(), GOOGLE_ENDPOINT);

        let p: ProviderConfig = serde_json::from_str(r#"{"provider": "nominatim"}"#).unwrap();
        assert_eq!(p, ProviderConfig::nominatim());
    }

    #[test]
    fn endpoint_override() {
        let p = ProviderConfig::google(None).with_endpoint("http://localhost:9000/geocode");
        assert_eq!(p.endpoint(), "http://localhost:9000/geocode");
    }
}
