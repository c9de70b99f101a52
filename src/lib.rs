// src/lib.rs

//! Append latitude/longitude columns to a CSV by geocoding its address column.

pub mod config;
pub mod engine;
pub mod error;
pub mod geocode;
pub mod geocoder;
pub mod resolver;
pub mod table;

pub use config::{GeocoderConfig, ProviderConfig};
pub use engine::{EnrichmentEngine, GeocodeResult, Pause, ThreadSleep};
pub use error::{GeocoderError, Result};
pub use geocode::{Candidate, Coordinates, GeocodeClient, Lookup};
pub use geocoder::CsvGeocoder;
pub use resolver::AddressLabel;
pub use table::{Cell, Row, Table};
