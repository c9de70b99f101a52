// src/geocoder.rs

use std::{path::Path, time::Duration};
use tracing::info;

use crate::config::GeocoderConfig;
use crate::engine::{EnrichmentEngine, Pause, ThreadSleep};
use crate::error::{GeocoderError, Result};
use crate::geocode::GeocodeClient;
use crate::resolver::AddressLabel;
use crate::table::{read_table, write_table, Table};

/// Load a CSV, geocode its address column, write the result.
///
/// ```no_run
/// use csv_geocoder::{CsvGeocoder, GeocoderConfig, ProviderConfig, geocode};
/// use std::time::Duration;
///
/// let client = geocode::client_from_config(&ProviderConfig::nominatim(), Duration::from_secs(10))?;
/// CsvGeocoder::open("people.csv", GeocoderConfig::default(), client)?
///     .add_geocode()?
///     .write("people_geocoded.csv")?;
/// # Ok::<(), csv_geocoder::GeocoderError>(())
/// ```
pub struct CsvGeocoder<C, P = ThreadSleep> {
    config: GeocoderConfig,
    client: C,
    pause: P,
    table: Table,
    enriched: Option<Table>,
}

impl<C: GeocodeClient> CsvGeocoder<C, ThreadSleep> {
    pub fn open<Q: AsRef<Path>>(path: Q, config: GeocoderConfig, client: C) -> Result<Self> {
        Ok(Self::from_table(read_table(path)?, config, client))
    }

    pub fn from_table(table: Table, config: GeocoderConfig, client: C) -> Self {
        Self::with_pause(table, config, client, ThreadSleep)
    }
}

impl<C: GeocodeClient, P: Pause> CsvGeocoder<C, P> {
    pub fn with_pause(table: Table, config: GeocoderConfig, client: C, pause: P) -> Self {
        Self {
            config,
            client,
            pause,
            table,
            enriched: None,
        }
    }

    /// Replace the loaded table. Any earlier result is dropped.
    pub fn read<Q: AsRef<Path>>(&mut self, path: Q) -> Result<&mut Self> {
        self.table = read_table(path)?;
        self.enriched = None;
        Ok(self)
    }

    pub fn add_geocode(&mut self) -> Result<&mut Self> {
        let label = AddressLabel::new(self.config.address_label.as_str())?;
        let engine = EnrichmentEngine::with_pause(&self.client, self.config.delay, &self.pause);
        self.enriched = Some(engine.enrich(&self.table, &label)?);
        Ok(self)
    }

    pub fn write<Q: AsRef<Path>>(&self, path: Q) -> Result<()> {
        let table = self.enriched.as_ref().ok_or(GeocoderError::NoTableToWrite)?;
        write_table(&path, table)?;
        info!(path = %path.as_ref().display(), rows = table.len(), "enriched table written");
        Ok(())
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn enriched(&self) -> Option<&Table> {
        self.enriched.as_ref()
    }

    pub fn config(&self) -> &GeocoderConfig {
        &self.config
    }

    pub fn set_address_label(&mut self, label: impl Into<String>) {
        self.config.address_label = label.into();
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.config.delay = delay;
    }
}
