// src/engine.rs

use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, trace};

use crate::error::{GeocoderError, Result};
use crate::geocode::{GeocodeClient, Lookup};
use crate::resolver::{resolve, AddressLabel};
use crate::table::{Cell, Row, Table};

pub const TITLE_LAT: &str = "Latitude";
pub const TITLE_LNG: &str = "Longitude";
pub const API_ERROR: &str = "API Error";

/// The pair appended to each row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodeResult {
    /// Header row: "Latitude" / "Longitude".
    Title,
    /// No address text: both cells absent.
    Empty,
    /// Provider gave nothing usable: "API Error" twice.
    Error,
    Coordinates { lat: String, lng: String },
}

impl GeocodeResult {
    pub fn lat(&self) -> Cell {
        match self {
            GeocodeResult::Title => Some(TITLE_LAT.to_string()),
            GeocodeResult::Empty => None,
            GeocodeResult::Error => Some(API_ERROR.to_string()),
            GeocodeResult::Coordinates { lat, .. } => Some(lat.clone()),
        }
    }

    pub fn lng(&self) -> Cell {
        match self {
            GeocodeResult::Title => Some(TITLE_LNG.to_string()),
            GeocodeResult::Empty => None,
            GeocodeResult::Error => Some(API_ERROR.to_string()),
            GeocodeResult::Coordinates { lng, .. } => Some(lng.clone()),
        }
    }
}

/// Blocking wait before a provider call.
pub trait Pause {
    fn pause(&self, delay: Duration);
}

impl<P: Pause + ?Sized> Pause for &P {
    fn pause(&self, delay: Duration) {
        (**self).pause(delay)
    }
}

/// Sleeps the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleep;

impl Pause for ThreadSleep {
    fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

#[derive(Debug, Default)]
struct RunStats {
    geocoded: usize,
    empty: usize,
    failed: usize,
}

/// Sequential, rate-limited enrichment of a table with coordinates.
pub struct EnrichmentEngine<C, P = ThreadSleep> {
    client: C,
    pause: P,
    delay: Duration,
}

impl<C: GeocodeClient> EnrichmentEngine<C, ThreadSleep> {
    pub fn new(client: C, delay: Duration) -> Self {
        Self::with_pause(client, delay, ThreadSleep)
    }
}

impl<C: GeocodeClient, P: Pause> EnrichmentEngine<C, P> {
    pub fn with_pause(client: C, delay: Duration, pause: P) -> Self {
        Self {
            client,
            pause,
            delay,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn pause(&self) -> &P {
        &self.pause
    }

    /// Return a new table with latitude and longitude appended to every row.
    ///
    /// Fails with [`GeocoderError::AddressColumnNotFound`] before any lookup
    /// if no header cell matches `label`. Lookup failures never fail the run;
    /// they land in the row as the error sentinel.
    #[instrument(level = "info", skip(self, table, label), fields(rows = table.len(), label = label.as_str()))]
    pub fn enrich(&self, table: &Table, label: &AddressLabel) -> Result<Table> {
        let start = Instant::now();
        let index = table
            .header()
            .and_then(|header| resolve(header, label))
            .ok_or_else(|| GeocoderError::AddressColumnNotFound {
                label: label.as_str().to_string(),
            })?;

        let mut stats = RunStats::default();
        let results: Vec<GeocodeResult> = table
            .rows()
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                let address = row.get(index).and_then(|c| c.as_deref());
                let result = self.lat_lng(row_idx, address);
                match result {
                    GeocodeResult::Coordinates { .. } => stats.geocoded += 1,
                    GeocodeResult::Empty => stats.empty += 1,
                    GeocodeResult::Error => stats.failed += 1,
                    GeocodeResult::Title => {}
                }
                result
            })
            .collect();

        let merged = merge(table, results);
        info!(
            rows = merged.len(),
            geocoded = stats.geocoded,
            empty = stats.empty,
            failed = stats.failed,
            elapsed = ?start.elapsed(),
            "enrichment finished"
        );
        Ok(merged)
    }

    /// Classify one row and produce its pair. Row 0 is always the header.
    pub fn lat_lng(&self, row_idx: usize, address: Option<&str>) -> GeocodeResult {
        if row_idx == 0 {
            return GeocodeResult::Title;
        }
        let address = match address {
            Some(a) if !a.is_empty() => a,
            _ => {
                trace!(row = row_idx, "no address");
                return GeocodeResult::Empty;
            }
        };

        self.pause.pause(self.delay);
        match self.client.search(address) {
            Lookup::Found(c) => {
                debug!(row = row_idx, address, lat = %c.lat, lng = %c.lng, "geocoded");
                GeocodeResult::Coordinates {
                    lat: c.lat,
                    lng: c.lng,
                }
            }
            Lookup::NoResult | Lookup::ProviderError(_) => {
                debug!(row = row_idx, address, "no usable candidate");
                GeocodeResult::Error
            }
        }
    }
}

/// Zip rows with their results positionally and append lat, lng.
fn merge(table: &Table, results: Vec<GeocodeResult>) -> Table {
    debug_assert_eq!(table.len(), results.len());
    let rows: Vec<Row> = table
        .rows()
        .iter()
        .zip(results)
        .map(|(row, result)| {
            let mut out = Vec::with_capacity(row.len() + 2);
            out.extend(row.iter().cloned());
            out.push(result.lat());
            out.push(result.lng());
            out
        })
        .collect();
    Table::new(rows)
}
