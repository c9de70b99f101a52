// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a read, an enrichment run or a write.
///
/// Per-row lookup failures are not in here: they are written into the
/// output row as the error sentinel and the run carries on.
#[derive(Error, Debug)]
pub enum GeocoderError {
    /// No header cell matches the configured address label.
    #[error("The address column was not found in the CSV using the address label given (label: {label:?})")]
    AddressColumnNotFound { label: String },

    /// `write` was called before `add_geocode` produced a table.
    #[error("No CSV file to write, please call add_geocode before writing")]
    NoTableToWrite,

    /// The address label does not compile as a pattern.
    #[error("invalid address label {label:?}: {source}")]
    InvalidAddressLabel {
        label: String,
        #[source]
        source: regex::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Building the HTTP client failed. Individual lookups never produce this.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, GeocoderError>;
