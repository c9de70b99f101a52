// src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use csv_geocoder::{geocode, CsvGeocoder, GeocoderConfig, ProviderConfig};
use std::{path::PathBuf, time::Duration};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Provider {
    Google,
    Nominatim,
}

/// Geocode the address column of a CSV and append Latitude/Longitude.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// CSV to read; first row is the header
    input: PathBuf,

    /// Where to write the enriched CSV
    output: PathBuf,

    /// Case-insensitive pattern matched against header cells
    #[arg(long, default_value = "Address")]
    address_label: String,

    /// Seconds to wait before each lookup
    #[arg(long, default_value_t = 0.21)]
    delay: f64,

    #[arg(long, value_enum, default_value = "google")]
    provider: Provider,

    #[arg(long, env = "GEOCODER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Override the provider's base URL
    #[arg(long, env = "GEOCODER_ENDPOINT")]
    endpoint: Option<String>,

    /// HTTP timeout per lookup, in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();

    let delay = Duration::try_from_secs_f64(args.delay)
        .with_context(|| format!("invalid --delay {}", args.delay))?;
    let config = GeocoderConfig::default()
        .with_address_label(args.address_label)
        .with_delay(delay);

    let mut provider = match args.provider {
        Provider::Google => ProviderConfig::google(args.api_key),
        Provider::Nominatim => ProviderConfig::nominatim(),
    };
    if let Some(endpoint) = args.endpoint {
        provider = provider.with_endpoint(endpoint);
    }
    let client = geocode::client_from_config(&provider, Duration::from_secs(args.timeout))
        .context("building geocoding client")?;

    info!(
        input = %args.input.display(),
        provider = ?args.provider,
        endpoint = provider.endpoint(),
        "starting"
    );

    CsvGeocoder::open(&args.input, config, client)
        .with_context(|| format!("reading {}", args.input.display()))?
        .add_geocode()
        .context("geocoding")?
        .write(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    info!(output = %args.output.display(), "done");
    Ok(())
}
