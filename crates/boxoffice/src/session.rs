//! Resolving configuration and moving the stores to and from disk

use anyhow::{Context, Result};
use boxoffice_core::{BoxOffice, BoxOfficeConfig};
use camino::Utf8Path;

/// Load the config file (if any) and apply command-line overrides.
pub fn resolve_config(
    config_path: Option<&Utf8Path>,
    data_dir: Option<&Utf8Path>,
) -> Result<BoxOfficeConfig> {
    let mut config = BoxOfficeConfig::load(config_path)?;
    if let Some(dir) = data_dir {
        config.data_dir = dir.to_string();
    }
    tracing::debug!(data_dir = %config.data_dir, autosave = config.autosave, "configuration resolved");
    Ok(config)
}

/// Build the four stores and load them.
pub fn open(config: &BoxOfficeConfig) -> Result<BoxOffice> {
    let office = BoxOffice::open(config)
        .with_context(|| format!("failed to load data from {}", config.data_dir))?;
    let counts = office.counts();
    tracing::info!(
        theater = counts.theater,
        music = counts.music,
        customers = counts.customers,
        bookings = counts.bookings,
        "stores loaded"
    );
    Ok(office)
}

/// Write all four stores back.
pub fn save(office: &BoxOffice) -> Result<()> {
    office.flush().context("failed to save data")?;
    tracing::info!(path = %office.bookings.path(), "stores saved");
    Ok(())
}
