use super::client::DataSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::parser::{LoadReport, parse_stations, parse_trips};
use crate::traffic::{Station, Trip};

/// Reads the station JSON and trip CSV from local files.
#[derive(Debug, Clone)]
pub struct FileSource {
    stations_path: PathBuf,
    trips_path: PathBuf,
}

impl FileSource {
    pub fn new(stations_path: impl Into<PathBuf>, trips_path: impl Into<PathBuf>) -> Self {
        Self {
            stations_path: stations_path.into(),
            trips_path: trips_path.into(),
        }
    }
}

fn log_report<T>(kind: &str, path: &Path, report: &LoadReport<T>) {
    if report.skipped > 0 {
        warn!(
            kind,
            path = %path.display(),
            skipped = report.skipped,
            "Some records were skipped"
        );
    }
    info!(
        kind,
        path = %path.display(),
        loaded = report.records.len(),
        "Records loaded"
    );
}

#[async_trait]
impl DataSource for FileSource {
    #[tracing::instrument(skip(self), fields(path = %self.stations_path.display()))]
    async fn load_stations(&self) -> Result<Vec<Station>> {
        let bytes = tokio::fs::read(&self.stations_path)
            .await
            .with_context(|| format!("Failed to read {}", self.stations_path.display()))?;
        let report = parse_stations(&bytes)
            .with_context(|| format!("Failed to parse {}", self.stations_path.display()))?;

        log_report("stations", &self.stations_path, &report);
        Ok(report.records)
    }

    #[tracing::instrument(skip(self), fields(path = %self.trips_path.display()))]
    async fn load_trips(&self) -> Result<Vec<Trip>> {
        let bytes = tokio::fs::read(&self.trips_path)
            .await
            .with_context(|| format!("Failed to read {}", self.trips_path.display()))?;
        let report = parse_trips(&bytes)
            .with_context(|| format!("Failed to parse {}", self.trips_path.display()))?;

        log_report("trips", &self.trips_path, &report);
        Ok(report.records)
    }
}
