//! Parsers for the station JSON feed and the trip CSV export.
//!
//! Bad records are skipped with a warning rather than failing the whole load;
//! only an unreadable document is an error.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::traffic::{Station, Trip};

/// Records accepted from a source, plus how many were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

impl<T> Default for LoadReport<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
        }
    }
}

#[derive(Deserialize)]
struct StationFeed {
    data: StationFeedData,
}

#[derive(Deserialize)]
struct StationFeedData {
    stations: Vec<StationRecord>,
}

#[derive(Deserialize)]
struct StationRecord {
    short_name: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "number_or_string")]
    lon: Option<f64>,
    #[serde(default, deserialize_with = "number_or_string")]
    lat: Option<f64>,
}

/// Accepts `42.36`, `"42.36"` or a missing/blank value.
fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// Parses the `{ "data": { "stations": [...] } }` station document.
///
/// `short_name` becomes the station id. Stations missing an id or coordinates
/// are skipped; a repeated id keeps its first occurrence.
pub fn parse_stations(bytes: &[u8]) -> Result<LoadReport<Station>> {
    let feed: StationFeed =
        serde_json::from_slice(bytes).context("Station document is not valid JSON")?;

    let mut seen = HashSet::new();
    let mut report = LoadReport::default();

    for record in feed.data.stations {
        let (Some(id), Some(lon), Some(lat)) = (record.short_name, record.lon, record.lat) else {
            warn!(name = %record.name, "Skipping station without id or coordinates");
            report.skipped += 1;
            continue;
        };

        if !seen.insert(id.clone()) {
            warn!(station_id = %id, "Skipping duplicate station");
            report.skipped += 1;
            continue;
        }

        report.records.push(Station::new(id, record.name, lon, lat));
    }

    debug!(
        stations = report.records.len(),
        skipped = report.skipped,
        "Stations parsed"
    );
    Ok(report)
}

#[derive(Debug, Deserialize)]
struct TripRecord {
    #[serde(default)]
    started_at: String,
    #[serde(default)]
    ended_at: String,
    #[serde(default)]
    start_station_id: String,
    #[serde(default)]
    end_station_id: String,
}

impl TripRecord {
    fn into_trip(self) -> Option<Trip> {
        if self.start_station_id.is_empty() || self.end_station_id.is_empty() {
            return None;
        }
        Some(Trip {
            started_at: parse_timestamp(&self.started_at)?,
            ended_at: parse_timestamp(&self.ended_at)?,
            start_station_id: self.start_station_id,
            end_station_id: self.end_station_id,
        })
    }
}

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parses a trip timestamp, keeping its wall-clock time.
///
/// RFC 3339 values keep their local offset's clock time; the offset itself is
/// dropped since only the minute of the day matters.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.naive_local());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// Parses the trip CSV. Extra columns are ignored.
///
/// Rows with malformed timestamps or empty station ids are skipped and counted.
pub fn parse_trips(bytes: &[u8]) -> Result<LoadReport<Trip>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut report = LoadReport::default();

    for (row, result) in reader.deserialize::<TripRecord>().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(row, error = %e, "Skipping unreadable trip row");
                report.skipped += 1;
                continue;
            }
        };

        match record.into_trip() {
            Some(trip) => report.records.push(trip),
            None => {
                warn!(row, "Skipping trip with missing station or timestamp");
                report.skipped += 1;
            }
        }
    }

    debug!(
        trips = report.records.len(),
        skipped = report.skipped,
        "Trips parsed"
    );
    Ok(report)
}
