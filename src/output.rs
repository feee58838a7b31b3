//! Output formatting and persistence for traffic frames.
//!
//! Supports pretty JSON logging and CSV append. [`CsvRenderer`] plugs the CSV
//! writer into the [`Controller`](crate::controller::Controller).

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::controller::{Renderer, ScreenPoint, StationPosition, TrafficFrame};
use crate::traffic::{FlowBucket, tooltip};
use csv::WriterBuilder;
use std::fs::{self, OpenOptions};

/// One CSV row: a station's circle for one time selection.
#[derive(Debug, Serialize)]
pub struct FrameRow<'a> {
    pub selection: i32,
    pub label: &'a str,
    pub station_id: &'a str,
    pub name: &'a str,
    pub radius_pixels: f64,
    pub flow_bucket: FlowBucket,
    pub total_traffic: u32,
    pub departures: u32,
    pub arrivals: u32,
    pub tooltip: String,
}

/// Logs a frame as pretty-printed JSON.
pub fn print_json(frame: &TrafficFrame) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(frame)?);
    Ok(())
}

/// Appends one row per station of `frame` to a CSV file.
///
/// Writes headers when the file is missing or still empty, so a frame with no
/// stations never leaves a headerless file behind.
pub fn append_frame(path: &str, frame: &TrafficFrame) -> Result<()> {
    let needs_header = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
    debug!(
        path,
        needs_header,
        rows = frame.stations.len(),
        "Appending frame"
    );

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(file);

    for station in &frame.stations {
        writer.serialize(FrameRow {
            selection: frame.selection,
            label: &frame.label,
            station_id: &station.station_id,
            name: &station.name,
            radius_pixels: station.radius_pixels,
            flow_bucket: station.flow_bucket,
            total_traffic: station.total_traffic,
            departures: station.departures,
            arrivals: station.arrivals,
            tooltip: tooltip(station),
        })?;
    }
    writer.flush()?;

    Ok(())
}

/// Renders every drawn frame into a CSV file. Tabular output has no viewport,
/// so projection passes coordinates through unchanged.
pub struct CsvRenderer {
    path: String,
    frames_written: usize,
}

impl CsvRenderer {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            frames_written: 0,
        }
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }
}

impl Renderer for CsvRenderer {
    fn project(&self, lon: f64, lat: f64) -> ScreenPoint {
        ScreenPoint { x: lon, y: lat }
    }

    fn draw(&mut self, frame: &TrafficFrame) -> Result<()> {
        append_frame(&self.path, frame)?;
        self.frames_written += 1;
        Ok(())
    }

    fn place(&mut self, positions: &[StationPosition]) -> Result<()> {
        debug!(stations = positions.len(), "Station positions updated");
        Ok(())
    }
}
