//! Data types flowing through the traffic pipeline.

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use std::sync::Arc;

/// A bike-share dock. Loaded once and shared read-only for the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub lon: f64,
    pub lat: f64,
}

impl Station {
    pub fn new(id: impl Into<String>, name: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lon,
            lat,
        }
    }
}

/// One rental between two stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub start_station_id: String,
    pub end_station_id: String,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
}

impl Trip {
    pub fn start_minute(&self) -> i32 {
        minute_of_day(&self.started_at)
    }

    pub fn end_minute(&self) -> i32 {
        minute_of_day(&self.ended_at)
    }
}

/// Minutes since midnight, ignoring seconds and the date.
pub fn minute_of_day<T: Timelike>(at: &T) -> i32 {
    (at.hour() * 60 + at.minute()) as i32
}

/// Per-station counts derived from one aggregation pass.
///
/// Holds a shared handle to the base [`Station`] instead of a mutated copy, so
/// the loaded snapshot stays identical across recomputations.
#[derive(Debug, Clone, PartialEq)]
pub struct StationTraffic {
    pub station: Arc<Station>,
    pub arrivals: u32,
    pub departures: u32,
    pub total_traffic: u32,
}

impl StationTraffic {
    pub fn new(station: Arc<Station>, arrivals: u32, departures: u32) -> Self {
        Self {
            station,
            arrivals,
            departures,
            total_traffic: arrivals + departures,
        }
    }

    /// Departures as a share of total traffic, `None` when the station saw no trips.
    pub fn departure_ratio(&self) -> Option<f64> {
        if self.total_traffic == 0 {
            None
        } else {
            Some(self.departures as f64 / self.total_traffic as f64)
        }
    }
}

/// Three-way traffic balance used for the diverging color encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "f64")]
pub enum FlowBucket {
    /// Mostly arrivals (`0`).
    Arrivals,
    /// Balanced, or no data (`0.5`).
    Balanced,
    /// Mostly departures (`1`).
    Departures,
}

impl FlowBucket {
    pub fn value(self) -> f64 {
        match self {
            FlowBucket::Arrivals => 0.0,
            FlowBucket::Balanced => 0.5,
            FlowBucket::Departures => 1.0,
        }
    }
}

impl From<FlowBucket> for f64 {
    fn from(bucket: FlowBucket) -> Self {
        bucket.value()
    }
}

/// Everything the rendering collaborator needs to draw one station circle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualStation {
    pub station_id: String,
    pub name: String,
    pub radius_pixels: f64,
    pub flow_bucket: FlowBucket,
    pub total_traffic: u32,
    pub arrivals: u32,
    pub departures: u32,
}

/// Tooltip text shown when hovering a station circle.
pub fn tooltip(station: &VisualStation) -> String {
    format!(
        "{}: {} trips ({} departures, {} arrivals)",
        station.name, station.total_traffic, station.departures, station.arrivals
    )
}
