//! Event-driven control loop around the traffic pipeline.
//!
//! All session state lives in a [`TrafficContext`] owned by a [`Controller`];
//! each external event maps to exactly one [`Controller::handle`] call, which
//! runs to completion before the next event is processed.

use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::selection::TimeSelection;
use crate::traffic::{Station, Trip, VisualStation, aggregate, filter_trips, map_to_visual};
use crate::traffic::aggregate::max_traffic;
use crate::traffic::visual::radius_scale;

/// Loaded stations and trips. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct TrafficContext {
    stations: Vec<Arc<Station>>,
    trips: Vec<Trip>,
}

impl TrafficContext {
    pub fn new(stations: Vec<Station>, trips: Vec<Trip>) -> Self {
        Self {
            stations: stations.into_iter().map(Arc::new).collect(),
            trips,
        }
    }

    pub fn stations(&self) -> &[Arc<Station>] {
        &self.stations
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty() || self.trips.is_empty()
    }

    /// Runs filter, aggregate and visual mapping for `selection`.
    pub fn frame(&self, selection: TimeSelection) -> TrafficFrame {
        run_pipeline(&self.stations, &self.trips, selection)
    }
}

/// Output of one pipeline pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficFrame {
    pub selection: i32,
    pub label: String,
    pub trips_considered: usize,
    pub max_traffic: u32,
    pub radius_range: (f64, f64),
    pub stations: Vec<VisualStation>,
}

/// Filters trips by `selection`, counts them per station and maps the counts to
/// visual parameters. Empty inputs give a frame with no stations.
pub fn run_pipeline(
    stations: &[Arc<Station>],
    trips: &[Trip],
    selection: TimeSelection,
) -> TrafficFrame {
    let filtered = filter_trips(trips, selection);
    let trips_considered = filtered.len();
    let traffic = aggregate(stations, filtered);
    let scale = radius_scale(&traffic, selection.is_active());

    debug!(
        selection = selection.raw(),
        trips_considered,
        stations = traffic.len(),
        "Pipeline pass complete"
    );

    TrafficFrame {
        selection: selection.raw(),
        label: selection.label(),
        trips_considered,
        max_traffic: max_traffic(&traffic),
        radius_range: scale.range(),
        stations: map_to_visual(&traffic, selection.is_active()),
    }
}

/// Pixel coordinates on the rendered map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Where a station's circle sits for the current viewport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationPosition {
    pub station_id: String,
    pub point: ScreenPoint,
}

/// Drawing side of the map. Owns the projection and the circles.
pub trait Renderer {
    /// Projects a coordinate into pixels for the current viewport.
    fn project(&self, lon: f64, lat: f64) -> ScreenPoint;

    fn draw(&mut self, frame: &TrafficFrame) -> Result<()>;

    fn place(&mut self, positions: &[StationPosition]) -> Result<()>;
}

/// Projects every station through `renderer`.
pub fn station_positions<R: Renderer + ?Sized>(
    stations: &[Arc<Station>],
    renderer: &R,
) -> Vec<StationPosition> {
    stations
        .iter()
        .map(|station| StationPosition {
            station_id: station.id.clone(),
            point: renderer.project(station.lon, station.lat),
        })
        .collect()
}

/// Something that happened outside the core.
#[derive(Debug)]
pub enum Event {
    /// Initial data load finished.
    Loaded {
        stations: Vec<Station>,
        trips: Vec<Trip>,
    },
    /// Initial data load failed; previous state is kept.
    LoadFailed(anyhow::Error),
    /// The input control moved.
    SelectionChanged(TimeSelection),
    /// The map was moved, zoomed or resized.
    ViewportChanged,
}

pub struct Controller<R: Renderer> {
    context: TrafficContext,
    selection: TimeSelection,
    renderer: R,
    last_frame: Option<TrafficFrame>,
}

impl<R: Renderer> Controller<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            context: TrafficContext::default(),
            selection: TimeSelection::Any,
            renderer,
            last_frame: None,
        }
    }

    pub fn context(&self) -> &TrafficContext {
        &self.context
    }

    pub fn selection(&self) -> TimeSelection {
        self.selection
    }

    pub fn last_frame(&self) -> Option<&TrafficFrame> {
        self.last_frame.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn handle(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Loaded { stations, trips } => {
                info!(
                    stations = stations.len(),
                    trips = trips.len(),
                    "Traffic data loaded"
                );
                self.context = TrafficContext::new(stations, trips);
                self.redraw()?;
                self.reposition()
            }
            Event::LoadFailed(e) => {
                error!(error = %e, "Traffic data load failed, keeping current view");
                Ok(())
            }
            Event::SelectionChanged(selection) => {
                self.selection = selection;
                self.redraw()
            }
            Event::ViewportChanged => self.reposition(),
        }
    }

    fn redraw(&mut self) -> Result<()> {
        let frame = self.context.frame(self.selection);
        self.renderer.draw(&frame)?;
        self.last_frame = Some(frame);
        Ok(())
    }

    fn reposition(&mut self) -> Result<()> {
        let positions = station_positions(self.context.stations(), &self.renderer);
        self.renderer.place(&positions)
    }
}
