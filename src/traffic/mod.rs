//! Station traffic pipeline.
//!
//! Trips are narrowed to a time-of-day window ([`filter`]), counted per
//! station ([`aggregate`]) and turned into circle radii and flow buckets
//! ([`visual`]). Each stage is a pure function of its inputs.

pub mod aggregate;
pub mod filter;
pub mod scale;
pub mod types;
pub mod visual;

pub use aggregate::aggregate;
pub use filter::filter_trips;
pub use types::{
    FlowBucket, Station, StationTraffic, Trip, VisualStation, minute_of_day, tooltip,
};
pub use visual::map_to_visual;
