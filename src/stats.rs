use serde::Serialize;

use crate::controller::TrafficFrame;
use crate::traffic::FlowBucket;

/// Headline numbers for one frame, logged after each pipeline pass.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct TrafficSummary {
    pub selection: i32,
    pub stations: usize,
    pub trips_considered: usize,

    // endpoints
    pub total_traffic: u64,
    pub matched_endpoints_pct: f64,

    // busiest
    pub busiest_station: Option<String>,
    pub busiest_traffic: u32,

    // flow buckets
    pub mostly_arrivals: usize,
    pub balanced: usize,
    pub mostly_departures: usize,
    pub idle: usize,
}

impl TrafficSummary {
    pub fn from_frame(frame: &TrafficFrame) -> Self {
        let mut s = TrafficSummary {
            selection: frame.selection,
            stations: frame.stations.len(),
            trips_considered: frame.trips_considered,
            ..Default::default()
        };

        for station in &frame.stations {
            s.total_traffic += u64::from(station.total_traffic);

            if station.total_traffic > s.busiest_traffic {
                s.busiest_traffic = station.total_traffic;
                s.busiest_station = Some(station.station_id.clone());
            }

            if station.total_traffic == 0 {
                s.idle += 1;
            }

            match station.flow_bucket {
                FlowBucket::Arrivals => s.mostly_arrivals += 1,
                FlowBucket::Balanced => s.balanced += 1,
                FlowBucket::Departures => s.mostly_departures += 1,
            }
        }

        // Every trip has two endpoints; unknown station ids are not counted.
        s.matched_endpoints_pct = Self::pct(s.total_traffic as usize, 2 * s.trips_considered);
        s
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }
}
