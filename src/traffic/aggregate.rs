use crate::traffic::types::{Station, StationTraffic, Trip};
use std::collections::HashMap;
use std::sync::Arc;

/// Counts arrivals and departures per station.
///
/// Departures are keyed by `start_station_id`, arrivals by `end_station_id`.
/// Output follows `stations` order; stations without trips get zero counts and
/// trips naming unknown stations are ignored. Stations are shared, never modified.
pub fn aggregate<'a, I>(stations: &[Arc<Station>], trips: I) -> Vec<StationTraffic>
where
    I: IntoIterator<Item = &'a Trip>,
{
    let mut departures: HashMap<&str, u32> = HashMap::new();
    let mut arrivals: HashMap<&str, u32> = HashMap::new();

    for trip in trips {
        *departures.entry(trip.start_station_id.as_str()).or_default() += 1;
        *arrivals.entry(trip.end_station_id.as_str()).or_default() += 1;
    }

    stations
        .iter()
        .map(|station| {
            let id = station.id.as_str();
            StationTraffic::new(
                Arc::clone(station),
                arrivals.get(id).copied().unwrap_or(0),
                departures.get(id).copied().unwrap_or(0),
            )
        })
        .collect()
}

/// Largest total traffic in the set, 0 when empty.
pub fn max_traffic(traffic: &[StationTraffic]) -> u32 {
    traffic.iter().map(|t| t.total_traffic).max().unwrap_or(0)
}
