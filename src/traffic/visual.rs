use crate::traffic::aggregate::max_traffic;
use crate::traffic::scale::{SqrtScale, quantize_thirds};
use crate::traffic::types::{FlowBucket, StationTraffic, VisualStation};

/// Radius range, in pixels, when every trip is shown.
pub const UNFILTERED_RADIUS: (f64, f64) = (0.0, 25.0);

/// Radius range when a time filter is active. Filtered counts are smaller and
/// more spread out, so the range is wider with a 3 px floor.
pub const FILTERED_RADIUS: (f64, f64) = (3.0, 50.0);

/// Builds the radius scale for a set of station counts.
///
/// The domain is `[0, max total traffic]`, with the max replaced by 1 when the
/// set is empty or has no traffic.
pub fn radius_scale(traffic: &[StationTraffic], filter_active: bool) -> SqrtScale {
    let max = match max_traffic(traffic) {
        0 => 1,
        max => max,
    };
    let range = if filter_active {
        FILTERED_RADIUS
    } else {
        UNFILTERED_RADIUS
    };
    SqrtScale::new((0.0, f64::from(max)), range)
}

/// Buckets a station's departure share. No traffic counts as balanced.
pub fn flow_bucket(traffic: &StationTraffic) -> FlowBucket {
    match traffic.departure_ratio().map(quantize_thirds) {
        None | Some(1) => FlowBucket::Balanced,
        Some(0) => FlowBucket::Arrivals,
        Some(_) => FlowBucket::Departures,
    }
}

/// Derives circle radius and flow bucket for every station, in input order.
pub fn map_to_visual(traffic: &[StationTraffic], filter_active: bool) -> Vec<VisualStation> {
    let scale = radius_scale(traffic, filter_active);

    traffic
        .iter()
        .map(|t| VisualStation {
            station_id: t.station.id.clone(),
            name: t.station.name.clone(),
            radius_pixels: scale.apply(f64::from(t.total_traffic)),
            flow_bucket: flow_bucket(t),
            total_traffic: t.total_traffic,
            arrivals: t.arrivals,
            departures: t.departures,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traffic::types::Station;
    use std::sync::Arc;

    fn traffic(id: &str, arrivals: u32, departures: u32) -> StationTraffic {
        StationTraffic::new(
            Arc::new(Station::new(id, id.to_lowercase(), -71.1, 42.35)),
            arrivals,
            departures,
        )
    }

    #[test]
    fn test_flow_bucket_extremes() {
        assert_eq!(flow_bucket(&traffic("A", 0, 5)), FlowBucket::Departures);
        assert_eq!(flow_bucket(&traffic("B", 5, 0)), FlowBucket::Arrivals);
        assert_eq!(flow_bucket(&traffic("C", 5, 5)), FlowBucket::Balanced);
    }

    #[test]
    fn test_flow_bucket_zero_traffic_is_balanced() {
        assert_eq!(flow_bucket(&traffic("A", 0, 0)), FlowBucket::Balanced);
    }

    #[test]
    fn test_flow_bucket_thresholds() {
        // 1 of 3 departures sits exactly on the first threshold.
        assert_eq!(flow_bucket(&traffic("A", 2, 1)), FlowBucket::Balanced);
        assert_eq!(flow_bucket(&traffic("B", 3, 1)), FlowBucket::Arrivals);
        assert_eq!(flow_bucket(&traffic("C", 1, 2)), FlowBucket::Departures);
        assert_eq!(flow_bucket(&traffic("D", 4, 5)), FlowBucket::Balanced);
    }

    #[test]
    fn test_radius_ranges_follow_filter_state() {
        let set = vec![traffic("A", 2, 2), traffic("B", 0, 0)];

        let unfiltered = map_to_visual(&set, false);
        assert_eq!(unfiltered[0].radius_pixels, 25.0);
        assert_eq!(unfiltered[1].radius_pixels, 0.0);

        let filtered = map_to_visual(&set, true);
        assert_eq!(filtered[0].radius_pixels, 50.0);
        assert_eq!(filtered[1].radius_pixels, 3.0);
    }

    #[test]
    fn test_area_proportional_to_traffic() {
        let set = vec![traffic("A", 50, 50), traffic("B", 10, 15)];
        let visual = map_to_visual(&set, false);

        let area_ratio = (visual[1].radius_pixels / visual[0].radius_pixels).powi(2);
        assert!((area_ratio - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_zero_traffic_domain_is_guarded() {
        let set = vec![traffic("A", 0, 0)];
        let scale = radius_scale(&set, true);
        assert_eq!(scale.domain(), (0.0, 1.0));
        assert_eq!(map_to_visual(&set, true)[0].radius_pixels, 3.0);

        assert_eq!(radius_scale(&[], false).domain(), (0.0, 1.0));
        assert!(map_to_visual(&[], false).is_empty());
    }

    #[test]
    fn test_visual_carries_counts() {
        let visual = map_to_visual(&[traffic("A32", 3, 7)], false);
        assert_eq!(visual[0].station_id, "A32");
        assert_eq!(visual[0].name, "a32");
        assert_eq!(visual[0].arrivals, 3);
        assert_eq!(visual[0].departures, 7);
        assert_eq!(visual[0].total_traffic, 10);
        assert_eq!(visual[0].flow_bucket, FlowBucket::Departures);
    }
}
