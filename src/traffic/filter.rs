use crate::selection::TimeSelection;
use crate::traffic::types::Trip;

/// Half-width of the window around the selected minute.
pub const WINDOW_MINUTES: i32 = 60;

/// Keeps the trips that start or end within [`WINDOW_MINUTES`] of the selection.
///
/// `TimeSelection::Any` keeps every trip. Input order is preserved. Minutes are
/// compared linearly, so a selection just after midnight does not reach trips
/// just before it.
pub fn filter_trips(trips: &[Trip], selection: TimeSelection) -> Vec<&Trip> {
    match selection.minute() {
        None => trips.iter().collect(),
        Some(minute) => {
            let minute = i32::from(minute);
            trips
                .iter()
                .filter(|trip| within_window(trip, minute))
                .collect()
        }
    }
}

fn within_window(trip: &Trip, minute: i32) -> bool {
    (trip.start_minute() - minute).abs() <= WINDOW_MINUTES
        || (trip.end_minute() - minute).abs() <= WINDOW_MINUTES
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trip(start: (u32, u32), end: (u32, u32)) -> Trip {
        let day = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();
        Trip {
            start_station_id: "A".to_string(),
            end_station_id: "B".to_string(),
            started_at: day.and_hms_opt(start.0, start.1, 0).unwrap(),
            ended_at: day.and_hms_opt(end.0, end.1, 0).unwrap(),
        }
    }

    #[test]
    fn test_any_keeps_everything_in_order() {
        let trips = vec![trip((23, 0), (23, 30)), trip((1, 0), (1, 5)), trip((8, 0), (9, 0))];
        let kept = filter_trips(&trips, TimeSelection::Any);

        assert_eq!(kept.len(), trips.len());
        for (kept, original) in kept.iter().zip(&trips) {
            assert!(std::ptr::eq(*kept, original));
        }
    }

    #[test]
    fn test_start_within_window() {
        let trips = vec![trip((8, 10), (8, 25))];
        assert_eq!(filter_trips(&trips, TimeSelection::At(480)).len(), 1);
    }

    #[test]
    fn test_end_within_window() {
        // Starts 2h before the selection, ends 30 minutes before it.
        let trips = vec![trip((6, 0), (7, 30))];
        assert_eq!(filter_trips(&trips, TimeSelection::At(480)).len(), 1);
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let trips = vec![
            trip((7, 0), (7, 0)),
            trip((9, 0), (9, 0)),
            trip((6, 59), (6, 59)),
            trip((9, 1), (9, 1)),
        ];
        let kept = filter_trips(&trips, TimeSelection::At(480));
        assert_eq!(kept, vec![&trips[0], &trips[1]]);
    }

    #[test]
    fn test_trip_spanning_the_window_is_excluded() {
        // Neither endpoint is near the selection even though the ride covers it.
        let trips = vec![trip((5, 0), (11, 0))];
        assert!(filter_trips(&trips, TimeSelection::At(480)).is_empty());
    }

    #[test]
    fn test_no_midnight_wraparound() {
        let trips = vec![trip((23, 50), (23, 55))];
        assert!(filter_trips(&trips, TimeSelection::At(10)).is_empty());
        assert_eq!(filter_trips(&trips, TimeSelection::At(1439)).len(), 1);
    }

    #[test]
    fn test_every_kept_trip_is_in_window() {
        let trips: Vec<Trip> = (0..24)
            .flat_map(|h| [trip((h, 0), (h, 20)), trip((h, 45), ((h + 1) % 24, 5))])
            .collect();

        for minute in (0..=1439).step_by(30) {
            for kept in filter_trips(&trips, TimeSelection::At(minute)) {
                let m = i32::from(minute);
                assert!(
                    (kept.start_minute() - m).abs() <= 60 || (kept.end_minute() - m).abs() <= 60
                );
            }
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_trips(&[], TimeSelection::At(600)).is_empty());
        assert!(filter_trips(&[], TimeSelection::Any).is_empty());
    }
}
