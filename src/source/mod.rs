//! Where station and trip data come from.

mod client;
mod file;
mod memory;

pub use client::DataSource;
pub use file::FileSource;
pub use memory::StaticSource;

use anyhow::Result;
use tracing::info;

use crate::controller::Event;
use crate::traffic::{Station, Trip};

/// Loads both sets and turns the outcome into a controller event.
///
/// A failure becomes [`Event::LoadFailed`] so the caller can report it without
/// touching what is already on screen.
pub async fn load_event<S: DataSource + ?Sized>(source: &S) -> Event {
    match load_all(source).await {
        Ok((stations, trips)) => Event::Loaded { stations, trips },
        Err(e) => Event::LoadFailed(e),
    }
}

/// Loads stations and trips concurrently.
pub async fn load_all<S: DataSource + ?Sized>(
    source: &S,
) -> Result<(Vec<Station>, Vec<Trip>)> {
    let (stations, trips) = tokio::try_join!(source.load_stations(), source.load_trips())?;
    info!(
        stations = stations.len(),
        trips = trips.len(),
        "Data source ready"
    );
    Ok((stations, trips))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Broken;

    #[async_trait]
    impl DataSource for Broken {
        async fn load_stations(&self) -> Result<Vec<Station>> {
            Ok(vec![])
        }

        async fn load_trips(&self) -> Result<Vec<Trip>> {
            Err(anyhow::anyhow!("trip export unavailable"))
        }
    }

    #[tokio::test]
    async fn test_load_event_success() {
        let source = StaticSource::new(vec![Station::new("A", "Alpha", -71.0, 42.0)], vec![]);
        match load_event(&source).await {
            Event::Loaded { stations, trips } => {
                assert_eq!(stations.len(), 1);
                assert!(trips.is_empty());
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_event_failure() {
        match load_event(&Broken).await {
            Event::LoadFailed(e) => assert!(e.to_string().contains("unavailable")),
            other => panic!("unexpected event {other:?}"),
        }
    }
}
