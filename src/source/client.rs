use anyhow::Result;
use async_trait::async_trait;

use crate::traffic::{Station, Trip};

/// Supplies the station and trip sets once at startup.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn load_stations(&self) -> Result<Vec<Station>>;
    async fn load_trips(&self) -> Result<Vec<Trip>>;
}
