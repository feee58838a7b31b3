//! Environment-driven settings.
//!
//! Values come from the process environment (a `.env` file is loaded by the
//! binary first); command-line flags override them.

use std::path::PathBuf;

pub const STATIONS_ENV: &str = "BIKESHARE_STATIONS";
pub const TRIPS_ENV: &str = "BIKESHARE_TRIPS";
pub const LOG_FILE_ENV: &str = "LOG_FILE_PATH";

pub const DEFAULT_STATIONS_PATH: &str = "data/bluebikes-stations.json";
pub const DEFAULT_TRIPS_PATH: &str = "data/bluebikes-traffic-2024-03.csv";
pub const DEFAULT_LOG_FILE_PATH: &str = "logs/bikeshare_traffic.log";

/// Where the station and trip files live.
#[derive(Debug, Clone, PartialEq)]
pub struct DataConfig {
    pub stations_path: PathBuf,
    pub trips_path: PathBuf,
}

impl DataConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            stations_path: get(STATIONS_ENV, DEFAULT_STATIONS_PATH).into(),
            trips_path: get(TRIPS_ENV, DEFAULT_TRIPS_PATH).into(),
        }
    }

    /// Replaces paths given explicitly on the command line.
    pub fn with_overrides(mut self, stations: Option<PathBuf>, trips: Option<PathBuf>) -> Self {
        if let Some(path) = stations {
            self.stations_path = path;
        }
        if let Some(path) = trips {
            self.trips_path = path;
        }
        self
    }
}

pub fn log_file_path() -> String {
    std::env::var(LOG_FILE_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILE_PATH.to_string())
}
