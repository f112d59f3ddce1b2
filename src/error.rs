//! Errors reported at the crate boundary.

use std::path::PathBuf;

/// Rejected birth input. Returned before any pillar is calculated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SajuError {
    #[error("{year:04}-{month:02}-{day:02} is not a Gregorian calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("hour must be in 0..=23, got {0}")]
    InvalidHour(u32),
    #[error("minute must be in 0..=59, got {0}")]
    InvalidMinute(u32),
    #[error("longitude must be a finite value in -180..=180, got {0}")]
    InvalidLongitude(f64),
    #[error("latitude must be a finite value in -90..=90, got {0}")]
    InvalidLatitude(f64),
}

/// Failure to load or validate an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}
