//! Error taxonomy shared by every computation in the crate.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::ephemeris::EphemerisError;
use crate::search::LunationType;
use crate::western::ChartPoint;

/// Malformed or out-of-range request input. Never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Unknown sign: {0}")]
    UnknownSign(String),
    #[error("Unknown body or angle: {0}")]
    UnknownBody(String),
    #[error("Unknown aspect: {0}")]
    UnknownAspect(String),
    #[error("Latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("Longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("Search window ends ({end}) before it starts ({start})")]
    EmptyWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

#[derive(Error, Debug)]
pub enum AstroError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),
    #[error("Ephemeris unavailable: {0}")]
    EphemerisUnavailable(#[from] EphemerisError),
    #[error("Exact {phase} not reached within {steps} hourly steps from {start}")]
    NonConvergence {
        phase: LunationType,
        start: DateTime<Utc>,
        steps: u32,
    },
    #[error("Chart has no placement for {0}")]
    MissingBody(ChartPoint),
    #[error("House cusps are undefined at latitude {latitude} (inside a polar circle)")]
    HouseSystemUndefined { latitude: f64 },
}

pub type Result<T> = std::result::Result<T, AstroError>;
