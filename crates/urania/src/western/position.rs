//! Zodiacal position codec: ecliptic longitude <-> sign / degree / minute.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::sign::{Modality, Sign};

/// A position inside a sign, truncated to the arc-minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub sign: Sign,
    /// Whole degrees within the sign (0-29)
    pub degree: u8,
    /// Whole arc-minutes within the degree (0-59)
    pub minute: u8,
}

/// Wrap any longitude into `[0, 360)`.
pub fn normalize_degrees(longitude: f64) -> f64 {
    let wrapped = longitude.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wrap an angular difference into `(-180, 180]`.
pub fn normalize_signed(delta: f64) -> f64 {
    let wrapped = normalize_degrees(delta);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

impl Position {
    pub fn new(sign: Sign, degree: u8, minute: u8) -> Self {
        Self { sign, degree, minute }
    }

    /// Split an ecliptic longitude into sign, degree and minute.
    ///
    /// Longitudes outside `[0, 360)` are wrapped first, so 360° lands on 0° Aries.
    pub fn from_longitude(longitude: f64) -> Self {
        let lon = normalize_degrees(longitude);
        let sign_index = (lon / 30.0).floor() as usize;
        let within = lon - (sign_index as f64) * 30.0;
        let degree = within.floor();
        let minute = ((within - degree) * 60.0).floor();
        Self {
            sign: Sign::from_index(sign_index),
            degree: (degree as u8).min(29),
            minute: (minute as u8).min(59),
        }
    }

    /// Longitude of the start of this arc-minute.
    pub fn to_longitude(&self) -> f64 {
        self.sign.index() as f64 * 30.0 + self.degree as f64 + self.minute as f64 / 60.0
    }

    /// Arc-minutes from the start of the sign.
    pub fn minutes_into_sign(&self) -> u32 {
        self.degree as u32 * 60 + self.minute as u32
    }

    pub fn modality(&self) -> Modality {
        self.sign.modality()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°{:02}' {}", self.degree, self.minute, self.sign)
    }
}
