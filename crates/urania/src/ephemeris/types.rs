use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InputError;

/// The ten chart bodies, in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

pub const BODIES: [Body; 10] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
];

impl Body {
    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        BODIES
            .iter()
            .copied()
            .find(|body| body.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InputError::UnknownBody(s.to_string()))
    }
}

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    /// Validated constructor; rejects coordinates outside the globe.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InputError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(InputError::LatitudeOutOfRange(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(InputError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }
}

/// Planetary position data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPosition {
    /// Longitude in degrees (0-360)
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
    /// Geocentric distance in AU
    pub distance_au: f64,
    /// Speed in longitude (degrees per day)
    pub speed_lon: f64,
    pub retrograde: bool,
}

/// Placidus cusps and the four angles, all in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousePositions {
    /// Cusps of houses 1..=12, index 0 is the first house
    pub cusps: [f64; 12],
    pub asc: f64,
    pub mc: f64,
    pub ic: f64,
    pub dc: f64,
}

impl HousePositions {
    /// Build from the twelve cusps, deriving the angles from cusps 1, 4, 7 and 10.
    pub fn from_cusps(cusps: [f64; 12]) -> Self {
        Self {
            cusps,
            asc: cusps[0],
            ic: cusps[3],
            dc: cusps[6],
            mc: cusps[9],
        }
    }
}

/// Contact instants of one lunar eclipse. Phases the eclipse never reaches are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarEclipseTimes {
    pub maximum: DateTime<Utc>,
    pub penumbral_begin: Option<DateTime<Utc>>,
    pub penumbral_end: Option<DateTime<Utc>>,
    pub partial_begin: Option<DateTime<Utc>>,
    pub partial_end: Option<DateTime<Utc>>,
    pub total_begin: Option<DateTime<Utc>>,
    pub total_end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolarEclipseKind {
    Total,
    Annular,
    Partial,
}

pub const SOLAR_ECLIPSE_KINDS: [SolarEclipseKind; 3] = [
    SolarEclipseKind::Total,
    SolarEclipseKind::Annular,
    SolarEclipseKind::Partial,
];
