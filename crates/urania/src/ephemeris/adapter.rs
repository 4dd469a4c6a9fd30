use crate::ephemeris::types::{Body, GeoLocation, HousePositions, PlanetPosition};
use crate::ephemeris::Ephemeris;
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use swisseph::swe::{calc_ut, julday, revjul, set_ephe_path};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {body} at {datetime}: {message}")]
    CalculationFailed {
        body: String,
        datetime: DateTime<Utc>,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
    #[error("Julian day {jd} is outside the supported calendar range")]
    InvalidJulianDay { jd: f64 },
}

/// Data path last handed to the library. Swiss Ephemeris keeps it as
/// process-wide state, so every call selects its adapter's path under this lock.
static ACTIVE_PATH: Mutex<Option<String>> = Mutex::new(None);

/// Swiss Ephemeris body codes (SE_SUN .. SE_PLUTO)
const BODY_CODES: &[(Body, i32)] = &[
    (Body::Sun, 0),
    (Body::Moon, 1),
    (Body::Mercury, 2),
    (Body::Venus, 3),
    (Body::Mars, 4),
    (Body::Jupiter, 5),
    (Body::Saturn, 6),
    (Body::Uranus, 7),
    (Body::Neptune, 8),
    (Body::Pluto, 9),
];

/// SEFLG_SWIEPH: read the Swiss Ephemeris data files
const FLG_SWIEPH: i32 = 2;
/// SEFLG_SPEED: also compute daily motion
const FLG_SPEED: i32 = 256;
/// ERR return of swe_houses_ex
const SWE_ERR: i32 = -1;

const PLACIDUS: u8 = b'P';

/// Swiss Ephemeris adapter: tropical zodiac, Placidus houses.
#[derive(Debug, Clone)]
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
    path_str: String,
}

impl SwissEphemerisAdapter {
    /// Create an adapter reading data files from `ephemeris_path`.
    ///
    /// Path resolution (config file, environment) is the caller's job.
    pub fn new(ephemeris_path: impl Into<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.into();
        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }
        let path_str = match path.to_str() {
            Some(s) if !s.contains('\0') => s.to_string(),
            _ => {
                return Err(EphemerisError::FileNotFound {
                    path: path.display().to_string(),
                    message: "Ephemeris path must be valid UTF-8.".to_string(),
                })
            }
        };
        let adapter = Self {
            ephemeris_path: path,
            path_str,
        };
        adapter.with_library(|| ());
        log::debug!("Swiss Ephemeris data directory: {}", adapter.ephemeris_path.display());
        Ok(adapter)
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }

    /// Run `f` with this adapter's data path selected in the library.
    fn with_library<T>(&self, f: impl FnOnce() -> T) -> T {
        let mut active = ACTIVE_PATH.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if active.as_deref() != Some(self.path_str.as_str()) {
            set_ephe_path(&self.path_str);
            *active = Some(self.path_str.clone());
        }
        f()
    }

    /// Calculate position for a single body at a Julian day (UT)
    pub fn calc_body_position(&self, body: Body, jd: f64) -> Result<PlanetPosition, EphemerisError> {
        self.position_at_jd(body, jd, julian_day_to_datetime(jd)?)
    }

    fn position_at_jd(&self, body: Body, jd: f64, at: DateTime<Utc>) -> Result<PlanetPosition, EphemerisError> {
        let failed = |message: String| EphemerisError::CalculationFailed {
            body: body.to_string(),
            datetime: at,
            message,
        };
        let code = BODY_CODES
            .iter()
            .find(|(b, _)| *b == body)
            .map(|(_, code)| *code)
            .ok_or_else(|| failed("No Swiss Ephemeris code for body".to_string()))?;

        let result = self
            .with_library(|| calc_ut(jd, code as u32, (FLG_SWIEPH | FLG_SPEED) as u32))
            .map_err(|e| failed(format!("Swiss Ephemeris error: {}", e)))?;

        // Without data files the library quietly switches to Moshier
        if result.code & FLG_SWIEPH == 0 {
            return Err(failed(format!(
                "no Swiss Ephemeris data files under {}",
                self.ephemeris_path.display()
            )));
        }

        let out = result.out;
        let speed_lon = out[3];
        Ok(PlanetPosition {
            lon: out[0].rem_euclid(360.0),
            lat: out[1],
            distance_au: out[2],
            speed_lon,
            retrograde: speed_lon < 0.0,
        })
    }

    /// Calculate Placidus cusps and angles
    pub fn calc_houses(&self, jd: f64, lat: f64, lon: f64) -> Result<HousePositions, EphemerisError> {
        use swisseph::{AscMc, Cusp};

        let mut c = [0.0; 13];
        let mut a = [0.0; 10];
        let flag = self.with_library(|| {
            libswisseph_sys::safe::swe_houses_ex(jd, FLG_SWIEPH, lat, lon, PLACIDUS as i32, c.as_mut_ptr(), a.as_mut_ptr())
        });
        if flag == SWE_ERR {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("Placidus houses undefined at lat {lat}, lon {lon}"),
            });
        }
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let cusp_values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        if cusp_values.iter().any(|c| !c.is_finite()) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("non-finite cusp at lat {lat}, lon {lon}"),
            });
        }

        let mut houses = HousePositions::from_cusps(cusp_values.map(|c| c.rem_euclid(360.0)));
        let asc = ascmc.ascendant.rem_euclid(360.0);
        let mc = ascmc.mc.rem_euclid(360.0);
        houses.asc = asc;
        houses.mc = mc;
        houses.ic = (mc + 180.0) % 360.0;
        houses.dc = (asc + 180.0) % 360.0;
        Ok(houses)
    }
}

impl Ephemeris for SwissEphemerisAdapter {
    fn body_position(&self, body: Body, at: DateTime<Utc>) -> Result<PlanetPosition, EphemerisError> {
        self.position_at_jd(body, datetime_to_julian_day(at), at)
    }

    fn houses_at(&self, at: DateTime<Utc>, location: GeoLocation) -> Result<HousePositions, EphemerisError> {
        self.calc_houses(datetime_to_julian_day(at), location.lat, location.lon)
    }
}

/// Convert UTC datetime to Julian Day
pub fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let hour_decimal = dt.hour() as f64
        + dt.minute() as f64 / 60.0
        + (dt.second() as f64 + dt.nanosecond() as f64 / 1e9) / 3600.0;

    // GREG_CAL = 1
    julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, 1)
}

/// Convert Julian Day to UTC datetime
pub fn julian_day_to_datetime(jd: f64) -> Result<DateTime<Utc>, EphemerisError> {
    if !jd.is_finite() {
        return Err(EphemerisError::InvalidJulianDay { jd });
    }
    let (year, month, day, hour_decimal) = revjul(jd, 1);
    let hour = hour_decimal as u32;
    let minute = ((hour_decimal - hour as f64) * 60.0) as u32;
    let second = (((hour_decimal - hour as f64) * 60.0 - minute as f64) * 60.0) as u32;
    Utc.with_ymd_and_hms(year, month as u32, day as u32, hour, minute.min(59), second.min(59))
        .single()
        .ok_or(EphemerisError::InvalidJulianDay { jd })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_julian_day_round_trip() {
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 6, 58, 0).unwrap();
        let back = julian_day_to_datetime(datetime_to_julian_day(at)).unwrap();
        assert!((back - at).num_seconds().abs() <= 1);
    }

    #[test]
    fn test_out_of_range_julian_day_is_an_error() {
        // Hundreds of millions of years out, past chrono's calendar
        assert_eq!(
            julian_day_to_datetime(1e11),
            Err(EphemerisError::InvalidJulianDay { jd: 1e11 })
        );
        assert!(julian_day_to_datetime(f64::NAN).is_err());
    }
}
