//! Deterministic ephemerides for exercising the scanners without data files.
#![allow(dead_code)]

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use urania::ephemeris::{
    Body, Ephemeris, EphemerisError, GeoLocation, HousePositions, LunarEclipseTimes, PlanetPosition,
    SolarEclipseKind,
};
use urania::western::{normalize_degrees, normalize_signed};

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

pub fn day(n: i64) -> DateTime<Utc> {
    epoch() + chrono::Duration::days(n)
}

/// How one body moves across the test sky.
#[derive(Debug, Clone)]
pub enum Track {
    Fixed(f64),
    Linear { start: f64, per_day: f64 },
    /// One longitude per day from the epoch, linearly interpolated between days.
    Daily(Vec<f64>),
}

impl Track {
    fn longitude(&self, days: f64) -> f64 {
        match self {
            Track::Fixed(lon) => normalize_degrees(*lon),
            Track::Linear { start, per_day } => normalize_degrees(start + per_day * days),
            Track::Daily(series) => {
                let last = series.len().saturating_sub(1);
                let i = (days.floor().max(0.0) as usize).min(last);
                let j = (i + 1).min(last);
                let frac = (days - i as f64).clamp(0.0, 1.0);
                normalize_degrees(series[i] + normalize_signed(series[j] - series[i]) * frac)
            }
        }
    }
}

/// Scripted sky: each body follows its own track, houses are equal from a
/// fixed Ascendant, and the Moon rides the ecliptic unless told otherwise.
#[derive(Debug, Clone)]
pub struct TestSky {
    tracks: BTreeMap<Body, Track>,
    ascendant: f64,
    moon_latitude: f64,
    fail_on: Option<Body>,
}

impl TestSky {
    /// Every body parked at its own fixed degree, away from sign boundaries.
    pub fn new() -> Self {
        let tracks = urania::ephemeris::BODIES
            .iter()
            .enumerate()
            .map(|(i, &body)| (body, Track::Fixed(15.0 + 30.0 * i as f64)))
            .collect();
        Self {
            tracks,
            ascendant: 5.0,
            moon_latitude: 0.0,
            fail_on: None,
        }
    }

    pub fn with(mut self, body: Body, track: Track) -> Self {
        self.tracks.insert(body, track);
        self
    }

    pub fn with_ascendant(mut self, ascendant: f64) -> Self {
        self.ascendant = ascendant;
        self
    }

    pub fn with_moon_latitude(mut self, latitude: f64) -> Self {
        self.moon_latitude = latitude;
        self
    }

    /// Make every query for `body` fail, as a missing data file would.
    pub fn failing_on(mut self, body: Body) -> Self {
        self.fail_on = Some(body);
        self
    }

    fn days_since_epoch(at: DateTime<Utc>) -> f64 {
        (at - epoch()).num_milliseconds() as f64 / 86_400_000.0
    }
}

impl Ephemeris for TestSky {
    fn body_position(&self, body: Body, at: DateTime<Utc>) -> Result<PlanetPosition, EphemerisError> {
        if self.fail_on == Some(body) {
            return Err(EphemerisError::CalculationFailed {
                body: body.to_string(),
                datetime: at,
                message: "no ephemeris file".to_string(),
            });
        }
        let days = Self::days_since_epoch(at);
        let track = self.tracks.get(&body).cloned().unwrap_or(Track::Fixed(0.0));
        let lon = track.longitude(days);
        let speed_lon = normalize_signed(track.longitude(days + 0.5) - track.longitude(days - 0.5));
        let (lat, distance_au) = match body {
            Body::Moon => (self.moon_latitude, 0.00257),
            Body::Sun => (0.0, 1.0),
            _ => (0.0, 2.0),
        };
        Ok(PlanetPosition {
            lon,
            lat,
            distance_au,
            speed_lon,
            retrograde: speed_lon < 0.0,
        })
    }

    fn houses_at(&self, _at: DateTime<Utc>, _location: GeoLocation) -> Result<HousePositions, EphemerisError> {
        let mut cusps = [0.0; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            *cusp = normalize_degrees(self.ascendant + 30.0 * i as f64);
        }
        Ok(HousePositions::from_cusps(cusps))
    }
}

/// A sky whose eclipses are given outright instead of computed.
pub struct EclipseSky {
    pub sky: TestSky,
    pub lunar: Vec<LunarEclipseTimes>,
    pub solar: Vec<(DateTime<Utc>, SolarEclipseKind)>,
}

impl Ephemeris for EclipseSky {
    fn body_position(&self, body: Body, at: DateTime<Utc>) -> Result<PlanetPosition, EphemerisError> {
        self.sky.body_position(body, at)
    }

    fn houses_at(&self, at: DateTime<Utc>, location: GeoLocation) -> Result<HousePositions, EphemerisError> {
        self.sky.houses_at(at, location)
    }

    fn next_lunar_eclipse(&self, from: DateTime<Utc>) -> Result<Option<LunarEclipseTimes>, EphemerisError> {
        Ok(self.lunar.iter().filter(|e| e.maximum > from).min_by_key(|e| e.maximum).copied())
    }

    fn next_solar_eclipse(
        &self,
        from: DateTime<Utc>,
        kind: SolarEclipseKind,
    ) -> Result<Option<DateTime<Utc>>, EphemerisError> {
        Ok(self
            .solar
            .iter()
            .filter(|(at, k)| *at > from && *k == kind)
            .map(|(at, _)| *at)
            .min())
    }
}

/// Contacts for a lunar eclipse at `maximum`, with the phases it reaches.
pub fn lunar_times(maximum: DateTime<Utc>, partial: bool, total: bool) -> LunarEclipseTimes {
    let around = |minutes: i64| {
        (
            Some(maximum - chrono::Duration::minutes(minutes)),
            Some(maximum + chrono::Duration::minutes(minutes)),
        )
    };
    let (penumbral_begin, penumbral_end) = around(150);
    let (partial_begin, partial_end) = if partial { around(90) } else { (None, None) };
    let (total_begin, total_end) = if total { around(30) } else { (None, None) };
    LunarEclipseTimes {
        maximum,
        penumbral_begin,
        penumbral_end,
        partial_begin,
        partial_end,
        total_begin,
        total_end,
    }
}

/// Sun and Moon moving at mean rates, Moon 5° ahead at the epoch.
pub fn mean_lunar_sky() -> TestSky {
    TestSky::new()
        .with(
            Body::Sun,
            Track::Linear {
                start: 280.0,
                per_day: 0.9856,
            },
        )
        .with(
            Body::Moon,
            Track::Linear {
                start: 285.0,
                per_day: 13.1764,
            },
        )
}

/// Mercury gaining 1° a day except for the days in `backwards`, when it loses 1°.
pub fn mercury_series(days: usize, backwards: &[std::ops::Range<usize>]) -> Track {
    let mut lon = 100.0;
    let mut series = vec![lon];
    for d in 1..days {
        let reversed = backwards.iter().any(|r| r.contains(&d));
        lon += if reversed { -1.0 } else { 1.0 };
        series.push(lon);
    }
    Track::Daily(series)
}
