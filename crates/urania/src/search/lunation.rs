//! New and full moons.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::eclipse::Eclipse;
use super::window::{ScanSettings, SearchWindow};
use crate::ephemeris::{Body, Ephemeris};
use crate::error::{AstroError, Result};
use crate::western::{normalize_degrees, normalize_signed, Position};

/// Sun-Moon elongation within this many degrees of a phase flags a candidate day.
const CANDIDATE_BAND_DEG: f64 = 15.0;

/// Refinement stops once the elongation is this close to the phase.
const PRECISION_DEG: f64 = 0.1;

const MAX_BISECTIONS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LunationType {
    #[serde(rename = "new moon")]
    New,
    #[serde(rename = "full moon")]
    Full,
}

impl LunationType {
    /// Moon-minus-Sun elongation at the exact phase.
    fn elongation(self) -> f64 {
        match self {
            LunationType::New => 0.0,
            LunationType::Full => 180.0,
        }
    }
}

impl fmt::Display for LunationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LunationType::New => f.write_str("new moon"),
            LunationType::Full => f.write_str("full moon"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lunation {
    pub date: NaiveDate,
    pub lunation_type: LunationType,
    /// Sun's degree; full moons are filed under the sign opposite the Sun.
    pub position: Position,
}

/// Signed distance of the Moon from the exact phase; negative while approaching.
fn phase_offset<E: Ephemeris + ?Sized>(
    eph: &E,
    at: DateTime<Utc>,
    phase: LunationType,
) -> Result<f64> {
    let sun = eph.position_at(Body::Sun, at)?;
    let moon = eph.position_at(Body::Moon, at)?;
    Ok(normalize_signed(moon - sun - phase.elongation()))
}

fn bisect_phase<E: Ephemeris + ?Sized>(
    eph: &E,
    mut before: DateTime<Utc>,
    mut after: DateTime<Utc>,
    phase: LunationType,
) -> Result<DateTime<Utc>> {
    let mut mid = before + (after - before) / 2;
    for _ in 0..MAX_BISECTIONS {
        let offset = phase_offset(eph, mid, phase)?;
        if offset.abs() <= PRECISION_DEG {
            break;
        }
        if offset < 0.0 {
            before = mid;
        } else {
            after = mid;
        }
        mid = before + (after - before) / 2;
    }
    Ok(mid)
}

/// Walk forward an hour at a time from `approximate` until the Sun-Moon
/// elongation is within 0.1° of `phase`.
///
/// When a step jumps over the phase the hour is bisected. Fails with
/// `NonConvergence` after `max_steps` hours.
pub fn find_exact_lunation<E: Ephemeris + ?Sized>(
    eph: &E,
    approximate: DateTime<Utc>,
    phase: LunationType,
    max_steps: u32,
) -> Result<DateTime<Utc>> {
    let mut at = approximate;
    let mut offset = phase_offset(eph, at, phase)?;

    for _ in 0..max_steps {
        if offset.abs() <= PRECISION_DEG {
            return Ok(at);
        }
        let next = at + Duration::hours(1);
        let next_offset = phase_offset(eph, next, phase)?;
        if offset < 0.0 && next_offset > 0.0 && next_offset - offset < 90.0 {
            return bisect_phase(eph, at, next, phase);
        }
        at = next;
        offset = next_offset;
    }
    if offset.abs() <= PRECISION_DEG {
        return Ok(at);
    }

    Err(AstroError::NonConvergence {
        phase,
        start: approximate,
        steps: max_steps,
    })
}

/// Elongation band test on a daily sample. Only the approaching side of the
/// band qualifies: a Moon already past the phase was resolved a day earlier,
/// and refining it again could land on the other side of midnight.
fn candidate(sun: f64, moon: f64) -> Option<LunationType> {
    let elongation = normalize_degrees(moon - sun);
    if elongation > 360.0 - CANDIDATE_BAND_DEG || elongation == 0.0 {
        Some(LunationType::New)
    } else if elongation > 180.0 - CANDIDATE_BAND_DEG && elongation <= 180.0 {
        Some(LunationType::Full)
    } else {
        None
    }
}

/// Every new and full moon in `window`, ordered by date.
pub fn find_lunations<E: Ephemeris + ?Sized>(
    eph: &E,
    window: &SearchWindow,
    settings: &ScanSettings,
) -> Result<Vec<Lunation>> {
    let mut lunations: Vec<Lunation> = Vec::new();

    for day in window.daily() {
        let sun = eph.position_at(Body::Sun, day)?;
        let moon = eph.position_at(Body::Moon, day)?;
        let Some(phase) = candidate(sun, moon) else {
            continue;
        };

        let exact = find_exact_lunation(eph, day, phase, settings.lunation_max_steps)?;
        let sun_at_exact = Position::from_longitude(eph.position_at(Body::Sun, exact)?);
        let position = match phase {
            LunationType::New => sun_at_exact,
            LunationType::Full => Position {
                sign: sun_at_exact.sign.opposite(),
                ..sun_at_exact
            },
        };
        let date = exact.date_naive();
        if lunations
            .iter()
            .any(|l| l.date == date && l.lunation_type == phase)
        {
            continue;
        }
        lunations.push(Lunation {
            date,
            lunation_type: phase,
            position,
        });
    }

    let last_day = window.end.date_naive();
    lunations.retain(|l| l.date <= last_day);
    lunations.sort_by_key(|l| l.date);
    log::debug!(
        "Found {} lunations between {} and {}",
        lunations.len(),
        window.start,
        window.end
    );
    Ok(lunations)
}

/// Drop lunations that share a calendar month and sign with an eclipse;
/// the eclipse stands in for them on a monthly timeline.
pub fn lunations_outside_eclipses(lunations: &[Lunation], eclipses: &[Eclipse]) -> Vec<Lunation> {
    lunations
        .iter()
        .filter(|l| {
            !eclipses.iter().any(|e| {
                let day = e.date.date_naive();
                day.year() == l.date.year()
                    && day.month() == l.date.month()
                    && e.position.sign == l.position.sign
            })
        })
        .copied()
        .collect()
}
