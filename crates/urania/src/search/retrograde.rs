//! Retrograde stations from day-over-day longitude comparison.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::window::{ScanSettings, SearchWindow};
use crate::ephemeris::{Body, Ephemeris};
use crate::error::Result;
use crate::western::{normalize_signed, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrogradeBoundary {
    pub date: NaiveDate,
    pub position: Position,
}

/// A span during which a body moves backwards, from its last direct day
/// to its last retrograde day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrogradePeriod {
    pub start: RetrogradeBoundary,
    pub end: RetrogradeBoundary,
}

impl RetrogradePeriod {
    pub fn days(&self) -> i64 {
        (self.end.date - self.start.date).num_days()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    Direct,
    Retrograde,
}

fn boundary(at: DateTime<Utc>, lon: f64) -> RetrogradeBoundary {
    RetrogradeBoundary {
        date: at.date_naive(),
        position: Position::from_longitude(lon),
    }
}

/// Retrograde periods of `body` in `window`.
///
/// Each day's longitude is compared with the previous day's. A period opens
/// on the day before motion first turns backwards and closes on the day
/// before it turns forwards again; one still open when the window runs out
/// is closed on the window's last day. Periods shorter than
/// `settings.min_retrograde_days` are dropped.
pub fn find_retrograde_periods<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    window: &SearchWindow,
    settings: &ScanSettings,
) -> Result<Vec<RetrogradePeriod>> {
    let mut periods = Vec::new();
    let mut motion = Motion::Direct;
    let mut open: Option<RetrogradeBoundary> = None;
    let mut previous: Option<(DateTime<Utc>, f64)> = None;

    for day in window.daily() {
        let lon = eph.position_at(body, day)?;
        if let Some((prev_day, prev_lon)) = previous {
            let moving_backward = normalize_signed(lon - prev_lon) < 0.0;
            match (motion, moving_backward) {
                (Motion::Direct, true) => {
                    motion = Motion::Retrograde;
                    open = Some(boundary(prev_day, prev_lon));
                }
                (Motion::Retrograde, false) => {
                    motion = Motion::Direct;
                    if let Some(start) = open.take() {
                        periods.push(RetrogradePeriod {
                            start,
                            end: boundary(prev_day, prev_lon),
                        });
                    }
                }
                _ => {}
            }
        }
        previous = Some((day, lon));
    }

    if let Some(start) = open.take() {
        let lon = eph.position_at(body, window.end)?;
        periods.push(RetrogradePeriod {
            start,
            end: boundary(window.end, lon),
        });
    }

    periods.retain(|p| {
        let keep = p.days() >= settings.min_retrograde_days;
        if !keep {
            log::debug!(
                "Dropping {}-day {} reversal from {} as noise",
                p.days(),
                body,
                p.start.date
            );
        }
        keep
    });
    Ok(periods)
}

/// [`find_retrograde_periods`] for Mercury.
pub fn find_mercury_retrogrades<E: Ephemeris + ?Sized>(
    eph: &E,
    window: &SearchWindow,
    settings: &ScanSettings,
) -> Result<Vec<RetrogradePeriod>> {
    find_retrograde_periods(eph, Body::Mercury, window, settings)
}
