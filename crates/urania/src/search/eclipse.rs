//! Eclipses in a window, re-scanned month by month and deduplicated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::window::SearchWindow;
use crate::ephemeris::{Body, Ephemeris, LunarEclipseTimes, SolarEclipseKind, SOLAR_ECLIPSE_KINDS};
use crate::error::Result;
use crate::western::{Modality, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EclipseType {
    #[serde(rename = "total solar eclipse")]
    TotalSolar,
    #[serde(rename = "annular solar eclipse")]
    AnnularSolar,
    #[serde(rename = "partial solar eclipse")]
    PartialSolar,
    #[serde(rename = "total lunar eclipse")]
    TotalLunar,
    #[serde(rename = "partial lunar eclipse")]
    PartialLunar,
    #[serde(rename = "penumbral lunar eclipse")]
    PenumbralLunar,
}

impl EclipseType {
    pub fn is_solar(self) -> bool {
        matches!(
            self,
            EclipseType::TotalSolar | EclipseType::AnnularSolar | EclipseType::PartialSolar
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            EclipseType::TotalSolar => "total solar eclipse",
            EclipseType::AnnularSolar => "annular solar eclipse",
            EclipseType::PartialSolar => "partial solar eclipse",
            EclipseType::TotalLunar => "total lunar eclipse",
            EclipseType::PartialLunar => "partial lunar eclipse",
            EclipseType::PenumbralLunar => "penumbral lunar eclipse",
        }
    }
}

impl From<SolarEclipseKind> for EclipseType {
    fn from(kind: SolarEclipseKind) -> Self {
        match kind {
            SolarEclipseKind::Total => EclipseType::TotalSolar,
            SolarEclipseKind::Annular => EclipseType::AnnularSolar,
            SolarEclipseKind::Partial => EclipseType::PartialSolar,
        }
    }
}

impl fmt::Display for EclipseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An eclipse at its maximum. Solar eclipses carry the Sun's position, lunar
/// eclipses the Moon's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eclipse {
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub eclipse_type: EclipseType,
    pub position: Position,
    pub modality: Modality,
}

fn strictly_within(at: DateTime<Utc>, begin: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> bool {
    matches!((begin, end), (Some(b), Some(e)) if b < at && at < e)
}

/// Deepest phase whose contacts bracket the maximum, or `None` if none do.
pub fn classify_lunar_eclipse(times: &LunarEclipseTimes) -> Option<EclipseType> {
    let max = times.maximum;
    if strictly_within(max, times.total_begin, times.total_end) {
        Some(EclipseType::TotalLunar)
    } else if strictly_within(max, times.partial_begin, times.partial_end) {
        Some(EclipseType::PartialLunar)
    } else if strictly_within(max, times.penumbral_begin, times.penumbral_end) {
        Some(EclipseType::PenumbralLunar)
    } else {
        None
    }
}

fn eclipse_at<E: Ephemeris + ?Sized>(
    eph: &E,
    at: DateTime<Utc>,
    eclipse_type: EclipseType,
    body: Body,
) -> Result<Eclipse> {
    let position = Position::from_longitude(eph.position_at(body, at)?);
    Ok(Eclipse {
        date: at,
        eclipse_type,
        position,
        modality: position.modality(),
    })
}

/// Lunar eclipses with their maximum in `window`, in date order.
///
/// The same eclipse is found from several monthly starting points; repeats
/// on the same day, or of the same type in the same sign, are dropped.
pub fn find_lunar_eclipses<E: Ephemeris + ?Sized>(eph: &E, window: &SearchWindow) -> Result<Vec<Eclipse>> {
    let mut found: Vec<Eclipse> = Vec::new();

    for from in window.monthly() {
        let Some(times) = eph.next_lunar_eclipse(from)? else {
            continue;
        };
        if times.maximum > window.end {
            continue;
        }
        let day = times.maximum.date_naive();
        if found.iter().any(|e| e.date.date_naive() == day) {
            continue;
        }
        let Some(eclipse_type) = classify_lunar_eclipse(&times) else {
            log::debug!("Lunar eclipse at {} has no bracketing phase, skipping", times.maximum);
            continue;
        };
        let eclipse = eclipse_at(eph, times.maximum, eclipse_type, Body::Moon)?;
        let duplicate = found
            .iter()
            .any(|e| e.position.sign == eclipse.position.sign && e.eclipse_type == eclipse.eclipse_type);
        if !duplicate {
            found.push(eclipse);
        }
    }

    found.sort_by_key(|e| e.date);
    Ok(found)
}

/// Solar eclipses with their maximum in `window`, in date order.
pub fn find_solar_eclipses<E: Ephemeris + ?Sized>(eph: &E, window: &SearchWindow) -> Result<Vec<Eclipse>> {
    let mut found: Vec<Eclipse> = Vec::new();

    for from in window.monthly() {
        for kind in SOLAR_ECLIPSE_KINDS {
            let Some(maximum) = eph.next_solar_eclipse(from, kind)? else {
                continue;
            };
            if maximum > window.end {
                continue;
            }
            let day = maximum.date_naive();
            if found.iter().any(|e| e.date.date_naive() == day) {
                continue;
            }
            found.push(eclipse_at(eph, maximum, kind.into(), Body::Sun)?);
        }
    }

    found.sort_by_key(|e| e.date);
    Ok(found)
}

/// Solar and lunar eclipses in `window`, merged in date order.
pub fn find_eclipses<E: Ephemeris + ?Sized>(eph: &E, window: &SearchWindow) -> Result<Vec<Eclipse>> {
    let mut eclipses = find_lunar_eclipses(eph, window)?;
    eclipses.extend(find_solar_eclipses(eph, window)?);
    eclipses.sort_by_key(|e| e.date);
    log::debug!(
        "Found {} eclipses between {} and {}",
        eclipses.len(),
        window.start,
        window.end
    );
    Ok(eclipses)
}
