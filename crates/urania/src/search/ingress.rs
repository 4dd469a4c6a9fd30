//! Day-granular degree searches: when does a body stand on a given degree?

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::window::{SearchPeriod, SearchWindow};
use crate::ephemeris::{Body, Ephemeris};
use crate::error::Result;
use crate::western::{Position, Sign, SIGNS};

/// Bodies whose sign changes are worth reporting on a yearly timeline.
pub const INGRESS_BODIES: [Body; 7] = [
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
];

/// A day on which a body stood on the searched sign and degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateMatch {
    pub date: NaiveDate,
    pub position: Position,
    pub exact_match: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetaryIngress {
    pub planet: Body,
    pub target_position: Position,
    pub search_period: SearchPeriod,
    pub matches_found: usize,
    pub dates: Vec<DateMatch>,
}

/// A body crossing 0° of a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressEvent {
    pub date: NaiveDate,
    pub body: Body,
    pub target_sign: Sign,
}

/// `body`'s position at midnight UTC of every day in `window`.
pub fn daily_positions<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    window: &SearchWindow,
) -> Result<Vec<(NaiveDate, Position)>> {
    window
        .days()
        .map(|day| -> Result<(NaiveDate, Position)> {
            let at = day.and_time(NaiveTime::MIN).and_utc();
            Ok((day, Position::from_longitude(eph.position_at(body, at)?)))
        })
        .collect()
}

/// Samples standing on `target`'s sign and whole degree, at most one per sign.
pub(crate) fn matches_in(samples: &[(NaiveDate, Position)], target: &Position) -> Vec<DateMatch> {
    let mut found: Vec<DateMatch> = Vec::new();
    for (date, position) in samples {
        if position.sign != target.sign || position.degree != target.degree {
            continue;
        }
        if found.iter().any(|m| m.position.sign == position.sign) {
            continue;
        }
        found.push(DateMatch {
            date: *date,
            position: *position,
            exact_match: true,
        });
    }
    found
}

/// Days in `window` on which `body` stands on `target`'s sign and degree.
///
/// One sample per day and no interpolation, so a fast body can step over
/// the degree between samples. Repeat passes over the same sign (retrograde
/// loops) are collapsed into the first.
pub fn find_ingresses<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    target: &Position,
    window: &SearchWindow,
) -> Result<Vec<DateMatch>> {
    let samples = daily_positions(eph, body, window)?;
    Ok(matches_in(&samples, target))
}

pub(crate) fn ingress_report(
    body: Body,
    target: Position,
    window: &SearchWindow,
    dates: Vec<DateMatch>,
) -> PlanetaryIngress {
    PlanetaryIngress {
        planet: body,
        target_position: target,
        search_period: window.period(),
        matches_found: dates.len(),
        dates,
    }
}

/// [`find_ingresses`] wrapped with the search parameters.
pub fn planetary_ingress<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    target: Position,
    window: &SearchWindow,
) -> Result<PlanetaryIngress> {
    let dates = find_ingresses(eph, body, &target, window)?;
    Ok(ingress_report(body, target, window, dates))
}

/// 0° sign ingresses of Venus through Pluto, ordered by date.
pub fn zero_degree_ingresses<E: Ephemeris + ?Sized>(
    eph: &E,
    window: &SearchWindow,
) -> Result<Vec<IngressEvent>> {
    let mut events = Vec::new();
    for body in INGRESS_BODIES {
        let samples = daily_positions(eph, body, window)?;
        for sign in SIGNS {
            let target = Position::new(sign, 0, 0);
            events.extend(matches_in(&samples, &target).into_iter().map(|m| IngressEvent {
                date: m.date,
                body,
                target_sign: sign,
            }));
        }
    }
    events.sort_by_key(|e| e.date);
    log::debug!("Found {} zero-degree ingresses", events.len());
    Ok(events)
}
