//! Slow-planet transits to natal placements.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ingress::{daily_positions, ingress_report, matches_in, PlanetaryIngress};
use super::window::SearchWindow;
use crate::aspects::{AspectKind, ASPECT_KINDS};
use crate::chart::{NatalChart, PlanetPoint};
use crate::ephemeris::{Body, Ephemeris};
use crate::error::Result;
use crate::western::{ChartPoint, Modality, Position};

/// Bodies slow enough for their transits to define a year.
pub const TRANSITING_BODIES: [Body; 5] = [
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
];

/// One transiting body's dated aspects to a single placement. Aspects it
/// never forms in the window are left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transits {
    pub planet: Body,
    pub aspects: BTreeMap<AspectKind, PlanetaryIngress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MajorTransits {
    pub natal_planet: ChartPoint,
    pub natal_position: Position,
    pub modality: Modality,
    pub transits: Vec<Transits>,
}

/// A transiting body forming an aspect to a natal placement on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitEntry {
    pub date: NaiveDate,
    pub transiting_planet: Body,
    pub natal_planet: ChartPoint,
    pub aspect: AspectKind,
    pub position: Position,
    pub natal_position: Position,
    pub exact_match: bool,
}

type DailyTrack = (Body, Vec<(NaiveDate, Position)>);

fn daily_tracks<E: Ephemeris + ?Sized>(eph: &E, window: &SearchWindow) -> Result<Vec<DailyTrack>> {
    TRANSITING_BODIES
        .iter()
        .map(|&body| -> Result<DailyTrack> { Ok((body, daily_positions(eph, body, window)?)) })
        .collect()
}

fn transits_from_tracks(natal: &PlanetPoint, tracks: &[DailyTrack], window: &SearchWindow) -> MajorTransits {
    let transits = tracks
        .iter()
        .map(|(body, samples)| {
            let aspects = ASPECT_KINDS
                .iter()
                .filter_map(|&kind| {
                    let target = Position {
                        sign: kind.target_sign(natal.position.sign),
                        ..natal.position
                    };
                    let dates = matches_in(samples, &target);
                    (!dates.is_empty()).then(|| (kind, ingress_report(*body, target, window, dates)))
                })
                .collect();
            Transits { planet: *body, aspects }
        })
        .collect();

    MajorTransits {
        natal_planet: natal.planet,
        natal_position: natal.position,
        modality: natal.modality,
        transits,
    }
}

/// Days on which Jupiter through Pluto reach the natal degree in each sign
/// aspecting the placement's sign.
///
/// Aspect direction is counted from the natal sign: `SuperiorSquare` means the
/// transiting body stands nine signs on from the placement. This is the
/// reverse of [`crate::aspects::match_aspects`], which counts from the transit.
pub fn major_transits_for_placement<E: Ephemeris + ?Sized>(
    eph: &E,
    natal: &PlanetPoint,
    window: &SearchWindow,
) -> Result<MajorTransits> {
    let tracks = daily_tracks(eph, window)?;
    Ok(transits_from_tracks(natal, &tracks, window))
}

/// [`major_transits_for_placement`] for every placement of the chart.
pub fn major_transits<E: Ephemeris + ?Sized>(
    eph: &E,
    chart: &NatalChart,
    window: &SearchWindow,
) -> Result<Vec<MajorTransits>> {
    let tracks = daily_tracks(eph, window)?;
    let all: Vec<MajorTransits> = chart
        .iter()
        .map(|natal| transits_from_tracks(natal, &tracks, window))
        .collect();
    log::debug!(
        "Found {} transit matches across {} placements",
        all.iter().map(count_matches).sum::<usize>(),
        all.len()
    );
    Ok(all)
}

fn count_matches(m: &MajorTransits) -> usize {
    m.transits
        .iter()
        .flat_map(|t| t.aspects.values())
        .map(|i| i.matches_found)
        .sum()
}

/// Flatten transit reports into one dated list, earliest first.
pub fn transit_entries(reports: &[MajorTransits]) -> Vec<TransitEntry> {
    let mut entries: Vec<TransitEntry> = reports
        .iter()
        .flat_map(|report| {
            report.transits.iter().flat_map(move |t| {
                t.aspects.iter().flat_map(move |(&aspect, ingress)| {
                    ingress.dates.iter().map(move |m| TransitEntry {
                        date: m.date,
                        transiting_planet: t.planet,
                        natal_planet: report.natal_planet,
                        aspect,
                        position: m.position,
                        natal_position: report.natal_position,
                        exact_match: m.exact_match,
                    })
                })
            })
        })
        .collect();
    entries.sort_by_key(|e| e.date);
    entries
}
