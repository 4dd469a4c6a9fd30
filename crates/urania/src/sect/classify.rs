//! Significance badges for a transit.

use serde::{Deserialize, Serialize};

use super::{SectPlanets, SectRole};
use crate::chart::{ruler_of, NatalChart};
use crate::ephemeris::Body;
use crate::error::Result;
use crate::search::TransitEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PillKind {
    Joyous,
    Excessive,
    Productive,
    Challenging,
    Significant,
    LifeDefining,
    FastMoving,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitClassification {
    pub pills: Vec<PillKind>,
    /// Sect role of the transiting body, for Jupiter, Venus, Mars and Saturn
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sect_role: Option<SectRole>,
}

const ANGULAR_HOUSES: [u8; 4] = [1, 4, 7, 10];

fn is_social(body: Body) -> bool {
    matches!(body, Body::Jupiter | Body::Saturn)
}

fn is_outer(body: Body) -> bool {
    matches!(body, Body::Uranus | Body::Neptune | Body::Pluto)
}

fn is_fast_moving(body: Body) -> bool {
    matches!(body, Body::Mars | Body::Venus)
}

/// Badges for `transit` against the chart and its sect.
///
/// The natal point's house rulerships are taken from the chart when already
/// filled in and derived from the Ascendant otherwise.
pub fn classify_transit(
    chart: &NatalChart,
    sect: &SectPlanets<'_>,
    transit: &TransitEntry,
) -> Result<TransitClassification> {
    let natal = chart.require(transit.natal_planet)?;
    let body = transit.transiting_planet;
    let hard = transit.aspect.is_hard();
    let mut pills = Vec::new();

    let sect_role = sect.role_of(body);
    if let Some(role) = sect_role {
        let benefic = matches!(role, SectRole::InSectBenefic | SectRole::OutOfSectBenefic);
        pills.push(match (benefic, hard) {
            (true, false) => PillKind::Joyous,
            (true, true) => PillKind::Excessive,
            (false, false) => PillKind::Productive,
            (false, true) => PillKind::Challenging,
        });
    }

    if hard && (is_social(body) || is_outer(body)) {
        let rules_angle = match &natal.ruler_of {
            Some(houses) => houses.iter().any(|h| ANGULAR_HOUSES.contains(h)),
            None => ruler_of(natal.planet, chart.ascendant_sign()?)
                .iter()
                .any(|h| ANGULAR_HOUSES.contains(h)),
        };
        if natal.planet.is_angle() || rules_angle {
            pills.push(if is_social(body) {
                PillKind::Significant
            } else {
                PillKind::LifeDefining
            });
        }
    }

    if is_fast_moving(body) {
        pills.push(PillKind::FastMoving);
    }

    Ok(TransitClassification { pills, sect_role })
}
