//! Day/night sect and the benefic/malefic roles that follow from it.

pub mod classify;

pub use classify::{classify_transit, PillKind, TransitClassification};

use serde::{Deserialize, Serialize};

use crate::chart::{NatalChart, PlanetPoint};
use crate::ephemeris::Body;
use crate::error::Result;
use crate::western::{Angle, ChartPoint};

/// Houses above the horizon that are unambiguously diurnal.
const DAY_HOUSES: [u8; 5] = [8, 9, 10, 11, 12];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectRole {
    InSectBenefic,
    OutOfSectBenefic,
    InSectMalefic,
    OutOfSectMalefic,
}

/// Whether the Sun is above the horizon.
///
/// Whole-sign houses 8-12 are day. A Sun sharing its sign with the Ascendant
/// or Descendant is decided against that cusp, to the arc-minute: above the
/// horizon while it has not yet risen past the Ascendant, or once it has
/// passed the Descendant.
pub fn is_day_chart(sun: &PlanetPoint, ascendant: &PlanetPoint, descendant: &PlanetPoint) -> bool {
    if DAY_HOUSES.contains(&sun.house) {
        return true;
    }
    if sun.house == 1 || sun.house == 7 {
        let sun_pos = &sun.position;
        let asc = &ascendant.position;
        let desc = &descendant.position;
        return (sun_pos.sign == asc.sign && asc.minutes_into_sign() > sun_pos.minutes_into_sign())
            || (sun_pos.sign == desc.sign && desc.minutes_into_sign() < sun_pos.minutes_into_sign());
    }
    false
}

/// [`is_day_chart`] using the chart's own Sun, Ascendant and Descendant.
pub fn chart_is_diurnal(chart: &NatalChart) -> Result<bool> {
    Ok(is_day_chart(
        chart.require(Body::Sun)?,
        chart.require(Angle::Ascendant)?,
        chart.require(Angle::Descendant)?,
    ))
}

/// The chart's benefics and malefics sorted by sect. Borrowed from the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectPlanets<'a> {
    pub in_sect_benefic: &'a PlanetPoint,
    pub out_of_sect_benefic: &'a PlanetPoint,
    pub in_sect_malefic: &'a PlanetPoint,
    pub out_of_sect_malefic: &'a PlanetPoint,
}

impl SectPlanets<'_> {
    /// Role of `body`, if it is one of the four sect planets.
    pub fn role_of(&self, body: Body) -> Option<SectRole> {
        [
            (self.in_sect_benefic, SectRole::InSectBenefic),
            (self.out_of_sect_benefic, SectRole::OutOfSectBenefic),
            (self.in_sect_malefic, SectRole::InSectMalefic),
            (self.out_of_sect_malefic, SectRole::OutOfSectMalefic),
        ]
        .into_iter()
        .find(|(point, _)| point.planet == ChartPoint::Body(body))
        .map(|(_, role)| role)
    }
}

/// Jupiter and Saturn are in sect by day, Venus and Mars by night.
pub fn sect_planets(is_day_chart: bool, chart: &NatalChart) -> Result<SectPlanets<'_>> {
    let (benefics, malefics) = if is_day_chart {
        ((Body::Jupiter, Body::Venus), (Body::Saturn, Body::Mars))
    } else {
        ((Body::Venus, Body::Jupiter), (Body::Mars, Body::Saturn))
    };
    Ok(SectPlanets {
        in_sect_benefic: chart.require(benefics.0)?,
        out_of_sect_benefic: chart.require(benefics.1)?,
        in_sect_malefic: chart.require(malefics.0)?,
        out_of_sect_malefic: chart.require(malefics.1)?,
    })
}
