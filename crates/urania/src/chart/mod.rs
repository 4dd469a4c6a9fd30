//! Natal placements and the chart that holds them.

pub mod builder;

pub use builder::{build_chart, positions_at, POLAR_CIRCLE_LATITUDE};

use serde::{Deserialize, Serialize};

use crate::error::{AstroError, Result};
use crate::western::{ruled_houses, Angle, ChartPoint, Modality, Position, Sign};

/// One body or angle placed in a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPoint {
    pub planet: ChartPoint,
    pub modality: Modality,
    pub position: Position,
    /// House 1-12; 0 while the placement has not been housed yet.
    pub house: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruler_of: Option<Vec<u8>>,
}

impl PlanetPoint {
    pub fn new(planet: ChartPoint, position: Position, house: u8) -> Self {
        Self {
            planet,
            modality: position.modality(),
            position,
            house,
            ruler_of: None,
        }
    }
}

/// Houses ruled by `point` in a chart rising in `ascendant`. Angles and the
/// outer planets rule none.
pub fn ruler_of(point: ChartPoint, ascendant: Sign) -> Vec<u8> {
    match point {
        ChartPoint::Body(body) => ruled_houses(body, ascendant),
        ChartPoint::Angle(_) => Vec::new(),
    }
}

/// The fourteen placements of a birth chart: ten bodies, then Ascendant,
/// Descendant, Midheaven and IC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NatalChart {
    points: Vec<PlanetPoint>,
}

impl NatalChart {
    pub fn from_points(points: Vec<PlanetPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PlanetPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanetPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, point: impl Into<ChartPoint>) -> Option<&PlanetPoint> {
        let point = point.into();
        self.points.iter().find(|p| p.planet == point)
    }

    /// Like [`NatalChart::get`], but absence is an error.
    pub fn require(&self, point: impl Into<ChartPoint>) -> Result<&PlanetPoint> {
        let point = point.into();
        self.get(point).ok_or(AstroError::MissingBody(point))
    }

    pub fn ascendant_sign(&self) -> Result<Sign> {
        Ok(self.require(Angle::Ascendant)?.position.sign)
    }

    /// Copy of the chart with every placement's `ruler_of` filled in.
    pub fn with_rulerships(&self) -> Result<NatalChart> {
        let ascendant = self.ascendant_sign()?;
        let points = self
            .points
            .iter()
            .map(|p| PlanetPoint {
                ruler_of: Some(ruler_of(p.planet, ascendant)),
                ..p.clone()
            })
            .collect();
        Ok(NatalChart { points })
    }
}

impl<'a> IntoIterator for &'a NatalChart {
    type Item = &'a PlanetPoint;
    type IntoIter = std::slice::Iter<'a, PlanetPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
