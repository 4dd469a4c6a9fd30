//! Names of everything that can hold a place in a chart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ephemeris::Body;
use crate::error::InputError;

/// The four chart angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Angle {
    Ascendant,
    Descendant,
    Midheaven,
    IC,
}

/// Chart order of the angles after the ten bodies.
pub const ANGLES: [Angle; 4] = [Angle::Ascendant, Angle::Descendant, Angle::Midheaven, Angle::IC];

impl Angle {
    /// Index of the Placidus cusp the angle sits on (0 = first house).
    pub fn cusp_index(self) -> usize {
        match self {
            Angle::Ascendant => 0,
            Angle::IC => 3,
            Angle::Descendant => 6,
            Angle::Midheaven => 9,
        }
    }

    /// Angles always occupy the house whose cusp they define.
    pub fn house(self) -> u8 {
        self.cusp_index() as u8 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Angle::Ascendant => "Ascendant",
            Angle::Descendant => "Descendant",
            Angle::Midheaven => "Midheaven",
            Angle::IC => "IC",
        }
    }
}

/// A body or an angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartPoint {
    Body(Body),
    Angle(Angle),
}

impl ChartPoint {
    pub fn as_body(self) -> Option<Body> {
        match self {
            ChartPoint::Body(body) => Some(body),
            ChartPoint::Angle(_) => None,
        }
    }

    pub fn is_angle(self) -> bool {
        matches!(self, ChartPoint::Angle(_))
    }

    pub fn name(self) -> &'static str {
        match self {
            ChartPoint::Body(body) => body.name(),
            ChartPoint::Angle(angle) => angle.name(),
        }
    }
}

impl From<Body> for ChartPoint {
    fn from(body: Body) -> Self {
        ChartPoint::Body(body)
    }
}

impl From<Angle> for ChartPoint {
    fn from(angle: Angle) -> Self {
        ChartPoint::Angle(angle)
    }
}

impl fmt::Display for ChartPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartPoint {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(body) = s.parse::<Body>() {
            return Ok(ChartPoint::Body(body));
        }
        let wanted = s.trim();
        ANGLES
            .iter()
            .copied()
            .find(|angle| angle.name().eq_ignore_ascii_case(wanted))
            .map(ChartPoint::Angle)
            .ok_or_else(|| InputError::UnknownBody(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_houses_follow_their_cusps() {
        assert_eq!(Angle::Ascendant.house(), 1);
        assert_eq!(Angle::IC.house(), 4);
        assert_eq!(Angle::Descendant.house(), 7);
        assert_eq!(Angle::Midheaven.house(), 10);
    }

    #[test]
    fn chart_points_parse_bodies_and_angles() {
        assert_eq!("Mars".parse::<ChartPoint>(), Ok(ChartPoint::Body(Body::Mars)));
        assert_eq!("ic".parse::<ChartPoint>(), Ok(ChartPoint::Angle(Angle::IC)));
        assert_eq!(
            "Vertex".parse::<ChartPoint>(),
            Err(InputError::UnknownBody("Vertex".to_string()))
        );
    }

    #[test]
    fn chart_points_serialize_as_bare_names() {
        let json = serde_json::to_string(&ChartPoint::Angle(Angle::Midheaven)).unwrap();
        assert_eq!(json, "\"Midheaven\"");
        let back: ChartPoint = serde_json::from_str("\"Saturn\"").unwrap();
        assert_eq!(back, ChartPoint::Body(Body::Saturn));
    }
}
