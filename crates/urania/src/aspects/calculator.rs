use crate::aspects::types::{AspectKind, AspectMatch};
use crate::chart::PlanetPoint;
use crate::western::Position;

/// Default orb, in whole degrees.
pub const DEFAULT_ORB_DEGREES: u8 = 3;

/// Aspect matcher working on whole degrees within the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectCalculator {
    orb_degrees: u8,
}

impl AspectCalculator {
    pub fn new(orb_degrees: u8) -> Self {
        Self { orb_degrees }
    }

    pub fn orb_degrees(&self) -> u8 {
        self.orb_degrees
    }

    /// Whether two degrees-within-sign are inside the orb. Minutes are ignored.
    pub fn within_orb(&self, a: &Position, b: &Position) -> bool {
        a.degree.abs_diff(b.degree) <= self.orb_degrees
    }

    /// Natal placements aspected by `transit`, in chart order.
    ///
    /// The orb filter runs on the degree alone; the aspect itself comes from
    /// the sign pair, looked up from the transit's sign.
    pub fn match_aspects(&self, transit: &Position, natal: &[PlanetPoint]) -> Vec<AspectMatch> {
        natal
            .iter()
            .filter(|p| self.within_orb(&p.position, transit))
            .filter_map(|p| {
                AspectKind::between(transit.sign, p.position.sign).map(|aspect| AspectMatch {
                    planet: p.planet,
                    aspect,
                    exact_match: p.position.degree == transit.degree,
                })
            })
            .collect()
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_ORB_DEGREES)
    }
}

/// [`AspectCalculator::match_aspects`] with an explicit orb.
pub fn match_aspects(transit: &Position, natal: &[PlanetPoint], orb_degrees: u8) -> Vec<AspectMatch> {
    AspectCalculator::new(orb_degrees).match_aspects(transit, natal)
}
