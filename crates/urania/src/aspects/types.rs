use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InputError;
use crate::western::{ChartPoint, Sign};

/// Sign-based aspects. Squares, trines and sextiles are split by which way
/// round the zodiac the other sign lies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AspectKind {
    #[serde(rename = "conjunct")]
    Conjunction,
    Opposition,
    SuperiorSquare,
    InferiorSquare,
    SuperiorTrine,
    InferiorTrine,
    SuperiorSextile,
    InferiorSextile,
}

/// Every kind, conjunction first, in the order transits are reported.
pub const ASPECT_KINDS: [AspectKind; 8] = [
    AspectKind::Conjunction,
    AspectKind::Opposition,
    AspectKind::SuperiorSquare,
    AspectKind::InferiorSquare,
    AspectKind::SuperiorTrine,
    AspectKind::InferiorTrine,
    AspectKind::SuperiorSextile,
    AspectKind::InferiorSextile,
];

/// Kinds reached through the sign table (everything but conjunction).
pub const TABLE_ASPECTS: [AspectKind; 7] = [
    AspectKind::Opposition,
    AspectKind::SuperiorSquare,
    AspectKind::InferiorSquare,
    AspectKind::SuperiorTrine,
    AspectKind::InferiorTrine,
    AspectKind::SuperiorSextile,
    AspectKind::InferiorSextile,
];

impl AspectKind {
    /// Signs counted forward from the reference sign to the aspected sign.
    pub fn sign_offset(self) -> usize {
        match self {
            AspectKind::Conjunction => 0,
            AspectKind::InferiorSextile => 2,
            AspectKind::InferiorSquare => 3,
            AspectKind::InferiorTrine => 4,
            AspectKind::Opposition => 6,
            AspectKind::SuperiorTrine => 8,
            AspectKind::SuperiorSquare => 9,
            AspectKind::SuperiorSextile => 10,
        }
    }

    /// The sign this aspect points at from `from`.
    pub fn target_sign(self, from: Sign) -> Sign {
        from.offset(self.sign_offset())
    }

    /// The aspect `to` receives from `from`, if any.
    pub fn between(from: Sign, to: Sign) -> Option<AspectKind> {
        let offset = (to.index() + 12 - from.index()) % 12;
        ASPECT_KINDS.iter().copied().find(|k| k.sign_offset() == offset)
    }

    /// Squares and oppositions.
    pub fn is_hard(self) -> bool {
        matches!(
            self,
            AspectKind::Opposition | AspectKind::SuperiorSquare | AspectKind::InferiorSquare
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunct",
            AspectKind::Opposition => "opposition",
            AspectKind::SuperiorSquare => "superiorSquare",
            AspectKind::InferiorSquare => "inferiorSquare",
            AspectKind::SuperiorTrine => "superiorTrine",
            AspectKind::InferiorTrine => "inferiorTrine",
            AspectKind::SuperiorSextile => "superiorSextile",
            AspectKind::InferiorSextile => "inferiorSextile",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AspectKind {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("conjunction") {
            return Ok(AspectKind::Conjunction);
        }
        ASPECT_KINDS
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InputError::UnknownAspect(s.to_string()))
    }
}

/// A natal placement aspected by a transiting position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectMatch {
    pub planet: ChartPoint,
    pub aspect: AspectKind,
    /// Natal and transit degrees are the same whole degree.
    pub exact_match: bool,
}
