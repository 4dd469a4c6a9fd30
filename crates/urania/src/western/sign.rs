//! Zodiac signs and their modality partitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// Signs in zodiac order, Aries first.
pub const SIGNS: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

const CARDINAL: [Sign; 4] = [Sign::Aries, Sign::Cancer, Sign::Libra, Sign::Capricorn];
const FIXED: [Sign; 4] = [Sign::Taurus, Sign::Leo, Sign::Scorpio, Sign::Aquarius];
const MUTABLE: [Sign; 4] = [Sign::Gemini, Sign::Virgo, Sign::Sagittarius, Sign::Pisces];

impl Sign {
    /// Zero-based zodiac index (Aries = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Sign at `index`, wrapping modulo 12.
    pub fn from_index(index: usize) -> Sign {
        SIGNS[index % 12]
    }

    /// The sign `steps` places further along the zodiac.
    pub fn offset(self, steps: usize) -> Sign {
        Sign::from_index(self.index() + steps)
    }

    pub fn opposite(self) -> Sign {
        self.offset(6)
    }

    pub fn modality(self) -> Modality {
        if CARDINAL.contains(&self) {
            Modality::Cardinal
        } else if FIXED.contains(&self) {
            Modality::Fixed
        } else {
            debug_assert!(MUTABLE.contains(&self));
            Modality::Mutable
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sign {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SIGNS
            .iter()
            .copied()
            .find(|sign| sign.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InputError::UnknownSign(s.to_string()))
    }
}

/// Modality lookup by sign name. Fails with `UnknownSign` for unrecognised names.
pub fn sign_to_modality(sign: &str) -> Result<Modality, InputError> {
    Ok(sign.parse::<Sign>()?.modality())
}

/// Whole-sign house of `target` counted from the ascendant's sign (1..=12).
pub fn house_from_sign(ascendant: Sign, target: Sign) -> u8 {
    ((target.index() + 12 - ascendant.index()) % 12) as u8 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modality_partitions_cover_every_sign_once() {
        let mut counts = [0usize; 3];
        for sign in SIGNS {
            match sign.modality() {
                Modality::Cardinal => counts[0] += 1,
                Modality::Fixed => counts[1] += 1,
                Modality::Mutable => counts[2] += 1,
            }
        }
        assert_eq!(counts, [4, 4, 4]);
        assert_eq!(Sign::Leo.modality(), Modality::Fixed);
        assert_eq!(Sign::Pisces.modality(), Modality::Mutable);
    }

    #[test]
    fn sign_names_parse_case_insensitively() {
        assert_eq!("capricorn".parse::<Sign>(), Ok(Sign::Capricorn));
        assert_eq!(" Leo ".parse::<Sign>(), Ok(Sign::Leo));
        assert_eq!(
            sign_to_modality("Ophiuchus"),
            Err(InputError::UnknownSign("Ophiuchus".to_string()))
        );
    }

    #[test]
    fn house_from_sign_counts_from_ascendant() {
        assert_eq!(house_from_sign(Sign::Aries, Sign::Leo), 5);
        assert_eq!(house_from_sign(Sign::Aries, Sign::Aries), 1);
        assert_eq!(house_from_sign(Sign::Pisces, Sign::Aries), 2);
        assert_eq!(house_from_sign(Sign::Taurus, Sign::Aries), 12);
    }

    #[test]
    fn house_from_sign_is_a_bijection_for_each_ascendant() {
        for asc in SIGNS {
            let mut seen = [false; 12];
            for target in SIGNS {
                let house = house_from_sign(asc, target);
                assert!((1..=12).contains(&house));
                assert!(!seen[house as usize - 1], "{asc} -> {target} repeated house {house}");
                seen[house as usize - 1] = true;
            }
        }
    }

    #[test]
    fn opposite_wraps() {
        assert_eq!(Sign::Libra.opposite(), Sign::Aries);
        assert_eq!(Sign::Capricorn.opposite(), Sign::Cancer);
    }
}
