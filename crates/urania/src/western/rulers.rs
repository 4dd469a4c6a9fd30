//! Sign rulers for Western astrology.
//!
//! Only traditional (seven visible planet) rulership is used; the outer
//! planets rule nothing.

use super::sign::{house_from_sign, Sign, SIGNS};
use crate::ephemeris::Body;

/// Traditional rulers in zodiac order, Aries first.
const TRADITIONAL_RULERS: [Body; 12] = [
    Body::Mars,    // Aries
    Body::Venus,   // Taurus
    Body::Mercury, // Gemini
    Body::Moon,    // Cancer
    Body::Sun,     // Leo
    Body::Mercury, // Virgo
    Body::Venus,   // Libra
    Body::Mars,    // Scorpio
    Body::Jupiter, // Sagittarius
    Body::Saturn,  // Capricorn
    Body::Saturn,  // Aquarius
    Body::Jupiter, // Pisces
];

/// Get sign ruler (traditional rulership)
pub fn sign_ruler(sign: Sign) -> Body {
    TRADITIONAL_RULERS[sign.index()]
}

/// Signs ruled by `body`, in zodiac order. Empty for the outer planets.
pub fn ruled_signs(body: Body) -> Vec<Sign> {
    SIGNS
        .iter()
        .copied()
        .filter(|sign| sign_ruler(*sign) == body)
        .collect()
}

/// Whole-sign houses ruled by `body` for a chart rising in `ascendant`, ascending.
pub fn ruled_houses(body: Body, ascendant: Sign) -> Vec<u8> {
    let mut houses: Vec<u8> = ruled_signs(body)
        .into_iter()
        .map(|sign| house_from_sign(ascendant, sign))
        .collect();
    houses.sort_unstable();
    houses
}
