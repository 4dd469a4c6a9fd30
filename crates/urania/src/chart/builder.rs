use chrono::{DateTime, Utc};

use super::{NatalChart, PlanetPoint};
use crate::ephemeris::{Ephemeris, GeoLocation, BODIES};
use crate::error::{AstroError, Result};
use crate::western::{house_from_sign, Position, ANGLES};

/// Placidus cusps are undefined at or beyond this latitude.
pub const POLAR_CIRCLE_LATITUDE: f64 = 66.56;

/// Positions of the ten bodies at `at`, not yet housed (house 0).
pub fn positions_at<E: Ephemeris + ?Sized>(eph: &E, at: DateTime<Utc>) -> Result<Vec<PlanetPoint>> {
    BODIES
        .iter()
        .map(|&body| -> Result<PlanetPoint> {
            let lon = eph.position_at(body, at)?;
            Ok(PlanetPoint::new(body.into(), Position::from_longitude(lon), 0))
        })
        .collect()
}

/// Build the natal chart for a birth instant and place.
///
/// Bodies are housed whole-sign from the Ascendant's sign; the angles sit
/// on their true Placidus cusp degrees.
pub fn build_chart<E: Ephemeris + ?Sized>(
    eph: &E,
    birth: DateTime<Utc>,
    location: GeoLocation,
) -> Result<NatalChart> {
    if location.lat.abs() >= POLAR_CIRCLE_LATITUDE {
        log::warn!(
            "Refusing Placidus houses at latitude {:.4}: inside the polar circle",
            location.lat
        );
        return Err(AstroError::HouseSystemUndefined {
            latitude: location.lat,
        });
    }

    let mut points = positions_at(eph, birth)?;
    let houses = eph.houses_at(birth, location)?;
    let ascendant = Position::from_longitude(houses.cusps[0]).sign;

    for point in &mut points {
        point.house = house_from_sign(ascendant, point.position.sign);
    }
    points.extend(ANGLES.iter().map(|&angle| {
        let position = Position::from_longitude(houses.cusps[angle.cusp_index()]);
        PlanetPoint::new(angle.into(), position, angle.house())
    }));

    log::debug!(
        "Built chart for {} at ({:.4}, {:.4}): {} rising",
        birth,
        location.lat,
        location.lon,
        ascendant
    );
    Ok(NatalChart::from_points(points))
}
