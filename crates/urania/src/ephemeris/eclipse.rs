//! Geometric eclipse finder built only on Sun and Moon positions.
//!
//! Lunar eclipses:
//!   1. Bracket the next Sun-Moon opposition on a half-day grid and bisect it
//!   2. Reject candidates where the Moon is far from the ecliptic
//!   3. Compare the Moon's distance from the shadow axis against the Earth's
//!      umbra and penumbra (Danjon 2% atmospheric enlargement)
//!   4. Bisect the limb contacts inside a six hour window either side
//!
//! Solar eclipses follow the same steps around conjunction, comparing the
//! Sun-Moon separation with the disk radii widened by the lunar parallax so
//! that eclipses seen from anywhere on Earth are found, not only geocentric ones.

use chrono::{DateTime, Duration, Utc};

use super::adapter::EphemerisError;
use super::types::{Body, LunarEclipseTimes, PlanetPosition, SolarEclipseKind};
use super::Ephemeris;
use crate::western::position::normalize_signed;

/// Earth equatorial radius in km (IAU 2015).
const EARTH_RADIUS_KM: f64 = 6378.137;

/// Sun nominal radius in km (IAU 2015).
const SUN_RADIUS_KM: f64 = 696_000.0;

/// Moon mean radius in km.
const MOON_RADIUS_KM: f64 = 1737.4;

const AU_KM: f64 = 149_597_870.7;

/// Atmospheric enlargement of the Earth's shadow.
const DANJON_ENLARGEMENT: f64 = 1.02;

/// Lunar latitude beyond which no eclipse is possible (degrees).
const ECLIPSE_LAT_THRESHOLD_DEG: f64 = 2.0;

/// Scan step for syzygies. The synodic month is ~29.5 days, so half a day
/// never skips a crossing.
const MOON_STEP_DAYS: f64 = 0.5;

/// Syzygies examined before giving up (about four years).
const MAX_LUNATIONS: usize = 50;

const CONVERGENCE_DAYS: f64 = 1e-6;
const MAX_BISECTIONS: u32 = 50;

/// Half-width of the window searched for lunar contacts (6 hours).
const LUNAR_CONTACT_WINDOW_DAYS: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LunarPhase {
    Penumbral,
    Partial,
    Total,
}

pub(crate) fn shift_days(at: DateTime<Utc>, days: f64) -> DateTime<Utc> {
    at + Duration::microseconds((days * 86_400_000_000.0).round() as i64)
}

/// Great-circle distance between two ecliptic points, in degrees.
fn angular_separation(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (lat1, lat2) = (lat1.to_radians(), lat2.to_radians());
    let dlon = (lon1 - lon2).to_radians();
    let cos_sep = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * dlon.cos();
    cos_sep.clamp(-1.0, 1.0).acos().to_degrees()
}

fn km(pos: &PlanetPosition) -> f64 {
    pos.distance_au * AU_KM
}

fn angular_radius_deg(radius_km: f64, distance_km: f64) -> f64 {
    (radius_km / distance_km).asin().to_degrees()
}

fn parallax_deg(distance_km: f64) -> f64 {
    (EARTH_RADIUS_KM / distance_km).asin().to_degrees()
}

/// (penumbral, umbral) shadow radii at the Moon's distance, in degrees.
fn shadow_radii_deg(sun_km: f64, moon_km: f64) -> (f64, f64) {
    let pi_sun = parallax_deg(sun_km);
    let pi_moon = parallax_deg(moon_km);
    let s_sun = angular_radius_deg(SUN_RADIUS_KM, sun_km);
    (
        DANJON_ENLARGEMENT * (pi_moon + pi_sun + s_sun),
        DANJON_ENLARGEMENT * (pi_moon + pi_sun - s_sun),
    )
}

fn sun_and_moon<E: Ephemeris + ?Sized>(
    eph: &E,
    at: DateTime<Utc>,
) -> Result<(PlanetPosition, PlanetPosition), EphemerisError> {
    Ok((eph.body_position(Body::Sun, at)?, eph.body_position(Body::Moon, at)?))
}

/// Distance of the Moon's centre from the anti-solar point.
fn shadow_offset_deg(sun: &PlanetPosition, moon: &PlanetPosition) -> f64 {
    angular_separation(moon.lon, moon.lat, sun.lon + 180.0, -sun.lat)
}

/// Moon minus Sun longitude, relative to `target`, wrapped to (-180, 180].
fn phase_offset<E: Ephemeris + ?Sized>(
    eph: &E,
    at: DateTime<Utc>,
    target: f64,
) -> Result<f64, EphemerisError> {
    let sun = eph.position_at(Body::Sun, at)?;
    let moon = eph.position_at(Body::Moon, at)?;
    Ok(normalize_signed(moon - sun - target))
}

/// A sign change that is not the ±180° wrap.
fn is_genuine_crossing(f_a: f64, f_b: f64) -> bool {
    f_a * f_b < 0.0 && (f_a - f_b).abs() < 270.0
}

/// Bisect `f` to a root inside `[t_a, t_b]`, assuming `f(t_a)` and `f(t_b)` differ in sign.
fn bisect<F>(mut t_a: DateTime<Utc>, mut t_b: DateTime<Utc>, mut f: F) -> Result<DateTime<Utc>, EphemerisError>
where
    F: FnMut(DateTime<Utc>) -> Result<f64, EphemerisError>,
{
    let mut f_a = f(t_a)?;
    for _ in 0..MAX_BISECTIONS {
        let span_days = (t_b - t_a).num_microseconds().unwrap_or(0) as f64 / 86_400_000_000.0;
        if span_days < CONVERGENCE_DAYS {
            break;
        }
        let t_m = shift_days(t_a, span_days / 2.0);
        let f_m = f(t_m)?;
        if f_a * f_m <= 0.0 {
            t_b = t_m;
        } else {
            t_a = t_m;
            f_a = f_m;
        }
    }
    let span_days = (t_b - t_a).num_microseconds().unwrap_or(0) as f64 / 86_400_000_000.0;
    Ok(shift_days(t_a, span_days / 2.0))
}

/// Next instant after `from` where the Moon leads the Sun by `target` degrees.
pub(crate) fn next_syzygy<E: Ephemeris + ?Sized>(
    eph: &E,
    from: DateTime<Utc>,
    target: f64,
) -> Result<Option<DateTime<Utc>>, EphemerisError> {
    let steps = (MAX_LUNATIONS as f64 * 29.6 / MOON_STEP_DAYS) as usize;
    let mut t_a = from;
    let mut f_a = phase_offset(eph, t_a, target)?;

    for _ in 0..steps {
        let t_b = shift_days(t_a, MOON_STEP_DAYS);
        let f_b = phase_offset(eph, t_b, target)?;
        if f_b == 0.0 {
            return Ok(Some(t_b));
        }
        if is_genuine_crossing(f_a, f_b) {
            return bisect(t_a, t_b, |t| phase_offset(eph, t, target)).map(Some);
        }
        t_a = t_b;
        f_a = f_b;
    }
    Ok(None)
}

fn classify_lunar(offset: f64, moon_r: f64, umbral: f64, penumbral: f64) -> Option<LunarPhase> {
    let near_edge = offset - moon_r;
    let far_edge = offset + moon_r;
    if near_edge >= penumbral {
        None
    } else if far_edge <= umbral {
        Some(LunarPhase::Total)
    } else if near_edge < umbral {
        Some(LunarPhase::Partial)
    } else {
        Some(LunarPhase::Penumbral)
    }
}

/// Contact where the Moon's limb (`limb` = +1 far, -1 near) meets a shadow boundary.
fn lunar_contact<E: Ephemeris + ?Sized>(
    eph: &E,
    t_a: DateTime<Utc>,
    t_b: DateTime<Utc>,
    boundary: impl Fn(f64, f64) -> f64,
    limb: f64,
) -> Result<DateTime<Utc>, EphemerisError> {
    bisect(t_a, t_b, |t| {
        let (sun, moon) = sun_and_moon(eph, t)?;
        let moon_r = angular_radius_deg(MOON_RADIUS_KM, km(&moon));
        Ok(shadow_offset_deg(&sun, &moon) + limb * moon_r - boundary(km(&sun), km(&moon)))
    })
}

fn lunar_eclipse_at<E: Ephemeris + ?Sized>(
    eph: &E,
    full_moon: DateTime<Utc>,
) -> Result<Option<LunarEclipseTimes>, EphemerisError> {
    let (sun, moon) = sun_and_moon(eph, full_moon)?;
    if moon.lat.abs() > ECLIPSE_LAT_THRESHOLD_DEG {
        return Ok(None);
    }

    let (penumbral, umbral) = shadow_radii_deg(km(&sun), km(&moon));
    let moon_r = angular_radius_deg(MOON_RADIUS_KM, km(&moon));
    let offset = shadow_offset_deg(&sun, &moon);
    let Some(phase) = classify_lunar(offset, moon_r, umbral, penumbral) else {
        return Ok(None);
    };

    let before = shift_days(full_moon, -LUNAR_CONTACT_WINDOW_DAYS);
    let after = shift_days(full_moon, LUNAR_CONTACT_WINDOW_DAYS);
    let penumbra = |s: f64, m: f64| shadow_radii_deg(s, m).0;
    let umbra = |s: f64, m: f64| shadow_radii_deg(s, m).1;

    let mut times = LunarEclipseTimes {
        maximum: full_moon,
        penumbral_begin: Some(lunar_contact(eph, before, full_moon, penumbra, 1.0)?),
        penumbral_end: Some(lunar_contact(eph, full_moon, after, penumbra, 1.0)?),
        partial_begin: None,
        partial_end: None,
        total_begin: None,
        total_end: None,
    };
    if phase != LunarPhase::Penumbral {
        times.partial_begin = Some(lunar_contact(eph, before, full_moon, umbra, 1.0)?);
        times.partial_end = Some(lunar_contact(eph, full_moon, after, umbra, 1.0)?);
    }
    if phase == LunarPhase::Total {
        times.total_begin = Some(lunar_contact(eph, before, full_moon, umbra, -1.0)?);
        times.total_end = Some(lunar_contact(eph, full_moon, after, umbra, -1.0)?);
    }
    Ok(Some(times))
}

/// Next lunar eclipse with its contact instants, searching about four years ahead.
pub fn next_lunar_eclipse<E: Ephemeris + ?Sized>(
    eph: &E,
    from: DateTime<Utc>,
) -> Result<Option<LunarEclipseTimes>, EphemerisError> {
    let mut search_from = from;
    for _ in 0..MAX_LUNATIONS {
        let Some(full_moon) = next_syzygy(eph, search_from, 180.0)? else {
            return Ok(None);
        };
        if let Some(eclipse) = lunar_eclipse_at(eph, full_moon)? {
            return Ok(Some(eclipse));
        }
        search_from = shift_days(full_moon, 1.0);
    }
    Ok(None)
}

/// `reach` is how far the Moon may sit from the Sun's centre, as seen from
/// the Earth's centre, while its shadow axis still meets the Earth.
fn classify_solar(separation: f64, sun_r: f64, moon_r: f64, reach: f64) -> Option<SolarEclipseKind> {
    if separation >= reach + sun_r + moon_r {
        None
    } else if separation < reach {
        if moon_r >= sun_r {
            Some(SolarEclipseKind::Total)
        } else {
            Some(SolarEclipseKind::Annular)
        }
    } else {
        Some(SolarEclipseKind::Partial)
    }
}

fn solar_eclipse_at<E: Ephemeris + ?Sized>(
    eph: &E,
    new_moon: DateTime<Utc>,
) -> Result<Option<SolarEclipseKind>, EphemerisError> {
    let (sun, moon) = sun_and_moon(eph, new_moon)?;
    if moon.lat.abs() > ECLIPSE_LAT_THRESHOLD_DEG {
        return Ok(None);
    }
    let sun_r = angular_radius_deg(SUN_RADIUS_KM, km(&sun));
    let moon_r = angular_radius_deg(MOON_RADIUS_KM, km(&moon));
    let reach = parallax_deg(km(&moon)) - parallax_deg(km(&sun));
    let separation = angular_separation(sun.lon, sun.lat, moon.lon, moon.lat);
    Ok(classify_solar(separation, sun_r, moon_r, reach))
}

/// Greatest-eclipse instant of the next solar eclipse of `kind`.
pub fn next_solar_eclipse<E: Ephemeris + ?Sized>(
    eph: &E,
    from: DateTime<Utc>,
    kind: SolarEclipseKind,
) -> Result<Option<DateTime<Utc>>, EphemerisError> {
    let mut search_from = from;
    for _ in 0..MAX_LUNATIONS {
        let Some(new_moon) = next_syzygy(eph, search_from, 0.0)? else {
            return Ok(None);
        };
        if solar_eclipse_at(eph, new_moon)? == Some(kind) {
            return Ok(Some(new_moon));
        }
        search_from = shift_days(new_moon, 1.0);
    }
    Ok(None)
}
