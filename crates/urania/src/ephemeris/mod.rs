pub mod adapter;
pub mod eclipse;
pub mod types;

pub use adapter::{EphemerisError, SwissEphemerisAdapter};
pub use types::{
    Body, GeoLocation, HousePositions, LunarEclipseTimes, PlanetPosition, SolarEclipseKind,
    BODIES, SOLAR_ECLIPSE_KINDS,
};

use chrono::{DateTime, Utc};

/// The astronomical oracle every computation in this crate runs against.
///
/// Implementations must be deterministic: the same instant and body always
/// yield the same answer. The eclipse primitives have geometric defaults
/// built on [`Ephemeris::body_position`]; adapters with native eclipse
/// routines may override them.
pub trait Ephemeris {
    /// Tropical geocentric position of `body` at `at`.
    fn body_position(&self, body: Body, at: DateTime<Utc>) -> Result<PlanetPosition, EphemerisError>;

    /// Placidus cusps at `at` for an observer at `location`.
    fn houses_at(&self, at: DateTime<Utc>, location: GeoLocation) -> Result<HousePositions, EphemerisError>;

    /// Ecliptic longitude in `[0, 360)`.
    fn position_at(&self, body: Body, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        Ok(self.body_position(body, at)?.lon)
    }

    /// First lunar eclipse whose maximum falls after `from`.
    fn next_lunar_eclipse(&self, from: DateTime<Utc>) -> Result<Option<LunarEclipseTimes>, EphemerisError> {
        eclipse::next_lunar_eclipse(self, from)
    }

    /// Maximum of the first solar eclipse of `kind` after `from`.
    fn next_solar_eclipse(
        &self,
        from: DateTime<Utc>,
        kind: SolarEclipseKind,
    ) -> Result<Option<DateTime<Utc>>, EphemerisError> {
        eclipse::next_solar_eclipse(self, from, kind)
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn body_position(&self, body: Body, at: DateTime<Utc>) -> Result<PlanetPosition, EphemerisError> {
        (**self).body_position(body, at)
    }

    fn houses_at(&self, at: DateTime<Utc>, location: GeoLocation) -> Result<HousePositions, EphemerisError> {
        (**self).houses_at(at, location)
    }

    fn position_at(&self, body: Body, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        (**self).position_at(body, at)
    }

    fn next_lunar_eclipse(&self, from: DateTime<Utc>) -> Result<Option<LunarEclipseTimes>, EphemerisError> {
        (**self).next_lunar_eclipse(from)
    }

    fn next_solar_eclipse(
        &self,
        from: DateTime<Utc>,
        kind: SolarEclipseKind,
    ) -> Result<Option<DateTime<Utc>>, EphemerisError> {
        (**self).next_solar_eclipse(from, kind)
    }
}
