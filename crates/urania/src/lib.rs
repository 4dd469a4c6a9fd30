//! Natal charts and one-year transit search.
//!
//! Everything astronomical goes through the [`Ephemeris`] trait;
//! [`SwissEphemerisAdapter`] is the production oracle.

pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod search;
pub mod sect;
pub mod western;

pub use aspects::{match_aspects, AspectCalculator, AspectKind, AspectMatch};
pub use chart::{build_chart, positions_at, ruler_of, NatalChart, PlanetPoint};
pub use ephemeris::{Body, Ephemeris, EphemerisError, GeoLocation, SwissEphemerisAdapter};
pub use error::{AstroError, InputError, Result};
pub use search::{
    eclipse_contacts, find_eclipses, find_lunations, find_mercury_retrogrades, lunation_contacts, find_retrograde_periods, major_transits,
    transit_entries, zero_degree_ingresses, Eclipse, EclipseType, Lunation, LunationType, NatalContact,
    RetrogradePeriod, ScanSettings, SearchWindow, TransitEntry,
};
pub use sect::{chart_is_diurnal, classify_transit, is_day_chart, sect_planets, SectPlanets, SectRole};
pub use western::{profection, ChartPoint, Modality, Position, ProfectionYear, Sign};
