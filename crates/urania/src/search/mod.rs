//! Bounded scans over a search window: ingresses, lunations, retrograde
//! stations, eclipses and transits, plus their contacts with a natal chart.

pub mod contacts;
pub mod eclipse;
pub mod ingress;
pub mod lunation;
pub mod retrograde;
pub mod transits;
pub mod window;

pub use contacts::{eclipse_contacts, lunation_contacts, NatalContact};
pub use eclipse::{classify_lunar_eclipse, find_eclipses, find_lunar_eclipses, find_solar_eclipses, Eclipse, EclipseType};
pub use ingress::{
    daily_positions, find_ingresses, planetary_ingress, zero_degree_ingresses, DateMatch, IngressEvent,
    PlanetaryIngress, INGRESS_BODIES,
};
pub use lunation::{find_exact_lunation, find_lunations, lunations_outside_eclipses, Lunation, LunationType};
pub use retrograde::{find_mercury_retrogrades, find_retrograde_periods, RetrogradeBoundary, RetrogradePeriod};
pub use transits::{
    major_transits, major_transits_for_placement, transit_entries, MajorTransits, TransitEntry, Transits,
    TRANSITING_BODIES,
};
pub use window::{ScanSettings, SearchPeriod, SearchWindow};
