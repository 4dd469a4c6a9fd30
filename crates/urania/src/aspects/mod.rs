pub mod calculator;
pub mod types;

pub use calculator::{match_aspects, AspectCalculator, DEFAULT_ORB_DEGREES};
pub use types::{AspectKind, AspectMatch, ASPECT_KINDS, TABLE_ASPECTS};
