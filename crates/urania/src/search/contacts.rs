//! Lunations and eclipses falling on natal placements.

use serde::{Deserialize, Serialize};

use super::eclipse::Eclipse;
use super::lunation::Lunation;
use super::window::ScanSettings;
use crate::aspects::{AspectCalculator, AspectMatch};
use crate::chart::NatalChart;
use crate::western::Position;

/// A sky event together with the natal placements it aspects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatalContact<T> {
    pub event: T,
    pub aspects: Vec<AspectMatch>,
}

fn contacts<T: Copy>(
    events: &[T],
    position: impl Fn(&T) -> Position,
    chart: &NatalChart,
    settings: &ScanSettings,
) -> Vec<NatalContact<T>> {
    let calculator = AspectCalculator::new(settings.orb_degrees);
    events
        .iter()
        .filter_map(|event| {
            let aspects = calculator.match_aspects(&position(event), chart.points());
            (!aspects.is_empty()).then(|| NatalContact { event: *event, aspects })
        })
        .collect()
}

/// Lunations within `settings.orb_degrees` of an aspect to the chart.
/// Lunations touching nothing are left out.
pub fn lunation_contacts(
    lunations: &[Lunation],
    chart: &NatalChart,
    settings: &ScanSettings,
) -> Vec<NatalContact<Lunation>> {
    contacts(lunations, |l| l.position, chart, settings)
}

/// [`lunation_contacts`] for eclipses.
pub fn eclipse_contacts(
    eclipses: &[Eclipse],
    chart: &NatalChart,
    settings: &ScanSettings,
) -> Vec<NatalContact<Eclipse>> {
    contacts(eclipses, |e| e.position, chart, settings)
}
