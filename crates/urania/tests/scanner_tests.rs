mod support;

use chrono::{Duration, NaiveDate};
use support::{day, epoch, lunar_times, mean_lunar_sky, mercury_series, EclipseSky, TestSky, Track};
use urania::ephemeris::{Body, Ephemeris, SolarEclipseKind};
use urania::error::AstroError;
use urania::search::{
    find_eclipses, find_exact_lunation, find_ingresses, find_lunar_eclipses, find_lunations,
    find_mercury_retrogrades, find_retrograde_periods, lunations_outside_eclipses, planetary_ingress,
    zero_degree_ingresses, EclipseType, LunationType, ScanSettings, SearchWindow,
};
use urania::western::{Position, Sign};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn year() -> SearchWindow {
    SearchWindow::one_year(epoch()).unwrap()
}

#[test]
fn test_retrograde_period_spans_last_direct_to_last_backward_day() {
    // Backwards from day 40 to day 41 and forwards again from day 85 to day 86
    let sky = TestSky::new().with(Body::Mercury, mercury_series(400, &[41..86]));

    let periods = find_mercury_retrogrades(&sky, &year(), &ScanSettings::default()).unwrap();

    assert_eq!(periods.len(), 1);
    let period = periods[0];
    assert_eq!(period.start.date, date(2025, 2, 10));
    assert_eq!(period.end.date, date(2025, 3, 27));
    assert_eq!(period.days(), 45);
    assert_eq!(period.start.position, Position::new(Sign::Leo, 20, 0));
    assert_eq!(period.end.position, Position::new(Sign::Cancer, 5, 0));
}

#[test]
fn test_short_reversals_dropped_and_open_period_closed_at_window_end() {
    let sky = TestSky::new().with(Body::Mercury, mercury_series(400, &[41..86, 100..110, 350..400]));
    let settings = ScanSettings::default();

    let periods = find_retrograde_periods(&sky, Body::Mercury, &year(), &settings).unwrap();

    assert_eq!(periods.len(), 2);
    assert_eq!(periods[0].start.date, date(2025, 2, 10));
    assert_eq!(periods[1].start.date, date(2025, 12, 16));
    assert_eq!(periods[1].end.date, date(2026, 1, 1));
    for period in &periods {
        assert!(period.end.date > period.start.date);
        assert!(period.days() >= settings.min_retrograde_days);
    }
}

#[test]
fn test_crossing_zero_aries_is_not_retrograde() {
    let sky = TestSky::new().with(
        Body::Mercury,
        Track::Linear {
            start: 355.0,
            per_day: 1.2,
        },
    );
    let periods = find_mercury_retrogrades(&sky, &year(), &ScanSettings::default()).unwrap();
    assert!(periods.is_empty());
}

#[test]
fn test_lunations_alternate_about_two_weeks_apart() {
    let lunations = find_lunations(&mean_lunar_sky(), &year(), &ScanSettings::default()).unwrap();

    assert_eq!(lunations.len(), 24);
    for pair in lunations.windows(2) {
        assert_ne!(pair[0].lunation_type, pair[1].lunation_type);
        let gap = (pair[1].date - pair[0].date).num_days();
        assert!((14..=15).contains(&gap), "gap of {gap} days after {}", pair[0].date);
    }

    let first = lunations[0];
    assert_eq!(first.date, date(2025, 1, 15));
    assert_eq!(first.lunation_type, LunationType::Full);
    // Sun in Capricorn, so the full moon is filed under Cancer
    assert_eq!(first.position.sign, Sign::Cancer);
    assert_eq!(first.position.degree, 24);

    assert_eq!(lunations[1].lunation_type, LunationType::New);
    assert_eq!(lunations[1].position.sign, Sign::Aquarius);
}

#[test]
fn test_exact_lunation_respects_the_step_cap() {
    let sky = mean_lunar_sky();
    // Moon about 13.7° short of the Sun at the start of day 28
    let start = day(28);

    let exact = find_exact_lunation(&sky, start, LunationType::New, 48).unwrap();
    assert_eq!(exact.date_naive(), date(2025, 1, 30));
    let offset = sky.position_at(Body::Moon, exact).unwrap() - sky.position_at(Body::Sun, exact).unwrap();
    assert!(urania::western::normalize_signed(offset).abs() <= 0.1);

    match find_exact_lunation(&sky, start, LunationType::New, 4) {
        Err(AstroError::NonConvergence { phase, steps, .. }) => {
            assert_eq!(phase, LunationType::New);
            assert_eq!(steps, 4);
        }
        other => panic!("expected NonConvergence, got {other:?}"),
    }
}

#[test]
fn test_stalled_moon_fails_loudly() {
    let sky = TestSky::new()
        .with(Body::Sun, Track::Fixed(0.0))
        .with(Body::Moon, Track::Fixed(350.0));
    let result = find_lunations(&sky, &year(), &ScanSettings::default());
    assert!(matches!(result, Err(AstroError::NonConvergence { steps: 48, .. })));
}

#[test]
fn test_ingress_is_reported_once_per_sign() {
    let sky = TestSky::new()
        .with(Body::Venus, Track::Linear { start: 350.0, per_day: 1.2 })
        .with(Body::Jupiter, Track::Linear { start: 359.6, per_day: 0.5 });
    let aries = Position::new(Sign::Aries, 0, 0);

    let venus = find_ingresses(&sky, Body::Venus, &aries, &year()).unwrap();
    assert_eq!(venus.len(), 1);
    assert_eq!(venus[0].date, date(2025, 1, 10));
    assert_eq!(venus[0].position, Position::new(Sign::Aries, 0, 48));
    assert!(venus[0].exact_match);

    // Two days on 0° Aries collapse into the first
    let jupiter = planetary_ingress(&sky, Body::Jupiter, aries, &year()).unwrap();
    assert_eq!(jupiter.matches_found, 1);
    assert_eq!(jupiter.dates[0].date, date(2025, 1, 2));
    assert_eq!(jupiter.search_period.start, date(2025, 1, 1));
    assert_eq!(jupiter.search_period.end, date(2026, 1, 1));
}

#[test]
fn test_zero_degree_ingresses_are_sorted() {
    let sky = TestSky::new()
        .with(Body::Mars, Track::Linear { start: 29.5, per_day: 0.5 })
        .with(Body::Jupiter, Track::Linear { start: 359.6, per_day: 0.5 });

    let events = zero_degree_ingresses(&sky, &year()).unwrap();

    assert_eq!(events.len(), 8);
    assert!(events.windows(2).all(|w| w[0].date <= w[1].date));
    assert_eq!((events[0].body, events[0].target_sign), (Body::Mars, Sign::Taurus));
    assert_eq!((events[1].body, events[1].target_sign), (Body::Jupiter, Sign::Aries));
    let last = events[7];
    assert_eq!((last.date, last.body, last.target_sign), (date(2025, 12, 28), Body::Mars, Sign::Scorpio));
}

fn scripted_eclipses() -> EclipseSky {
    let at = |n: i64, hours: i64| day(n) + Duration::hours(hours);
    EclipseSky {
        sky: mean_lunar_sky(),
        lunar: vec![
            lunar_times(at(73, 10), true, true),
            lunar_times(at(250, 3), false, false),
            // Same sign and type as the one before
            lunar_times(at(277, 11), false, false),
        ],
        solar: vec![
            (at(29, 3), SolarEclipseKind::Annular),
            (at(200, 0), SolarEclipseKind::Partial),
            (at(400, 0), SolarEclipseKind::Total),
        ],
    }
}

#[test]
fn test_eclipses_are_deduplicated_and_merged_by_date() {
    let eph = scripted_eclipses();

    let eclipses = find_eclipses(&eph, &year()).unwrap();

    let summary: Vec<(NaiveDate, EclipseType)> = eclipses
        .iter()
        .map(|e| (e.date.date_naive(), e.eclipse_type))
        .collect();
    assert_eq!(
        summary,
        vec![
            (date(2025, 1, 30), EclipseType::AnnularSolar),
            (date(2025, 3, 15), EclipseType::TotalLunar),
            (date(2025, 7, 20), EclipseType::PartialSolar),
            (date(2025, 9, 8), EclipseType::PenumbralLunar),
        ]
    );

    // Solar eclipses carry the Sun, lunar eclipses the Moon
    let annular = eclipses[0];
    let sun = Position::from_longitude(eph.position_at(Body::Sun, annular.date).unwrap());
    assert_eq!(annular.position, sun);
    assert_eq!(annular.modality, sun.modality());
    let total = eclipses[1];
    assert_eq!(total.position.sign, Sign::Virgo);
    assert_eq!(total.position.degree, 22);
}

#[test]
fn test_lunar_eclipse_without_bracketing_contacts_is_skipped() {
    let mut eph = scripted_eclipses();
    let mut broken = lunar_times(day(140), false, false);
    broken.penumbral_end = broken.penumbral_begin;
    eph.lunar = vec![broken];

    assert!(find_lunar_eclipses(&eph, &year()).unwrap().is_empty());
}

#[test]
fn test_lunations_in_eclipse_months_are_dropped() {
    let eph = scripted_eclipses();
    let lunations = find_lunations(&eph, &year(), &ScanSettings::default()).unwrap();
    let eclipses = find_eclipses(&eph, &year()).unwrap();

    let kept = lunations_outside_eclipses(&lunations, &eclipses);

    assert_eq!(kept.len(), lunations.len() - 3);
    for dropped in [date(2025, 1, 30), date(2025, 3, 15), date(2025, 9, 8)] {
        assert!(lunations.iter().any(|l| l.date == dropped));
        assert!(kept.iter().all(|l| l.date != dropped));
    }
}

#[test]
fn test_geometric_eclipses_on_the_ecliptic() {
    let sky = mean_lunar_sky();

    let lunar = sky.next_lunar_eclipse(epoch()).unwrap().unwrap();
    let full_moon = epoch() + Duration::seconds((175.0 / 12.1908 * 86_400.0) as i64);
    assert!((lunar.maximum - full_moon).num_seconds().abs() < 60);
    assert!(lunar.total_begin.is_some());
    assert!(lunar.penumbral_begin < lunar.partial_begin);
    assert!(lunar.partial_end < lunar.penumbral_end);

    // Moon at mean distance looks smaller than the Sun at 1 AU
    let new_moon = epoch() + Duration::seconds((355.0 / 12.1908 * 86_400.0) as i64);
    let annular = sky.next_solar_eclipse(epoch(), SolarEclipseKind::Annular).unwrap().unwrap();
    assert!((annular - new_moon).num_seconds().abs() < 60);
    assert_eq!(sky.next_solar_eclipse(epoch(), SolarEclipseKind::Total).unwrap(), None);
}

#[test]
fn test_no_eclipses_far_from_the_node() {
    let sky = mean_lunar_sky().with_moon_latitude(5.0);
    assert_eq!(sky.next_lunar_eclipse(epoch()).unwrap(), None);
    assert!(find_eclipses(&sky, &SearchWindow::months(epoch(), 2).unwrap())
        .unwrap()
        .is_empty());
}
