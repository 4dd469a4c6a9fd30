use chrono::{DateTime, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urania::ephemeris::{Body, Ephemeris, EphemerisError, GeoLocation, HousePositions, PlanetPosition};
use urania::search::{find_lunations, find_mercury_retrogrades, zero_degree_ingresses, ScanSettings, SearchWindow};
use urania::western::normalize_degrees;

/// Mean motions plus a sinusoidal wobble that makes Mercury station.
struct MeanSky {
    epoch: DateTime<Utc>,
}

impl MeanSky {
    fn longitude(&self, body: Body, days: f64) -> f64 {
        let (start, rate) = match body {
            Body::Sun => (280.0, 0.9856),
            Body::Moon => (218.3, 13.1764),
            Body::Mercury => return normalize_degrees(280.0 + 0.9856 * days + 22.0 * (days / 18.3).sin()),
            Body::Venus => (181.9, 1.6021),
            Body::Mars => (355.4, 0.5240),
            Body::Jupiter => (34.4, 0.0831),
            Body::Saturn => (50.1, 0.0335),
            Body::Uranus => (314.1, 0.0117),
            Body::Neptune => (304.3, 0.0060),
            Body::Pluto => (238.9, 0.0040),
        };
        normalize_degrees(start + rate * days)
    }
}

impl Ephemeris for MeanSky {
    fn body_position(&self, body: Body, at: DateTime<Utc>) -> Result<PlanetPosition, EphemerisError> {
        let days = (at - self.epoch).num_milliseconds() as f64 / 86_400_000.0;
        let lon = self.longitude(body, days);
        let speed_lon = self.longitude(body, days + 0.5) - self.longitude(body, days - 0.5);
        Ok(PlanetPosition {
            lon,
            lat: 0.0,
            distance_au: if body == Body::Moon { 0.00257 } else { 1.0 },
            speed_lon,
            retrograde: speed_lon < 0.0,
        })
    }

    fn houses_at(&self, _at: DateTime<Utc>, _location: GeoLocation) -> Result<HousePositions, EphemerisError> {
        Ok(HousePositions::from_cusps(std::array::from_fn(|i| i as f64 * 30.0)))
    }
}

fn bench_one_year_scans(c: &mut Criterion) {
    let epoch = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let sky = MeanSky { epoch };
    let window = SearchWindow::one_year(epoch).unwrap();
    let settings = ScanSettings::default();

    c.bench_function("find_lunations", |b| {
        b.iter(|| find_lunations(black_box(&sky), black_box(&window), &settings))
    });
    c.bench_function("find_mercury_retrogrades", |b| {
        b.iter(|| find_mercury_retrogrades(black_box(&sky), black_box(&window), &settings))
    });
    c.bench_function("zero_degree_ingresses", |b| {
        b.iter(|| zero_degree_ingresses(black_box(&sky), black_box(&window)))
    });
}

criterion_group!(benches, bench_one_year_scans);
criterion_main!(benches);
