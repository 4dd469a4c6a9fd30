use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use urania::chart::{build_chart, NatalChart};
use urania::ephemeris::{Body, GeoLocation, SwissEphemerisAdapter};
use urania::search::{
    eclipse_contacts, find_eclipses, find_lunations, lunation_contacts, find_retrograde_periods, lunations_outside_eclipses, major_transits,
    planetary_ingress, transit_entries, zero_degree_ingresses, Eclipse, Lunation, NatalContact, SearchWindow, TransitEntry,
};
use urania::sect::{chart_is_diurnal, classify_transit, sect_planets, TransitClassification};
use urania::western::{profection, Position, Sign};
use urania_config::{load_config, UraniaConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Natal charts and one-year transit search")]
struct Args {
    /// Config file (default: configs/urania.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Swiss Ephemeris data directory, overriding the config.
    #[arg(long, global = true)]
    ephemeris_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(ClapArgs, Debug)]
struct LocationArgs {
    /// Latitude in degrees, north positive.
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude in degrees, east positive.
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,
}

#[derive(ClapArgs, Debug)]
struct WindowArgs {
    /// Window start, RFC 3339 (default: now).
    #[arg(long)]
    start: Option<DateTime<Utc>>,

    /// Window length in months (default: from config).
    #[arg(long)]
    months: Option<u32>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Natal chart: ten bodies and four angles.
    Chart {
        /// Birth instant, RFC 3339.
        #[arg(long)]
        birth: DateTime<Utc>,
        #[command(flatten)]
        location: LocationArgs,
        /// Fill in the houses each placement rules.
        #[arg(long)]
        rulerships: bool,
    },
    /// New and full moons.
    Lunations {
        #[command(flatten)]
        window: WindowArgs,
        /// Leave out lunations standing in for an eclipse that month.
        #[arg(long)]
        outside_eclipses: bool,
    },
    /// Solar and lunar eclipses.
    Eclipses {
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Retrograde periods of one body.
    Retrogrades {
        #[arg(long, default_value = "Mercury")]
        body: Body,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// 0° sign ingresses, or the days a body reaches one sign and degree.
    Ingresses {
        #[arg(long, requires = "sign")]
        body: Option<Body>,
        #[arg(long)]
        sign: Option<Sign>,
        #[arg(long, default_value_t = 0)]
        degree: u8,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Slow-planet transits to a natal chart, with significance badges.
    Transits {
        #[arg(long)]
        birth: DateTime<Utc>,
        #[command(flatten)]
        location: LocationArgs,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Lunations and eclipses aspecting a natal chart within the configured orb.
    Contacts {
        #[arg(long)]
        birth: DateTime<Utc>,
        #[command(flatten)]
        location: LocationArgs,
        #[command(flatten)]
        window: WindowArgs,
        /// Orb in whole degrees (default: from config).
        #[arg(long)]
        orb: Option<u8>,
    },
    /// Annual profection for a date.
    Profection {
        #[arg(long)]
        birth: DateTime<Utc>,
        #[command(flatten)]
        location: LocationArgs,
        /// Reference date (default: today).
        #[arg(long)]
        on: Option<NaiveDate>,
    },
}

#[derive(Serialize)]
struct Contacts {
    lunations: Vec<NatalContact<Lunation>>,
    eclipses: Vec<NatalContact<Eclipse>>,
}

#[derive(Serialize)]
struct ClassifiedTransit {
    #[serde(flatten)]
    entry: TransitEntry,
    #[serde(flatten)]
    classification: TransitClassification,
}

fn resolve_location(args: &LocationArgs, cfg: &UraniaConfig) -> anyhow::Result<GeoLocation> {
    match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => Ok(GeoLocation::new(lat, lon)?),
        (None, None) => cfg
            .location
            .ok_or_else(|| anyhow::anyhow!("No location: pass --lat and --lon or set [location] in urania.toml")),
        _ => anyhow::bail!("--lat and --lon must be given together"),
    }
}

fn resolve_window(args: &WindowArgs, cfg: &UraniaConfig) -> anyhow::Result<SearchWindow> {
    let start = args.start.unwrap_or_else(Utc::now);
    match args.months {
        Some(months) => Ok(SearchWindow::months(start, months)?),
        None => cfg.search_window(start),
    }
}

fn natal_chart(
    eph: &SwissEphemerisAdapter,
    birth: DateTime<Utc>,
    location: &LocationArgs,
    cfg: &UraniaConfig,
) -> anyhow::Result<NatalChart> {
    let location = resolve_location(location, cfg)?;
    build_chart(eph, birth, location).with_context(|| format!("Failed to build chart for {birth}"))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(path) = args.ephemeris_path {
        cfg.ephemeris_path = path;
    }
    let eph = SwissEphemerisAdapter::new(&cfg.ephemeris_path)
        .with_context(|| format!("Failed to open Swiss Ephemeris at {}", cfg.ephemeris_path.display()))?;
    let settings = cfg.scan_settings();

    match args.command {
        Command::Chart {
            birth,
            location,
            rulerships,
        } => {
            let chart = natal_chart(&eph, birth, &location, &cfg)?;
            let chart = if rulerships { chart.with_rulerships()? } else { chart };
            print_json(&chart)
        }
        Command::Lunations {
            window,
            outside_eclipses,
        } => {
            let window = resolve_window(&window, &cfg)?;
            let lunations = find_lunations(&eph, &window, &settings)?;
            if outside_eclipses {
                let eclipses = find_eclipses(&eph, &window)?;
                print_json(&lunations_outside_eclipses(&lunations, &eclipses))
            } else {
                print_json(&lunations)
            }
        }
        Command::Eclipses { window } => {
            let window = resolve_window(&window, &cfg)?;
            print_json(&find_eclipses(&eph, &window)?)
        }
        Command::Retrogrades { body, window } => {
            let window = resolve_window(&window, &cfg)?;
            print_json(&find_retrograde_periods(&eph, body, &window, &settings)?)
        }
        Command::Ingresses {
            body,
            sign,
            degree,
            window,
        } => {
            let window = resolve_window(&window, &cfg)?;
            match (body, sign) {
                (Some(body), Some(sign)) => {
                    if degree > 29 {
                        anyhow::bail!("--degree must be 0-29, got {degree}");
                    }
                    let target = Position::new(sign, degree, 0);
                    print_json(&planetary_ingress(&eph, body, target, &window)?)
                }
                _ => print_json(&zero_degree_ingresses(&eph, &window)?),
            }
        }
        Command::Transits {
            birth,
            location,
            window,
        } => {
            let chart = natal_chart(&eph, birth, &location, &cfg)?;
            let window = resolve_window(&window, &cfg)?;
            let sect = sect_planets(chart_is_diurnal(&chart)?, &chart)?;
            let reports = major_transits(&eph, &chart, &window)?;
            let classified = transit_entries(&reports)
                .into_iter()
                .map(|entry| -> anyhow::Result<ClassifiedTransit> {
                    let classification = classify_transit(&chart, &sect, &entry)?;
                    Ok(ClassifiedTransit { entry, classification })
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            log::info!("{} transits between {} and {}", classified.len(), window.start, window.end);
            print_json(&classified)
        }
        Command::Contacts {
            birth,
            location,
            window,
            orb,
        } => {
            let chart = natal_chart(&eph, birth, &location, &cfg)?;
            let window = resolve_window(&window, &cfg)?;
            let mut settings = settings;
            if let Some(orb) = orb {
                if orb > 29 {
                    anyhow::bail!("--orb must be 0-29, got {orb}");
                }
                settings.orb_degrees = orb;
            }
            let lunations = find_lunations(&eph, &window, &settings)?;
            let eclipses = find_eclipses(&eph, &window)?;
            print_json(&Contacts {
                lunations: lunation_contacts(&lunations, &chart, &settings),
                eclipses: eclipse_contacts(&eclipses, &chart, &settings),
            })
        }
        Command::Profection { birth, location, on } => {
            let chart = natal_chart(&eph, birth, &location, &cfg)?;
            let on = on.unwrap_or_else(|| Utc::now().date_naive());
            print_json(&profection(chart.ascendant_sign()?, birth.date_naive(), on)?)
        }
    }
}
