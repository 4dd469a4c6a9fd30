use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use urania::ephemeris::GeoLocation;
use urania::search::{ScanSettings, SearchWindow};

const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

#[derive(Debug, Clone, PartialEq)]
pub struct UraniaConfig {
    pub ephemeris_path: PathBuf,
    pub search: SearchConfig,
    pub location: Option<GeoLocation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub orb_degrees: u8,
    pub lunation_max_steps: u32,
    pub min_retrograde_days: i64,
    pub window_months: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let scan = ScanSettings::default();
        Self {
            orb_degrees: scan.orb_degrees,
            lunation_max_steps: scan.lunation_max_steps,
            min_retrograde_days: scan.min_retrograde_days,
            window_months: 12,
        }
    }
}

impl UraniaConfig {
    pub fn scan_settings(&self) -> ScanSettings {
        ScanSettings {
            orb_degrees: self.search.orb_degrees,
            lunation_max_steps: self.search.lunation_max_steps,
            min_retrograde_days: self.search.min_retrograde_days,
        }
    }

    /// The configured number of months from `start`.
    pub fn search_window(&self, start: chrono::DateTime<chrono::Utc>) -> anyhow::Result<SearchWindow> {
        Ok(SearchWindow::months(start, self.search.window_months)?)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchToml {
    #[serde(default)]
    orb_degrees: Option<u8>,
    #[serde(default)]
    lunation_max_steps: Option<u32>,
    #[serde(default)]
    min_retrograde_days: Option<i64>,
    #[serde(default)]
    window_months: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
struct LocationToml {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    search: SearchToml,
    #[serde(default)]
    location: Option<LocationToml>,
}

/// Try the common relative paths for `configs/urania.toml`. `None` if none exists.
pub fn read_config_toml_text() -> Option<String> {
    let paths = ["configs/urania.toml", "../../configs/urania.toml"];
    paths.iter().find_map(|p| fs::read_to_string(p).ok())
}

/// Parse config text. `env_path` stands in for `SWISS_EPHEMERIS_PATH` when
/// the file names no ephemeris directory.
pub fn parse_config(text: &str, env_path: Option<PathBuf>) -> anyhow::Result<UraniaConfig> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse urania.toml: {e}"))?;

    let ephemeris_path = root
        .ephemeris
        .path
        .or(env_path)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EPHEMERIS_PATH));

    let defaults = SearchConfig::default();
    let search = SearchConfig {
        orb_degrees: root.search.orb_degrees.unwrap_or(defaults.orb_degrees),
        lunation_max_steps: root.search.lunation_max_steps.unwrap_or(defaults.lunation_max_steps),
        min_retrograde_days: root.search.min_retrograde_days.unwrap_or(defaults.min_retrograde_days),
        window_months: root.search.window_months.unwrap_or(defaults.window_months),
    };
    if search.orb_degrees > 29 {
        anyhow::bail!("search.orb_degrees must be below 30, got {}", search.orb_degrees);
    }
    if search.lunation_max_steps == 0 {
        anyhow::bail!("search.lunation_max_steps must be at least 1");
    }
    if search.window_months == 0 {
        anyhow::bail!("search.window_months must be at least 1");
    }

    let location = root
        .location
        .map(|l| GeoLocation::new(l.latitude, l.longitude))
        .transpose()
        .map_err(|e| anyhow::anyhow!("Invalid [location] in urania.toml: {e}"))?;

    Ok(UraniaConfig {
        ephemeris_path,
        search,
        location,
    })
}

fn env_ephemeris_path() -> Option<PathBuf> {
    env::var("SWISS_EPHEMERIS_PATH").ok().map(PathBuf::from)
}

/// Load `path`, or the first `configs/urania.toml` found; defaults when there is none.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<UraniaConfig> {
    let text = match path {
        Some(p) => fs::read_to_string(p)
            .map_err(|e| anyhow::anyhow!("Could not read config {}: {e}", p.display()))?,
        None => read_config_toml_text().unwrap_or_default(),
    };
    parse_config(&text, env_ephemeris_path())
}
