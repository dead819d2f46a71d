use crate::error::ConfigError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a one-line summary of all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Network association settings
    #[serde(default)]
    pub network: NetworkConfig,

    /// Remote service endpoints
    #[serde(default)]
    pub endpoints: EndpointConfig,

    /// Panel and map settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Preset cities
    #[serde(default)]
    pub stations: StationsConfig,

    /// Loop timing
    #[serde(default)]
    pub timing: TimingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// host:port that must accept a TCP connection before the link counts as up
    #[serde(default = "default_probe_host")]
    pub probe_host: String,

    /// Seconds to keep retrying the probe before giving up
    #[serde(default = "default_connect_deadline")]
    pub connect_deadline_secs: u64,
}

fn default_probe_host() -> String {
    "api.open-meteo.com:443".to_string()
}

fn default_connect_deadline() -> u64 {
    20
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            probe_host: default_probe_host(),
            connect_deadline_secs: default_connect_deadline(),
        }
    }
}

impl NetworkConfig {
    pub fn connect_deadline(&self) -> Duration {
        Duration::from_secs(self.connect_deadline_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// IP geolocation endpoint (ip-api.com compatible)
    pub geolocation_url: String,

    /// Forecast endpoint (Open-Meteo compatible)
    pub weather_url: String,

    /// Slippy-map tile server base; tiles are requested as `{base}/{z}/{x}/{y}.png`
    pub tile_url: String,

    /// Static map server base; maps are requested as `{base}/map?lat=..&lon=..&city=..`
    pub map_server_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            geolocation_url: "http://ip-api.com/json/".to_string(),
            weather_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            tile_url: "https://tile.openstreetmap.org".to_string(),
            map_server_url: "http://localhost:8765".to_string(),
        }
    }
}

/// Where the right-hand map panel comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MapMode {
    /// One OSM tile centred on the location
    #[default]
    Tile,
    /// Built-in Great Britain outline with a location dot
    Outline,
    /// Pre-rendered map from the static map server
    Server,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub map_mode: MapMode,

    /// OSM zoom level; 13 is roughly a 4.7 km wide tile
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// PNG file the panel image is written to on every update
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

fn default_zoom() -> u8 {
    13
}

fn default_output_path() -> PathBuf {
    PathBuf::from("inky-frame.png")
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            map_mode: MapMode::default(),
            zoom: default_zoom(),
            output_path: default_output_path(),
        }
    }
}

/// A named preset city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetCity {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl PresetCity {
    fn new(name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationsConfig {
    /// Named presets, in button order after the Auto slot
    #[serde(default = "default_cities")]
    pub cities: Vec<PresetCity>,

    /// Name of the preset the home button jumps to
    #[serde(default = "default_home")]
    pub home: String,
}

fn default_cities() -> Vec<PresetCity> {
    vec![
        PresetCity::new("London", 51.5074, -0.1278),
        PresetCity::new("Cambridge", 52.2053, 0.1218),
        PresetCity::new("Oxford", 51.7520, -1.2577),
        PresetCity::new("Bristol", 51.4545, -2.5879),
        PresetCity::new("Birmingham", 52.4862, -1.8904),
        PresetCity::new("Manchester", 53.4808, -2.2426),
        PresetCity::new("Leeds", 53.8008, -1.5491),
        PresetCity::new("Newcastle", 54.9783, -1.6178),
        PresetCity::new("Edinburgh", 55.9533, -3.1883),
        PresetCity::new("Glasgow", 55.8642, -4.2518),
    ]
}

fn default_home() -> String {
    "Cambridge".to_string()
}

impl Default for StationsConfig {
    fn default() -> Self {
        Self {
            cities: default_cities(),
            home: default_home(),
        }
    }
}

impl StationsConfig {
    /// Position of the home city among the named presets.
    pub fn home_position(&self) -> Option<usize> {
        self.cities.iter().position(|c| c.name == self.home)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Seconds without a button press before returning to the Auto city
    #[serde(default = "default_manual_timeout")]
    pub manual_timeout_secs: u64,

    /// Minutes before the shown city is fetched again
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u32,

    /// Button sampling period
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

fn default_manual_timeout() -> u64 {
    10
}

fn default_refresh_minutes() -> u32 {
    15
}

fn default_tick_millis() -> u64 {
    250
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            manual_timeout_secs: default_manual_timeout(),
            refresh_minutes: default_refresh_minutes(),
            tick_millis: default_tick_millis(),
        }
    }
}

impl TimingConfig {
    pub fn manual_timeout(&self) -> Duration {
        Duration::from_secs(self.manual_timeout_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.refresh_minutes) * 60)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if the file is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Wrote default configuration to {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Warnings are logged; errors fail the load.
    pub fn load_validated(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(
            &self.endpoints.geolocation_url,
            "endpoints.geolocation_url",
            &mut result,
        );
        self.validate_url(&self.endpoints.weather_url, "endpoints.weather_url", &mut result);
        self.validate_url(&self.endpoints.tile_url, "endpoints.tile_url", &mut result);
        self.validate_url(
            &self.endpoints.map_server_url,
            "endpoints.map_server_url",
            &mut result,
        );

        if self.network.probe_host.rsplit_once(':').is_none() {
            result.add_error("network.probe_host", "Expected host:port");
        }
        if self.network.connect_deadline_secs == 0 {
            result.add_error(
                "network.connect_deadline_secs",
                "Connect deadline must be greater than 0",
            );
        }

        if self.display.zoom > 19 {
            result.add_error("display.zoom", "Tile servers stop at zoom 19");
        }

        if self.stations.cities.is_empty() {
            result.add_error("stations.cities", "At least one preset city is required");
        }
        for (i, city) in self.stations.cities.iter().enumerate() {
            let field = format!("stations.cities[{}]", i);
            if city.name.trim().is_empty() {
                result.add_error(&field, "City name must not be empty");
            }
            // Mercator blows up at the poles
            if !(-85.0..=85.0).contains(&city.latitude) {
                result.add_error(&field, format!("Latitude {} out of range", city.latitude));
            }
            if !(-180.0..=180.0).contains(&city.longitude) {
                result.add_error(&field, format!("Longitude {} out of range", city.longitude));
            }
        }
        if self.stations.home_position().is_none() {
            result.add_error(
                "stations.home",
                format!("Home city '{}' is not in the preset list", self.stations.home),
            );
        }

        if self.timing.manual_timeout_secs == 0 {
            result.add_error(
                "timing.manual_timeout_secs",
                "Manual timeout must be greater than 0",
            );
        }
        if self.timing.tick_millis == 0 {
            result.add_error("timing.tick_millis", "Tick must be greater than 0");
        } else if self.timing.tick() >= self.timing.manual_timeout() {
            result.add_warning(
                "timing.tick_millis",
                "Tick is longer than the manual timeout",
            );
        }
        if self.timing.refresh_minutes == 0 {
            result.add_warning(
                "timing.refresh_minutes",
                "Weather refresh disabled; each city is fetched once",
            );
        } else if self.timing.refresh_minutes > 1440 {
            result.add_warning(
                "timing.refresh_minutes",
                "Weather refresh interval is more than 24 hours",
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the default configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("inky-station");

        Ok(config_dir.join("config.toml"))
    }
}
