//! Configuration system for skydash.
//!
//! Settings live in a single TOML file, `skydash.toml`, looked up in
//! **XDG_CONFIG_HOME**/skydash/ unless `--config DIR` points elsewhere:
//!
//! ```toml
//! latitude = 40.7128          # Geographic latitude (-90 to 90)
//! longitude = -74.0060        # Geographic longitude (-180 to 180)
//! elevation = 10              # Meters above sea level (>= -500)
//! city = "New York"           # Label shown in the header
//! timezone = "America/New_York"  # IANA name; system timezone when omitted
//! use_24_hour = false         # 24-hour clock instead of AM/PM
//! refresh_interval = 1        # Seconds between refreshes in watch mode (1-3600)
//! ```
//!
//! Every field is optional in the file. Coordinates can also come from the
//! command line; an observer is only required once the dashboard is computed.

pub mod loading;
pub mod validation;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

use crate::astro::Observer;
use crate::constants::*;

pub use loading::{get_config_path, load, load_from_path, set_config_dir};

/// Location overrides given on the command line. They take precedence over
/// the file.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoordinateOverrides {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
    pub city: Option<String>,
    pub use_24_hour: Option<bool>,
    pub timezone: Option<String>,
    pub refresh_interval: Option<u64>,
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        load()
    }

    pub fn get_config_path() -> Result<std::path::PathBuf> {
        get_config_path()
    }

    /// Replace file values with command-line ones, then re-validate.
    pub fn apply_overrides(&mut self, overrides: CoordinateOverrides) -> Result<()> {
        if let Some(lat) = overrides.latitude {
            self.latitude = Some(lat);
        }
        if let Some(lon) = overrides.longitude {
            self.longitude = Some(lon);
        }
        if let Some(elevation) = overrides.elevation {
            self.elevation = Some(elevation);
        }
        validation::validate_config(self)
    }

    /// Observer built from the configured coordinates.
    ///
    /// Fails with instructions when no location has been configured.
    pub fn observer(&self) -> Result<Observer> {
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            let path = get_config_path()
                .map(|p| loading::private_path(&p))
                .unwrap_or_else(|_| format!("{CONFIG_DIR_NAME}/{CONFIG_FILE_NAME}"));
            anyhow::bail!(
                "No location configured. Add latitude and longitude to {path} \
                 or pass --lat and --lon"
            );
        };
        let elevation = self.elevation.unwrap_or(DEFAULT_ELEVATION);
        Observer::new(latitude, longitude, elevation).context("Invalid observer location")
    }

    /// Configured display timezone, `None` for the system timezone.
    pub fn timezone(&self) -> Result<Option<chrono_tz::Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                chrono_tz::Tz::from_str(name)
                    .map_err(|_| anyhow::anyhow!("Unknown timezone '{name}'"))
            })
            .transpose()
    }

    pub fn use_24_hour(&self) -> bool {
        self.use_24_hour.unwrap_or(DEFAULT_USE_24_HOUR)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval.unwrap_or(DEFAULT_REFRESH_INTERVAL))
    }

    /// Header line for the dashboard: the city, or the raw coordinates.
    pub fn location_label(&self) -> String {
        match (&self.city, self.latitude, self.longitude) {
            (Some(city), _, _) if !city.trim().is_empty() => city.trim().to_string(),
            (_, Some(lat), Some(lon)) => format!("{lat:.4}°, {lon:.4}°"),
            _ => "Unknown location".to_string(),
        }
    }

    pub fn log_config(&self) {
        log_block_start!("Loaded configuration");
        if let Ok(path) = get_config_path() {
            log_indented!("Path: {}", loading::private_path(&path));
        }
        if let Some(city) = &self.city {
            log_indented!("City: {city}");
        }
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => {
                log_indented!("Coordinates: {lat:.4}°, {lon:.4}°");
            }
            _ => log_indented!("Coordinates: not set"),
        }
        log_indented!(
            "Elevation: {} m",
            self.elevation.unwrap_or(DEFAULT_ELEVATION)
        );
        log_indented!(
            "Timezone: {}",
            self.timezone.as_deref().unwrap_or("system")
        );
        log_indented!(
            "Clock: {}",
            if self.use_24_hour() { "24-hour" } else { "12-hour" }
        );
        log_indented!("Refresh interval: {}s", self.refresh_interval().as_secs());
    }
}

#[cfg(test)]
mod tests;
