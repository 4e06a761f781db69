//! Configuration validation functionality.
//!
//! Rejects coordinates, elevations and intervals the engine cannot use, with a
//! message naming the offending field.

use anyhow::Result;
use std::str::FromStr;

use super::Config;
use crate::constants::*;

pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(lat) = config.latitude
        && !(MINIMUM_LATITUDE..=MAXIMUM_LATITUDE).contains(&lat)
    {
        anyhow::bail!(
            "latitude must be between {} and {} degrees (got {})",
            MINIMUM_LATITUDE,
            MAXIMUM_LATITUDE,
            lat
        );
    }

    if let Some(lon) = config.longitude
        && !(MINIMUM_LONGITUDE..=MAXIMUM_LONGITUDE).contains(&lon)
    {
        anyhow::bail!(
            "longitude must be between {} and {} degrees (got {})",
            MINIMUM_LONGITUDE,
            MAXIMUM_LONGITUDE,
            lon
        );
    }

    match (config.latitude, config.longitude) {
        (Some(_), None) => anyhow::bail!("latitude is set but longitude is missing"),
        (None, Some(_)) => anyhow::bail!("longitude is set but latitude is missing"),
        _ => {}
    }

    if let Some(elevation) = config.elevation
        && !(elevation.is_finite() && elevation >= MINIMUM_ELEVATION)
    {
        anyhow::bail!(
            "elevation must be at least {} meters (got {})",
            MINIMUM_ELEVATION,
            elevation
        );
    }

    if let Some(interval) = config.refresh_interval
        && !(MINIMUM_REFRESH_INTERVAL..=MAXIMUM_REFRESH_INTERVAL).contains(&interval)
    {
        anyhow::bail!(
            "refresh_interval ({} s) must be between {} and {} seconds",
            interval,
            MINIMUM_REFRESH_INTERVAL,
            MAXIMUM_REFRESH_INTERVAL
        );
    }

    if let Some(name) = config.timezone.as_deref()
        && chrono_tz::Tz::from_str(name).is_err()
    {
        anyhow::bail!("timezone '{}' is not a known IANA timezone name", name);
    }

    Ok(())
}
