//! Value types shared by the event search engine.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::error::AstroError;
use crate::constants::{
    MAXIMUM_LATITUDE, MAXIMUM_LONGITUDE, MINIMUM_ELEVATION, MINIMUM_LATITUDE, MINIMUM_LONGITUDE,
};

/// An absolute point in time. All searches are pure functions of an `Instant`
/// and an [`Observer`].
pub type Instant = DateTime<Utc>;

/// Geographic position of the observer.
///
/// Immutable for the duration of one refresh; the engine only ever borrows it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observer {
    /// Geodetic latitude in degrees, north positive. Range: [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, east positive. Range: [-180, 180].
    pub longitude: f64,
    /// Height above mean sea level in meters. Must be at least -500.
    pub elevation_meters: f64,
}

impl Observer {
    /// Create an observer, rejecting out-of-range or non-finite coordinates.
    pub fn new(latitude: f64, longitude: f64, elevation_meters: f64) -> Result<Self, AstroError> {
        if !latitude.is_finite() || !(MINIMUM_LATITUDE..=MAXIMUM_LATITUDE).contains(&latitude) {
            return Err(AstroError::InvalidObserver(format!(
                "latitude must be between {MINIMUM_LATITUDE} and {MAXIMUM_LATITUDE} degrees (got {latitude})"
            )));
        }
        if !longitude.is_finite() || !(MINIMUM_LONGITUDE..=MAXIMUM_LONGITUDE).contains(&longitude)
        {
            return Err(AstroError::InvalidObserver(format!(
                "longitude must be between {MINIMUM_LONGITUDE} and {MAXIMUM_LONGITUDE} degrees (got {longitude})"
            )));
        }
        if !elevation_meters.is_finite() || elevation_meters < MINIMUM_ELEVATION {
            return Err(AstroError::InvalidObserver(format!(
                "elevation must be at least {MINIMUM_ELEVATION} meters (got {elevation_meters})"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
            elevation_meters,
        })
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude.to_radians()
    }
}

/// Body tracked by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Body {
    Sun,
    Moon,
}

impl Body {
    /// Geometric altitude of the body's center when its upper limb touches the
    /// refracted horizon.
    ///
    /// 34' of horizon refraction plus the mean semidiameter (16' Sun, 15.5' Moon).
    /// The Moon's value assumes topocentric coordinates, so no parallax term.
    pub fn rise_set_altitude_deg(self) -> f64 {
        match self {
            Self::Sun => -(34.0 + 16.0) / 60.0,
            Self::Moon => -(34.0 + 15.5) / 60.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
        }
    }
}

/// Direction in which a tracked quantity passes its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CrossingDirection {
    /// Rising through the threshold (rise, dawn).
    Ascending,
    /// Falling through the threshold (set, dusk).
    Descending,
}

impl CrossingDirection {
    /// Whether the step `previous -> next` passes `threshold` in this direction.
    pub fn crosses(self, previous: f64, next: f64, threshold: f64) -> bool {
        match self {
            Self::Descending => previous > threshold && next <= threshold,
            Self::Ascending => previous < threshold && next >= threshold,
        }
    }

    /// Whether `value` lies on the far side of `threshold`.
    pub fn has_reached(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Descending => value <= threshold,
            Self::Ascending => value >= threshold,
        }
    }
}

/// Topocentric equatorial position of date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquatorialCoordinate {
    /// Right ascension in degrees, [0, 360).
    pub right_ascension: f64,
    /// Declination in degrees, [-90, 90].
    pub declination: f64,
    /// Geocentric distance in kilometers.
    pub distance_km: f64,
}

/// Position projected onto the observer's local horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HorizontalCoordinate {
    /// Degrees above the horizon, [-90, 90].
    pub altitude: f64,
    /// Degrees from north through east, [0, 360).
    pub azimuth: f64,
}

impl HorizontalCoordinate {
    pub fn is_finite(&self) -> bool {
        self.altitude.is_finite() && self.azimuth.is_finite()
    }
}
