//! Twilight classification and dawn/dusk crossings.
//!
//! Twilight boundaries are defined on the Sun's geometric altitude. Neither the
//! classifier nor the crossing search applies refraction.

use serde::Serialize;

use super::crossing::{ScanPlan, find_altitude_crossing};
use super::provider::EphemerisProvider;
use super::types::{Body, CrossingDirection, Instant, Observer};

/// Sky state derived from a single solar altitude sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TwilightPhase {
    Day,
    CivilTwilight,
    NauticalTwilight,
    AstronomicalTwilight,
    Night,
}

impl TwilightPhase {
    /// Classify a geometric solar altitude in degrees.
    ///
    /// Total over all inputs: NaN compares false against every bound and
    /// lands in `Night`.
    pub fn classify(altitude_deg: f64) -> Self {
        if altitude_deg >= 0.0 {
            Self::Day
        } else if altitude_deg >= -6.0 {
            Self::CivilTwilight
        } else if altitude_deg >= -12.0 {
            Self::NauticalTwilight
        } else if altitude_deg >= -18.0 {
            Self::AstronomicalTwilight
        } else {
            Self::Night
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::CivilTwilight => "Civil Twilight",
            Self::NauticalTwilight => "Nautical Twilight",
            Self::AstronomicalTwilight => "Astronomical Twilight",
            Self::Night => "Night",
        }
    }
}

/// The six dawn and dusk boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TwilightEvent {
    CivilDusk,
    NauticalDusk,
    AstronomicalDusk,
    AstronomicalDawn,
    NauticalDawn,
    CivilDawn,
}

impl TwilightEvent {
    pub const ALL: [Self; 6] = [
        Self::CivilDusk,
        Self::NauticalDusk,
        Self::AstronomicalDusk,
        Self::AstronomicalDawn,
        Self::NauticalDawn,
        Self::CivilDawn,
    ];

    /// Geometric solar altitude of the boundary in degrees.
    pub fn altitude_deg(self) -> f64 {
        match self {
            Self::CivilDusk | Self::CivilDawn => -6.0,
            Self::NauticalDusk | Self::NauticalDawn => -12.0,
            Self::AstronomicalDusk | Self::AstronomicalDawn => -18.0,
        }
    }

    /// Dawns rise through the boundary, dusks fall through it.
    pub fn direction(self) -> CrossingDirection {
        match self {
            Self::AstronomicalDawn | Self::NauticalDawn | Self::CivilDawn => {
                CrossingDirection::Ascending
            }
            Self::CivilDusk | Self::NauticalDusk | Self::AstronomicalDusk => {
                CrossingDirection::Descending
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CivilDusk => "Civil dusk",
            Self::NauticalDusk => "Nautical dusk",
            Self::AstronomicalDusk => "Astronomical dusk",
            Self::AstronomicalDawn => "Astronomical dawn",
            Self::NauticalDawn => "Nautical dawn",
            Self::CivilDawn => "Civil dawn",
        }
    }
}

/// Next occurrence of each twilight boundary, searched forward from one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TwilightTimes {
    pub civil_dusk: Option<Instant>,
    pub nautical_dusk: Option<Instant>,
    pub astronomical_dusk: Option<Instant>,
    pub astronomical_dawn: Option<Instant>,
    pub nautical_dawn: Option<Instant>,
    pub civil_dawn: Option<Instant>,
}

impl TwilightTimes {
    pub fn get(&self, event: TwilightEvent) -> Option<Instant> {
        match event {
            TwilightEvent::CivilDusk => self.civil_dusk,
            TwilightEvent::NauticalDusk => self.nautical_dusk,
            TwilightEvent::AstronomicalDusk => self.astronomical_dusk,
            TwilightEvent::AstronomicalDawn => self.astronomical_dawn,
            TwilightEvent::NauticalDawn => self.nautical_dawn,
            TwilightEvent::CivilDawn => self.civil_dawn,
        }
    }

    fn set(&mut self, event: TwilightEvent, at: Option<Instant>) {
        let slot = match event {
            TwilightEvent::CivilDusk => &mut self.civil_dusk,
            TwilightEvent::NauticalDusk => &mut self.nautical_dusk,
            TwilightEvent::AstronomicalDusk => &mut self.astronomical_dusk,
            TwilightEvent::AstronomicalDawn => &mut self.astronomical_dawn,
            TwilightEvent::NauticalDawn => &mut self.nautical_dawn,
            TwilightEvent::CivilDawn => &mut self.civil_dawn,
        };
        *slot = at;
    }
}

/// Next instant after `start` at which the Sun passes the boundary of `event`.
///
/// Absent during polar day or night, when the Sun never reaches the boundary
/// within the 48 hour horizon.
pub fn find_twilight_event<P: EphemerisProvider + ?Sized>(
    provider: &P,
    observer: &Observer,
    event: TwilightEvent,
    start: Instant,
) -> Option<Instant> {
    find_altitude_crossing(
        provider,
        observer,
        Body::Sun,
        event.altitude_deg(),
        event.direction(),
        start,
        ScanPlan::ALTITUDE,
    )
}

pub fn find_twilight_times<P: EphemerisProvider + ?Sized>(
    provider: &P,
    observer: &Observer,
    start: Instant,
) -> TwilightTimes {
    let mut times = TwilightTimes::default();
    for event in TwilightEvent::ALL {
        times.set(event, find_twilight_event(provider, observer, event, start));
    }
    times
}
