//! Ephemeris provider capability.
//!
//! The search engine never computes positions itself. It asks a provider for
//! equatorial positions, the horizon transform, the lunar phase angle and the
//! solar ecliptic longitude, and prefers the provider's own solvers for
//! rise/set, phase and longitude searches when it has them.
//!
//! Optional capabilities default to [`AstroError::Unsupported`]. Callers treat
//! any error from the native searches as a signal to fall back to the internal
//! crossing engine in [`crate::astro::crossing`].

use super::error::AstroError;
use super::types::{
    Body, CrossingDirection, EquatorialCoordinate, HorizontalCoordinate, Instant, Observer,
};

pub trait EphemerisProvider {
    /// Topocentric equatorial position of `body` at `instant`.
    fn equatorial_position(
        &self,
        body: Body,
        instant: Instant,
        observer: &Observer,
    ) -> Result<EquatorialCoordinate, AstroError>;

    /// Project an equatorial position onto the observer's horizon.
    ///
    /// When `apply_refraction` is set the altitude is the apparent one; otherwise
    /// it is geometric.
    fn horizontal(
        &self,
        instant: Instant,
        observer: &Observer,
        equatorial: EquatorialCoordinate,
        apply_refraction: bool,
    ) -> Result<HorizontalCoordinate, AstroError>;

    /// Moon minus Sun geocentric ecliptic longitude in degrees, [0, 360).
    /// 0 is new moon, 180 is full moon.
    fn lunar_phase_angle(&self, instant: Instant) -> Result<f64, AstroError>;

    /// Apparent geocentric ecliptic longitude of the Sun in degrees, [0, 360).
    fn solar_ecliptic_longitude(&self, _instant: Instant) -> Result<f64, AstroError> {
        Err(AstroError::Unsupported("solar ecliptic longitude"))
    }

    /// Provider-native search for the first rise (`Ascending`) or set
    /// (`Descending`) of `body` at or after `search_start`.
    ///
    /// `Ok(None)` means no occurrence within the provider's window.
    fn native_rise_set(
        &self,
        _body: Body,
        _observer: &Observer,
        _direction: CrossingDirection,
        _search_start: Instant,
    ) -> Result<Option<Instant>, AstroError> {
        Err(AstroError::Unsupported("rise/set search"))
    }

    /// Provider-native search for the next instant the lunar phase angle
    /// reaches `target_degrees`.
    fn native_phase_search(
        &self,
        _target_degrees: f64,
        _search_start: Instant,
    ) -> Result<Option<Instant>, AstroError> {
        Err(AstroError::Unsupported("lunar phase search"))
    }

    /// Provider-native search for the next instant the solar ecliptic
    /// longitude reaches `target_degrees`.
    fn native_longitude_search(
        &self,
        _target_degrees: f64,
        _search_start: Instant,
    ) -> Result<Option<Instant>, AstroError> {
        Err(AstroError::Unsupported("solar longitude search"))
    }

    /// Equatorial position followed by the horizon transform.
    fn body_horizontal(
        &self,
        body: Body,
        instant: Instant,
        observer: &Observer,
        apply_refraction: bool,
    ) -> Result<HorizontalCoordinate, AstroError> {
        let equatorial = self.equatorial_position(body, instant, observer)?;
        let horizontal = self.horizontal(instant, observer, equatorial, apply_refraction)?;
        if !horizontal.is_finite() {
            return Err(AstroError::NonFinite("horizontal coordinate"));
        }
        Ok(horizontal)
    }
}
