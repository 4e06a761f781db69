//! Provider-native searches versus the internal crossing engine.

use chrono::{TimeDelta, TimeZone, Utc};
use mockall::mock;
use mockall::predicate::eq;
use skydash::astro::crossing::{next_lunar_phase, next_solar_longitude};
use skydash::astro::riseset::search_rise_set;
use skydash::astro::types::EquatorialCoordinate;
use skydash::astro::{
    AstroError, Body, CrossingDirection, EphemerisProvider, HorizontalCoordinate, Instant, Observer,
};

mock! {
    pub Sky {}

    impl EphemerisProvider for Sky {
        fn equatorial_position(
            &self,
            body: Body,
            instant: Instant,
            observer: &Observer,
        ) -> Result<EquatorialCoordinate, AstroError>;

        fn horizontal(
            &self,
            instant: Instant,
            observer: &Observer,
            equatorial: EquatorialCoordinate,
            apply_refraction: bool,
        ) -> Result<HorizontalCoordinate, AstroError>;

        fn lunar_phase_angle(&self, instant: Instant) -> Result<f64, AstroError>;

        fn solar_ecliptic_longitude(&self, instant: Instant) -> Result<f64, AstroError>;

        fn native_rise_set(
            &self,
            body: Body,
            observer: &Observer,
            direction: CrossingDirection,
            search_start: Instant,
        ) -> Result<Option<Instant>, AstroError>;

        fn native_phase_search(
            &self,
            target_degrees: f64,
            search_start: Instant,
        ) -> Result<Option<Instant>, AstroError>;

        fn native_longitude_search(
            &self,
            target_degrees: f64,
            search_start: Instant,
        ) -> Result<Option<Instant>, AstroError>;
    }
}

fn start() -> Instant {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
}

fn observer() -> Observer {
    Observer::new(45.0, 7.0, 0.0).unwrap()
}

/// Altitude swings between -30 and +30 degrees once a day, lowest at `start`.
fn expect_daily_altitude(sky: &mut MockSky) {
    let origin = start();
    sky.expect_equatorial_position().returning(move |_, instant, _| {
        let hours = (instant - origin).num_milliseconds() as f64 / 3_600_000.0;
        Ok(EquatorialCoordinate {
            right_ascension: 0.0,
            declination: -30.0 * (std::f64::consts::TAU * hours / 24.0).cos(),
            distance_km: 1.0,
        })
    });
    sky.expect_horizontal().returning(|_, _, equatorial, _| {
        Ok(HorizontalCoordinate {
            altitude: equatorial.declination,
            azimuth: 90.0,
        })
    });
}

#[cfg(test)]
mod rise_set_fallback_tests {
    use super::*;

    /// Test that a native rise/set answer is used without sampling positions
    #[test]
    fn test_native_rise_set_preferred() {
        let mut sky = MockSky::new();
        let answer = start() + TimeDelta::minutes(372);
        sky.expect_native_rise_set()
            .with(
                eq(Body::Sun),
                eq(observer()),
                eq(CrossingDirection::Ascending),
                eq(start()),
            )
            .times(1)
            .returning(move |_, _, _, _| Ok(Some(answer)));
        sky.expect_equatorial_position().never();

        let found = search_rise_set(&sky, &observer(), Body::Sun, CrossingDirection::Ascending, start());
        assert_eq!(found, Some(answer));
    }

    /// Test that a native "no event" answer is respected
    #[test]
    fn test_native_absence_respected() {
        let mut sky = MockSky::new();
        sky.expect_native_rise_set()
            .times(1)
            .returning(|_, _, _, _| Ok(None));
        sky.expect_equatorial_position().never();

        let found = search_rise_set(&sky, &observer(), Body::Moon, CrossingDirection::Descending, start());
        assert_eq!(found, None);
    }

    /// Test that a failing native solver falls back to the altitude scan
    #[test]
    fn test_native_failure_falls_back_to_scan() {
        let mut sky = MockSky::new();
        sky.expect_native_rise_set()
            .returning(|_, _, _, _| Err(AstroError::Unsupported("rise/set search")));
        expect_daily_altitude(&mut sky);

        let found = search_rise_set(&sky, &observer(), Body::Sun, CrossingDirection::Ascending, start())
            .unwrap();

        let threshold = Body::Sun.rise_set_altitude_deg();
        let hours = (-threshold / 30.0).acos() * 24.0 / std::f64::consts::TAU;
        let expected = start() + TimeDelta::milliseconds((hours * 3_600_000.0) as i64);
        assert!((found - expected).abs() < TimeDelta::seconds(5), "{found} vs {expected}");
    }
}

#[cfg(test)]
mod phase_fallback_tests {
    use super::*;

    fn expect_linear_phase(sky: &mut MockSky) {
        let origin = start();
        // 90 degrees at the start, half a degree per hour
        sky.expect_lunar_phase_angle().returning(move |instant| {
            let hours = (instant - origin).num_milliseconds() as f64 / 3_600_000.0;
            Ok((90.0 + 0.5 * hours).rem_euclid(360.0))
        });
    }

    /// Test that a native phase result beyond the horizon is ignored
    #[test]
    fn test_out_of_horizon_native_phase_ignored() {
        let mut sky = MockSky::new();
        sky.expect_native_phase_search()
            .returning(|_, search_start| Ok(Some(search_start + TimeDelta::days(100))));
        expect_linear_phase(&mut sky);

        let found = next_lunar_phase(&sky, 0.0, start()).unwrap();
        let expected = start() + TimeDelta::hours(540);
        assert!((found - expected).abs() < TimeDelta::seconds(60));
    }

    /// Test that a native phase result inside the horizon is used
    #[test]
    fn test_native_phase_used() {
        let mut sky = MockSky::new();
        let answer = start() + TimeDelta::days(3);
        sky.expect_native_phase_search()
            .with(eq(180.0), eq(start()))
            .returning(move |_, _| Ok(Some(answer)));
        sky.expect_lunar_phase_angle().never();

        assert_eq!(next_lunar_phase(&sky, 180.0, start()), Some(answer));
    }

    /// Test that an unsupported native search falls back to the cyclic scan
    #[test]
    fn test_unsupported_native_phase_falls_back() {
        let mut sky = MockSky::new();
        sky.expect_native_phase_search()
            .returning(|_, _| Err(AstroError::Unsupported("lunar phase search")));
        expect_linear_phase(&mut sky);

        let found = next_lunar_phase(&sky, 180.0, start()).unwrap();
        let expected = start() + TimeDelta::hours(180);
        assert!((found - expected).abs() < TimeDelta::seconds(60));
    }
}

#[cfg(test)]
mod longitude_fallback_tests {
    use super::*;

    fn expect_linear_longitude(sky: &mut MockSky) {
        let origin = start();
        // 80 degrees at the start, one degree per day
        sky.expect_solar_ecliptic_longitude().returning(move |instant| {
            let days = (instant - origin).num_milliseconds() as f64 / 86_400_000.0;
            Ok((80.0 + days).rem_euclid(360.0))
        });
    }

    /// Test that a native longitude answer inside the window is used as-is
    #[test]
    fn test_native_longitude_used() {
        let mut sky = MockSky::new();
        let answer = start() + TimeDelta::days(3);
        sky.expect_native_longitude_search()
            .with(eq(90.0), eq(start()))
            .times(1)
            .returning(move |_, _| Ok(Some(answer)));
        sky.expect_solar_ecliptic_longitude().never();

        assert_eq!(next_solar_longitude(&sky, 90.0, start()), Some(answer));
    }

    /// Test that a native longitude answer beyond the window is ignored
    #[test]
    fn test_out_of_horizon_native_longitude_ignored() {
        let mut sky = MockSky::new();
        sky.expect_native_longitude_search()
            .returning(|_, search_start| Ok(Some(search_start + TimeDelta::days(400))));
        expect_linear_longitude(&mut sky);

        let found = next_solar_longitude(&sky, 90.0, start()).unwrap();
        let expected = start() + TimeDelta::days(10);
        assert!((found - expected).abs() < TimeDelta::seconds(60), "{found} vs {expected}");
    }

    /// Test that a failing native longitude search falls back to the cyclic scan
    #[test]
    fn test_unsupported_native_longitude_falls_back() {
        let mut sky = MockSky::new();
        sky.expect_native_longitude_search()
            .returning(|_, _| Err(AstroError::Unsupported("solar longitude search")));
        expect_linear_longitude(&mut sky);

        let found = next_solar_longitude(&sky, 0.0, start()).unwrap();
        let expected = start() + TimeDelta::days(280);
        assert!((found - expected).abs() < TimeDelta::seconds(60), "{found} vs {expected}");
    }

    /// Test that a provider with neither longitude capability yields no season
    #[test]
    fn test_no_longitude_capability_is_absent() {
        let mut sky = MockSky::new();
        sky.expect_native_longitude_search()
            .returning(|_, _| Err(AstroError::Unsupported("solar longitude search")));
        sky.expect_solar_ecliptic_longitude()
            .returning(|_| Err(AstroError::Unsupported("solar ecliptic longitude")));

        assert_eq!(next_solar_longitude(&sky, 270.0, start()), None);
    }
}
