//! Built-in low-precision analytic ephemeris.
//!
//! Sun: mean elements plus equation of center, with aberration and the
//! dominant nutation term (Meeus, *Astronomical Algorithms*, ch. 25).
//! Moon: the principal periodic terms of the ELP-2000/82 series as tabulated
//! in Meeus ch. 47, with topocentric parallax from ch. 40.
//!
//! Accuracy is around 0.01 degrees for the Sun and a few hundredths of a
//! degree for the Moon, which puts event times within a minute or two. Time
//! arguments are taken as UT; the difference to dynamical time is ignored.
//!
//! The provider offers no native searches. Rise/set, phase and longitude
//! events all come from the crossing engine.

use super::angle::normalize_degrees;
use super::error::AstroError;
use super::provider::EphemerisProvider;
use super::types::{Body, EquatorialCoordinate, HorizontalCoordinate, Instant, Observer};

/// Julian Date of the Unix epoch.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const J2000_JD: f64 = 2_451_545.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

const AU_KM: f64 = 149_597_870.7;
const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6_378.14;
const EARTH_EQUATORIAL_RADIUS_M: f64 = 6_378_140.0;
/// Polar to equatorial radius ratio, b/a.
const EARTH_AXIS_RATIO: f64 = 0.996_647_19;

/// Julian Date (UT) of an instant.
pub fn julian_day(instant: Instant) -> f64 {
    instant.timestamp_millis() as f64 / MILLIS_PER_DAY + UNIX_EPOCH_JD
}

/// Julian centuries since J2000.0.
fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Greenwich mean sidereal time in degrees, [0, 360).
pub fn greenwich_mean_sidereal_time(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * (jd - J2000_JD) + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

fn sin_deg(deg: f64) -> f64 {
    deg.to_radians().sin()
}

fn cos_deg(deg: f64) -> f64 {
    deg.to_radians().cos()
}

/// Longitude of the Moon's mean ascending node, degrees.
fn lunar_node_longitude(t: f64) -> f64 {
    125.04 - 1934.136 * t
}

/// Nutation in longitude, dominant term only, degrees.
fn nutation_in_longitude(t: f64) -> f64 {
    -0.004_78 * sin_deg(lunar_node_longitude(t))
}

/// True obliquity of the ecliptic, degrees.
fn obliquity(t: f64) -> f64 {
    23.439_291 - 0.013_004_2 * t + 0.002_56 * cos_deg(lunar_node_longitude(t))
}

/// Apparent geocentric ecliptic position.
#[derive(Debug, Clone, Copy, PartialEq)]
struct EclipticPosition {
    longitude: f64,
    latitude: f64,
    distance_km: f64,
}

fn sun_position(t: f64) -> EclipticPosition {
    let mean_longitude = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let mean_anomaly = 357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t;
    let eccentricity = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;

    let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * sin_deg(mean_anomaly)
        + (0.019_993 - 0.000_101 * t) * sin_deg(2.0 * mean_anomaly)
        + 0.000_289 * sin_deg(3.0 * mean_anomaly);

    let true_longitude = mean_longitude + center;
    let true_anomaly = mean_anomaly + center;
    let radius_au = 1.000_001_018 * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * cos_deg(true_anomaly));

    // Aberration (-20.5") and nutation.
    let apparent_longitude = true_longitude - 0.005_69 + nutation_in_longitude(t);

    EclipticPosition {
        longitude: normalize_degrees(apparent_longitude),
        latitude: 0.0,
        distance_km: radius_au * AU_KM,
    }
}

// Longitude and distance terms: [D, M, M', F, Σl (1e-6 deg), Σr (1e-3 km)]
#[rustfmt::skip]
static MOON_LONGITUDE_DISTANCE_TERMS: [[f64; 6]; 60] = [
    [0.0,  0.0,  1.0,  0.0,  6_288_774.0, -20_905_355.0],
    [2.0,  0.0, -1.0,  0.0,  1_274_027.0,  -3_699_111.0],
    [2.0,  0.0,  0.0,  0.0,    658_314.0,  -2_955_968.0],
    [0.0,  0.0,  2.0,  0.0,    213_618.0,    -569_925.0],
    [0.0,  1.0,  0.0,  0.0,   -185_116.0,      48_888.0],
    [0.0,  0.0,  0.0,  2.0,   -114_332.0,      -3_149.0],
    [2.0,  0.0, -2.0,  0.0,     58_793.0,     246_158.0],
    [2.0, -1.0, -1.0,  0.0,     57_066.0,    -152_138.0],
    [2.0,  0.0,  1.0,  0.0,     53_322.0,    -170_733.0],
    [2.0, -1.0,  0.0,  0.0,     45_758.0,    -204_586.0],
    [0.0,  1.0, -1.0,  0.0,    -40_923.0,    -129_620.0],
    [1.0,  0.0,  0.0,  0.0,    -34_720.0,     108_743.0],
    [0.0,  1.0,  1.0,  0.0,    -30_383.0,     104_755.0],
    [2.0,  0.0,  0.0, -2.0,     15_327.0,      10_321.0],
    [0.0,  0.0,  1.0,  2.0,    -12_528.0,           0.0],
    [0.0,  0.0,  1.0, -2.0,     10_980.0,      79_661.0],
    [4.0,  0.0, -1.0,  0.0,     10_675.0,     -34_782.0],
    [0.0,  0.0,  3.0,  0.0,     10_034.0,     -23_210.0],
    [4.0,  0.0, -2.0,  0.0,      8_548.0,     -21_636.0],
    [2.0,  1.0, -1.0,  0.0,     -7_888.0,      24_208.0],
    [2.0,  1.0,  0.0,  0.0,     -6_766.0,      30_824.0],
    [1.0,  0.0, -1.0,  0.0,     -5_163.0,      -8_379.0],
    [1.0,  1.0,  0.0,  0.0,      4_987.0,     -16_675.0],
    [2.0, -1.0,  1.0,  0.0,      4_036.0,     -12_831.0],
    [2.0,  0.0,  2.0,  0.0,      3_994.0,     -10_445.0],
    [4.0,  0.0,  0.0,  0.0,      3_861.0,     -11_650.0],
    [2.0,  0.0, -3.0,  0.0,      3_665.0,      14_403.0],
    [0.0,  1.0, -2.0,  0.0,     -2_689.0,      -7_003.0],
    [2.0,  0.0, -1.0,  2.0,     -2_602.0,           0.0],
    [2.0, -1.0, -2.0,  0.0,      2_390.0,      10_056.0],
    [1.0,  0.0,  1.0,  0.0,     -2_348.0,       6_322.0],
    [2.0, -2.0,  0.0,  0.0,      2_236.0,      -9_884.0],
    [0.0,  1.0,  2.0,  0.0,     -2_120.0,       5_751.0],
    [0.0,  2.0,  0.0,  0.0,     -2_069.0,           0.0],
    [2.0, -2.0, -1.0,  0.0,      2_048.0,      -4_950.0],
    [2.0,  0.0,  1.0, -2.0,     -1_773.0,       4_130.0],
    [2.0,  0.0,  0.0,  2.0,     -1_595.0,           0.0],
    [4.0, -1.0, -1.0,  0.0,      1_215.0,      -3_958.0],
    [0.0,  0.0,  2.0,  2.0,     -1_110.0,           0.0],
    [3.0,  0.0, -1.0,  0.0,       -892.0,       3_258.0],
    [2.0,  1.0,  1.0,  0.0,       -810.0,       2_616.0],
    [4.0, -1.0, -2.0,  0.0,        759.0,      -1_897.0],
    [0.0,  2.0, -1.0,  0.0,       -713.0,      -2_117.0],
    [2.0,  2.0, -1.0,  0.0,       -700.0,       2_354.0],
    [2.0,  1.0, -2.0,  0.0,        691.0,           0.0],
    [2.0, -1.0,  0.0, -2.0,        596.0,           0.0],
    [4.0,  0.0,  1.0,  0.0,        549.0,      -1_423.0],
    [0.0,  0.0,  4.0,  0.0,        537.0,      -1_117.0],
    [4.0, -1.0,  0.0,  0.0,        520.0,      -1_571.0],
    [1.0,  0.0, -2.0,  0.0,       -487.0,      -1_739.0],
    [2.0,  1.0,  0.0, -2.0,       -399.0,           0.0],
    [0.0,  0.0,  2.0, -2.0,       -381.0,      -4_421.0],
    [1.0,  1.0,  1.0,  0.0,        351.0,           0.0],
    [3.0,  0.0, -2.0,  0.0,       -340.0,           0.0],
    [4.0,  0.0, -3.0,  0.0,        330.0,           0.0],
    [2.0, -1.0,  2.0,  0.0,        327.0,           0.0],
    [0.0,  2.0,  1.0,  0.0,       -323.0,       1_165.0],
    [1.0,  1.0, -1.0,  0.0,        299.0,           0.0],
    [2.0,  0.0,  3.0,  0.0,        294.0,           0.0],
    [2.0,  0.0, -1.0, -2.0,          0.0,       8_752.0],
];

// Latitude terms: [D, M, M', F, Σb (1e-6 deg)]
#[rustfmt::skip]
static MOON_LATITUDE_TERMS: [[f64; 5]; 30] = [
    [0.0,  0.0,  0.0,  1.0,  5_128_122.0],
    [0.0,  0.0,  1.0,  1.0,    280_602.0],
    [0.0,  0.0,  1.0, -1.0,    277_693.0],
    [2.0,  0.0,  0.0, -1.0,    173_237.0],
    [2.0,  0.0, -1.0,  1.0,     55_413.0],
    [2.0,  0.0, -1.0, -1.0,     46_271.0],
    [2.0,  0.0,  0.0,  1.0,     32_573.0],
    [0.0,  0.0,  2.0,  1.0,     17_198.0],
    [2.0,  0.0,  1.0, -1.0,      9_266.0],
    [0.0,  0.0,  2.0, -1.0,      8_822.0],
    [2.0, -1.0,  0.0, -1.0,      8_216.0],
    [2.0,  0.0, -2.0, -1.0,      4_324.0],
    [2.0,  0.0,  1.0,  1.0,      4_200.0],
    [2.0,  1.0,  0.0, -1.0,     -3_359.0],
    [2.0, -1.0, -1.0,  1.0,      2_463.0],
    [2.0, -1.0,  0.0,  1.0,      2_211.0],
    [2.0, -1.0, -1.0, -1.0,      2_065.0],
    [0.0,  1.0, -1.0, -1.0,     -1_870.0],
    [4.0,  0.0, -1.0, -1.0,      1_828.0],
    [0.0,  1.0,  0.0,  1.0,     -1_794.0],
    [0.0,  0.0,  0.0,  3.0,     -1_749.0],
    [0.0,  1.0, -1.0,  1.0,     -1_565.0],
    [1.0,  0.0,  0.0,  1.0,     -1_491.0],
    [0.0,  1.0,  1.0,  1.0,     -1_475.0],
    [0.0,  1.0,  1.0, -1.0,     -1_410.0],
    [0.0,  1.0,  0.0, -1.0,     -1_344.0],
    [1.0,  0.0,  0.0, -1.0,     -1_335.0],
    [0.0,  0.0,  3.0,  1.0,      1_107.0],
    [4.0,  0.0,  0.0, -1.0,      1_021.0],
    [4.0,  0.0, -1.0,  1.0,        833.0],
];

fn moon_position(t: f64) -> EclipticPosition {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let mean_longitude =
        218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
            - t4 / 65_194_000.0;
    let elongation = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let sun_anomaly = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let moon_anomaly = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let latitude_argument = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2
        - t3 / 3_526_000.0
        + t4 / 863_310_000.0;

    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479_264.290 * t;
    let a3 = 313.45 + 481_266.484 * t;
    // Decreasing eccentricity of the Earth's orbit scales the solar-anomaly terms.
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;

    let argument = |d: f64, m: f64, mp: f64, f: f64| {
        d * elongation + m * sun_anomaly + mp * moon_anomaly + f * latitude_argument
    };
    let eccentricity_factor = |m: f64| e.powi(m.abs() as i32);

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for &[d, m, mp, f, l, r] in &MOON_LONGITUDE_DISTANCE_TERMS {
        let angle = argument(d, m, mp, f);
        let factor = eccentricity_factor(m);
        sum_l += l * factor * sin_deg(angle);
        sum_r += r * factor * cos_deg(angle);
    }

    let mut sum_b = 0.0;
    for &[d, m, mp, f, b] in &MOON_LATITUDE_TERMS {
        sum_b += b * eccentricity_factor(m) * sin_deg(argument(d, m, mp, f));
    }

    // Venus, Jupiter and Earth flattening.
    sum_l += 3958.0 * sin_deg(a1)
        + 1962.0 * sin_deg(mean_longitude - latitude_argument)
        + 318.0 * sin_deg(a2);
    sum_b += -2235.0 * sin_deg(mean_longitude)
        + 382.0 * sin_deg(a3)
        + 175.0 * sin_deg(a1 - latitude_argument)
        + 175.0 * sin_deg(a1 + latitude_argument)
        + 127.0 * sin_deg(mean_longitude - moon_anomaly)
        - 115.0 * sin_deg(mean_longitude + moon_anomaly);

    EclipticPosition {
        longitude: normalize_degrees(
            mean_longitude + sum_l / 1_000_000.0 + nutation_in_longitude(t),
        ),
        latitude: sum_b / 1_000_000.0,
        distance_km: 385_000.56 + sum_r / 1000.0,
    }
}

fn ecliptic_to_equatorial(position: EclipticPosition, obliquity_deg: f64) -> EquatorialCoordinate {
    let (sin_l, cos_l) = position.longitude.to_radians().sin_cos();
    let (sin_b, cos_b) = position.latitude.to_radians().sin_cos();
    let (sin_e, cos_e) = obliquity_deg.to_radians().sin_cos();

    let right_ascension = (sin_l * cos_e - (sin_b / cos_b) * sin_e).atan2(cos_l);
    let declination = (sin_b * cos_e + cos_b * sin_e * sin_l).asin();

    EquatorialCoordinate {
        right_ascension: normalize_degrees(right_ascension.to_degrees()),
        declination: declination.to_degrees(),
        distance_km: position.distance_km,
    }
}

/// Shift a geocentric position to the observer's location on the geoid.
fn topocentric(
    geocentric: EquatorialCoordinate,
    observer: &Observer,
    local_sidereal_time: f64,
) -> EquatorialCoordinate {
    let latitude = observer.latitude_rad();
    let height_ratio = observer.elevation_meters / EARTH_EQUATORIAL_RADIUS_M;
    let u = (EARTH_AXIS_RATIO * latitude.tan()).atan();
    let rho_sin = EARTH_AXIS_RATIO * u.sin() + height_ratio * latitude.sin();
    let rho_cos = u.cos() + height_ratio * latitude.cos();

    let sin_parallax = EARTH_EQUATORIAL_RADIUS_KM / geocentric.distance_km;
    let hour_angle = (local_sidereal_time - geocentric.right_ascension).to_radians();
    let declination = geocentric.declination.to_radians();

    let denominator = declination.cos() - rho_cos * sin_parallax * hour_angle.cos();
    let delta_ra = (-rho_cos * sin_parallax * hour_angle.sin()).atan2(denominator);
    let topocentric_dec =
        ((declination.sin() - rho_sin * sin_parallax) * delta_ra.cos()).atan2(denominator);

    EquatorialCoordinate {
        right_ascension: normalize_degrees(geocentric.right_ascension + delta_ra.to_degrees()),
        declination: topocentric_dec.to_degrees(),
        distance_km: geocentric.distance_km,
    }
}

/// Atmospheric refraction in degrees for a geometric altitude (Saemundsson).
///
/// Below one degree under the horizon the correction is held at its -1
/// degree value and tapered linearly to zero at the nadir.
pub fn refraction(geometric_altitude: f64) -> f64 {
    let h = geometric_altitude.max(-1.0);
    let arcminutes = 1.02 / (h + 10.3 / (h + 5.11)).to_radians().tan();
    let degrees = arcminutes / 60.0;
    if geometric_altitude < -1.0 {
        degrees * (geometric_altitude + 90.0) / 89.0
    } else {
        degrees
    }
}

/// Analytic Sun and Moon ephemeris. Stateless; every call is a pure
/// function of its arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }

    fn ecliptic(body: Body, t: f64) -> EclipticPosition {
        match body {
            Body::Sun => sun_position(t),
            Body::Moon => moon_position(t),
        }
    }
}

fn finite_or(value: f64, what: &'static str) -> Result<f64, AstroError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AstroError::NonFinite(what))
    }
}

impl EphemerisProvider for AnalyticEphemeris {
    fn equatorial_position(
        &self,
        body: Body,
        instant: Instant,
        observer: &Observer,
    ) -> Result<EquatorialCoordinate, AstroError> {
        let jd = julian_day(instant);
        let t = centuries_since_j2000(jd);
        let geocentric = ecliptic_to_equatorial(Self::ecliptic(body, t), obliquity(t));
        let local_sidereal_time = greenwich_mean_sidereal_time(jd) + observer.longitude;
        let position = topocentric(geocentric, observer, local_sidereal_time);

        finite_or(position.right_ascension, "right ascension")?;
        finite_or(position.declination, "declination")?;
        Ok(position)
    }

    fn horizontal(
        &self,
        instant: Instant,
        observer: &Observer,
        equatorial: EquatorialCoordinate,
        apply_refraction: bool,
    ) -> Result<HorizontalCoordinate, AstroError> {
        let local_sidereal_time =
            greenwich_mean_sidereal_time(julian_day(instant)) + observer.longitude;
        let hour_angle = (local_sidereal_time - equatorial.right_ascension).to_radians();
        let (sin_h, cos_h) = hour_angle.sin_cos();
        let (sin_d, cos_d) = equatorial.declination.to_radians().sin_cos();
        let (sin_p, cos_p) = observer.latitude_rad().sin_cos();

        let altitude = (sin_p * sin_d + cos_p * cos_d * cos_h)
            .clamp(-1.0, 1.0)
            .asin()
            .to_degrees();
        let azimuth = (-cos_d * sin_h)
            .atan2(sin_d * cos_p - cos_d * cos_h * sin_p)
            .to_degrees();

        let altitude = if apply_refraction {
            altitude + refraction(altitude)
        } else {
            altitude
        };

        Ok(HorizontalCoordinate {
            altitude: finite_or(altitude, "altitude")?,
            azimuth: normalize_degrees(finite_or(azimuth, "azimuth")?),
        })
    }

    fn lunar_phase_angle(&self, instant: Instant) -> Result<f64, AstroError> {
        let t = centuries_since_j2000(julian_day(instant));
        let phase = normalize_degrees(moon_position(t).longitude - sun_position(t).longitude);
        finite_or(phase, "lunar phase angle")
    }

    fn solar_ecliptic_longitude(&self, instant: Instant) -> Result<f64, AstroError> {
        let t = centuries_since_j2000(julian_day(instant));
        finite_or(sun_position(t).longitude, "solar ecliptic longitude")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn julian_day_epochs() {
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((julian_day(j2000) - J2000_JD).abs() < 1e-9);
        let unix = Utc.timestamp_opt(0, 0).unwrap();
        assert_eq!(julian_day(unix), UNIX_EPOCH_JD);
    }

    #[test]
    fn sidereal_time_reference_value() {
        // Meeus example 12.a: 1987 April 10, 0h UT -> 13h10m46.3668s.
        let gmst = greenwich_mean_sidereal_time(2_446_895.5);
        assert!((gmst - 197.693_195).abs() < 1e-4, "{gmst}");
    }

    #[test]
    fn sun_reference_position() {
        // Meeus example 25.a: 1992 October 13.0 TD.
        let t = centuries_since_j2000(2_448_908.5);
        let sun = sun_position(t);
        assert!((sun.longitude - 199.908_95).abs() < 0.001, "{}", sun.longitude);
        let equatorial = ecliptic_to_equatorial(sun, obliquity(t));
        assert!((equatorial.right_ascension - 198.380_83).abs() < 0.01);
        assert!((equatorial.declination + 7.785_07).abs() < 0.01);
        assert!((sun.distance_km / AU_KM - 0.997_66).abs() < 1e-4);
    }

    #[test]
    fn moon_reference_position() {
        // Meeus example 47.a: 1992 April 12.0 TD.
        let t = centuries_since_j2000(2_448_724.5);
        let moon = moon_position(t);
        assert!((moon.longitude - 133.167).abs() < 0.01, "{}", moon.longitude);
        assert!((moon.latitude + 3.229).abs() < 0.01, "{}", moon.latitude);
        assert!((moon.distance_km - 368_409.7).abs() < 50.0, "{}", moon.distance_km);
    }

    #[test]
    fn refraction_near_horizon() {
        // About 29 arcminutes at the geometric horizon.
        let at_horizon = refraction(0.0) * 60.0;
        assert!((28.0..=30.0).contains(&at_horizon), "{at_horizon}");
        assert!(refraction(45.0) * 60.0 < 1.1);
        assert!(refraction(-90.0).abs() < 1e-12);
        assert!(refraction(-30.0) < refraction(-1.0));
    }

    #[test]
    fn horizontal_coordinates_are_in_range() {
        let ephemeris = AnalyticEphemeris::new();
        let observer = Observer::new(40.7128, -74.006, 10.0).unwrap();
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        for hour in 0..48 {
            let instant = start + chrono::TimeDelta::hours(hour);
            for body in [Body::Sun, Body::Moon] {
                let position = ephemeris
                    .body_horizontal(body, instant, &observer, true)
                    .unwrap();
                assert!((-90.0..=90.5).contains(&position.altitude));
                assert!((0.0..360.0).contains(&position.azimuth));
            }
        }
    }

    #[test]
    fn sun_transits_near_south_at_noon() {
        let ephemeris = AnalyticEphemeris::new();
        // Greenwich, local solar noon around 12:00 UT.
        let observer = Observer::new(51.4779, 0.0, 0.0).unwrap();
        let noon = Utc.with_ymd_and_hms(2024, 6, 13, 12, 0, 0).unwrap();
        let sun = ephemeris
            .body_horizontal(Body::Sun, noon, &observer, false)
            .unwrap();
        assert!((sun.azimuth - 180.0).abs() < 2.0, "{}", sun.azimuth);
        // 90 - 51.48 + 23.2
        assert!((sun.altitude - 61.8).abs() < 0.5, "{}", sun.altitude);
    }

    #[test]
    fn phase_angle_near_known_new_moon() {
        let ephemeris = AnalyticEphemeris::new();
        let new_moon = Utc.with_ymd_and_hms(2024, 1, 11, 11, 57, 0).unwrap();
        let phase = ephemeris.lunar_phase_angle(new_moon).unwrap();
        let distance = phase.min(360.0 - phase);
        assert!(distance < 0.5, "{phase}");
    }

    #[test]
    fn native_searches_are_not_offered() {
        let ephemeris = AnalyticEphemeris::new();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(ephemeris.native_phase_search(0.0, now).is_err());
        assert!(ephemeris.native_longitude_search(90.0, now).is_err());
    }
}
