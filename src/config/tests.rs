use super::validation::validate_config;
use super::*;
use crate::constants::test_constants::*;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

fn create_test_config(latitude: Option<f64>, longitude: Option<f64>) -> Config {
    Config {
        latitude,
        longitude,
        elevation: Some(TEST_NYC_ELEVATION),
        city: Some("New York".to_string()),
        use_24_hour: Some(false),
        timezone: Some(TEST_TIMEZONE.to_string()),
        refresh_interval: Some(DEFAULT_REFRESH_INTERVAL),
    }
}

fn with_config_home<F: FnOnce(&std::path::Path)>(f: F) {
    let temp_dir = tempdir().unwrap();
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    f(temp_dir.path());

    unsafe {
        match original {
            Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }
}

#[test]
fn test_valid_config_passes() {
    let config = create_test_config(Some(TEST_NYC_LATITUDE), Some(TEST_NYC_LONGITUDE));
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_coordinate_bounds() {
    assert!(validate_config(&create_test_config(Some(90.0), Some(180.0))).is_ok());
    assert!(validate_config(&create_test_config(Some(-90.0), Some(-180.0))).is_ok());
    assert!(validate_config(&create_test_config(Some(90.1), Some(0.0))).is_err());
    assert!(validate_config(&create_test_config(Some(0.0), Some(-180.5))).is_err());
    assert!(validate_config(&create_test_config(Some(f64::NAN), Some(0.0))).is_err());
}

#[test]
fn test_half_specified_location_rejected() {
    let err = validate_config(&create_test_config(Some(10.0), None)).unwrap_err();
    assert!(err.to_string().contains("longitude is missing"));
    assert!(validate_config(&create_test_config(None, Some(10.0))).is_err());
    assert!(validate_config(&create_test_config(None, None)).is_ok());
}

#[test]
fn test_elevation_floor() {
    let mut config = create_test_config(Some(0.0), Some(0.0));
    config.elevation = Some(MINIMUM_ELEVATION);
    assert!(validate_config(&config).is_ok());
    config.elevation = Some(MINIMUM_ELEVATION - 1.0);
    assert!(validate_config(&config).is_err());
}

#[test]
fn test_refresh_interval_bounds() {
    let mut config = create_test_config(Some(0.0), Some(0.0));
    config.refresh_interval = Some(MAXIMUM_REFRESH_INTERVAL);
    assert!(validate_config(&config).is_ok());
    config.refresh_interval = Some(0);
    assert!(validate_config(&config).is_err());
    config.refresh_interval = Some(MAXIMUM_REFRESH_INTERVAL + 1);
    assert!(validate_config(&config).is_err());
}

#[test]
fn test_unknown_timezone_rejected() {
    let mut config = create_test_config(Some(0.0), Some(0.0));
    config.timezone = Some("Mars/Olympus_Mons".to_string());
    assert!(validate_config(&config).is_err());
    assert!(config.timezone().is_err());
}

#[test]
fn test_defaults_for_missing_fields() {
    let config = Config::default();
    assert!(!config.use_24_hour());
    assert_eq!(config.refresh_interval().as_secs(), DEFAULT_REFRESH_INTERVAL);
    assert_eq!(config.timezone().unwrap(), None);
    assert_eq!(config.location_label(), "Unknown location");
}

#[test]
fn test_observer_from_config() {
    let config = create_test_config(Some(TEST_NYC_LATITUDE), Some(TEST_NYC_LONGITUDE));
    let observer = config.observer().unwrap();
    assert_eq!(observer.latitude, TEST_NYC_LATITUDE);
    assert_eq!(observer.longitude, TEST_NYC_LONGITUDE);
    assert_eq!(observer.elevation_meters, TEST_NYC_ELEVATION);
}

#[test]
#[serial]
fn test_observer_without_location_explains_fix() {
    with_config_home(|_| {
        let err = Config::default().observer().unwrap_err().to_string();
        assert!(err.contains("--lat"));
        assert!(err.contains(CONFIG_FILE_NAME));
    });
}

#[test]
fn test_overrides_take_precedence() {
    let mut config = create_test_config(Some(TEST_NYC_LATITUDE), Some(TEST_NYC_LONGITUDE));
    config
        .apply_overrides(CoordinateOverrides {
            latitude: Some(51.5074),
            longitude: Some(-0.1278),
            elevation: None,
        })
        .unwrap();
    assert_eq!(config.latitude, Some(51.5074));
    assert_eq!(config.longitude, Some(-0.1278));
    assert_eq!(config.elevation, Some(TEST_NYC_ELEVATION));

    let invalid = CoordinateOverrides {
        latitude: Some(123.0),
        ..Default::default()
    };
    assert!(config.apply_overrides(invalid).is_err());
}

#[test]
fn test_location_label_prefers_city() {
    let mut config = create_test_config(Some(TEST_NYC_LATITUDE), Some(TEST_NYC_LONGITUDE));
    assert_eq!(config.location_label(), "New York");
    config.city = Some("   ".to_string());
    assert_eq!(config.location_label(), "40.7128°, -74.0060°");
}

#[test]
#[serial]
fn test_load_missing_file_returns_empty_config() {
    with_config_home(|_| {
        let config = load().unwrap();
        assert_eq!(config, Config::default());
    });
}

#[test]
#[serial]
fn test_load_from_xdg_config_home() {
    with_config_home(|home| {
        let dir = home.join(CONFIG_DIR_NAME);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(CONFIG_FILE_NAME),
            r#"
latitude = 51.5074
longitude = -0.1278
city = "London"
timezone = "Europe/London"
use_24_hour = true
refresh_interval = 5
"#,
        )
        .unwrap();

        let config = load().unwrap();
        assert_eq!(config.city.as_deref(), Some("London"));
        assert!(config.use_24_hour());
        assert_eq!(config.refresh_interval().as_secs(), 5);
        assert_eq!(config.timezone().unwrap(), Some(chrono_tz::Europe::London));
        assert_eq!(config.elevation, None);
        assert_eq!(config.observer().unwrap().elevation_meters, DEFAULT_ELEVATION);
    });
}

#[test]
fn test_load_from_path_reports_invalid_values() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "latitude = 95.0\nlongitude = 0.0\n").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(format!("{err:#}").contains("latitude must be between"));
}

#[test]
fn test_load_from_path_reports_parse_errors() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "latitude = \"north\"\n").unwrap();
    assert!(load_from_path(&path).is_err());

    assert!(load_from_path(&temp_dir.path().join("absent.toml")).is_err());
}
