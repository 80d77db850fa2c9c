//! Config loading tests.
//!
//! Full file round through `load_config()`: section defaults, tolerance
//! bands, bounds validation and unknown-field rejection.

use frp_common::config::{ConfigError, LogLevel, load_config};
use frp_common::scan::config::ToleranceBand;
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("frp.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_full_config_loads() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[shared]
log_level = "debug"
service_name = "frp-line-2"

[sampling]
samples_per_rev = 72
wrap_hysteresis_deg = 2.5
axial_spacing_mm = 50.0

[tolerances]
outer_diameter_avg = { min = 151.5, max = 152.5 }
roundness_outer = { max = 0.5 }
length = { min = 100.0 }
"#,
    );

    let config = load_config(&path).unwrap();
    assert_eq!(config.shared.log_level, LogLevel::Debug);
    assert_eq!(config.shared.service_name, "frp-line-2");
    assert_eq!(config.sampling.samples_per_rev, 72);
    assert_eq!(config.sampling.wrap_hysteresis_deg, 2.5);
    assert_eq!(config.sampling.axial_spacing_mm, Some(50.0));
    assert_eq!(
        config.tolerances.outer_diameter_avg,
        ToleranceBand::between(151.5, 152.5)
    );
    assert_eq!(config.tolerances.roundness_outer, ToleranceBand::at_most(0.5));
    assert_eq!(config.tolerances.length.min, Some(100.0));
    assert_eq!(config.tolerances.straightness, ToleranceBand::UNBOUNDED);
}

#[test]
fn test_partial_sampling_section_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[sampling]\nsamples_per_rev = 90\n");

    let config = load_config(&path).unwrap();
    assert_eq!(config.sampling.samples_per_rev, 90);
    assert_eq!(config.sampling.wrap_hysteresis_deg, 1.0);
    assert!(config.sampling.axial_spacing_mm.is_none());
}

#[test]
fn test_negative_spacing_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[sampling]\naxial_spacing_mm = -5.0\n");

    let result = load_config(&path);
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_inverted_band_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[tolerances]\nconcentricity = { min = 1.0, max = 0.5 }\n");

    let result = load_config(&path);
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_unknown_tolerance_field_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[tolerances]\nwall_thickness = { max = 1.0 }\n");

    let result = load_config(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = load_config(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound)));
}
