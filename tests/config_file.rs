//! Loading configuration from disk.

use std::io::Write;

use lenia_sim::{
    compute::Propagator,
    schema::{ConfigError, Seed, SimulationConfig},
};

#[test]
fn test_load_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let config = SimulationConfig {
        width: 48,
        height: 40,
        kernel_radius: 8.0,
        ..SimulationConfig::default()
    };
    write!(file, "{}", serde_json::to_string_pretty(&config).unwrap()).unwrap();

    let loaded = SimulationConfig::from_json_file(file.path()).unwrap();
    assert_eq!(loaded, config);

    let propagator = Propagator::new(loaded, Seed::default()).unwrap();
    assert_eq!(propagator.dimensions(), (48, 40));
    assert_eq!(propagator.kernel().radius(), 8.0);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = SimulationConfig::from_json_file(dir.path().join("missing.json"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_invalid_sigma_in_file_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"width": 32, "height": 32, "dt": 0.1, "kernel_radius": 13.0, "mu": 0.15, "sigma": 0.0}}"#
    )
    .unwrap();

    let result = SimulationConfig::from_json_file(file.path());
    assert!(matches!(result, Err(ConfigError::InvalidSigma)));
}
