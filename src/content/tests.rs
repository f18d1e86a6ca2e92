//! Content domain: tests for movement config loading and validation.

use std::path::Path;

use super::{
    DATA_DIR, MOVEMENT_CONFIG_FILE, load_config_or_default, load_movement_config, parse_single,
    validate_movement_config,
};
use crate::movement::{GameLayer, MovementConfig};

fn data_dir() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(DATA_DIR)
}

// -----------------------------------------------------------------------------
// Loading tests
// -----------------------------------------------------------------------------

#[test]
fn test_shipped_config_loads_and_validates() {
    let config = load_movement_config(&data_dir()).expect("movement.ron should parse");
    let errors = validate_movement_config(&config);
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    assert_eq!(config.jump_force, MovementConfig::default().jump_force);
}

#[test]
fn test_partial_config_keeps_defaults() {
    let config: MovementConfig =
        parse_single("(walk_speed: 400.0, wall_layer: Wall)", MOVEMENT_CONFIG_FILE)
            .expect("partial config should parse");

    assert_eq!(config.walk_speed, 400.0);
    assert_eq!(config.wall_layer, GameLayer::Wall);
    assert_eq!(config.dash_speed, MovementConfig::default().dash_speed);
}

#[test]
fn test_parse_error_names_file() {
    let err = parse_single::<MovementConfig>("(walk_speed: fast)", MOVEMENT_CONFIG_FILE)
        .expect_err("bad value should fail");
    assert_eq!(err.file, MOVEMENT_CONFIG_FILE);
    assert!(err.message.starts_with("Parse error"));
}

#[test]
fn test_missing_file_reports_io_error() {
    let err = load_movement_config(Path::new("/nonexistent/data")).expect_err("no such file");
    assert!(err.message.starts_with("IO error"));
    assert!(err.to_string().contains(MOVEMENT_CONFIG_FILE));
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let config = load_config_or_default(Path::new("/nonexistent/data"));
    assert_eq!(config.walk_speed, MovementConfig::default().walk_speed);
}

// -----------------------------------------------------------------------------
// Validation tests
// -----------------------------------------------------------------------------

#[test]
fn test_default_config_is_valid() {
    assert!(validate_movement_config(&MovementConfig::default()).is_empty());
}

#[test]
fn test_validation_flags_bad_values() {
    let config = MovementConfig {
        walk_speed: -1.0,
        min_walking_penalty: 1.5,
        low_health_threshold: 20,
        ..MovementConfig::default()
    };

    let fields: Vec<&str> = validate_movement_config(&config)
        .iter()
        .map(|e| e.field)
        .collect();
    assert_eq!(
        fields,
        vec!["walk_speed", "min_walking_penalty", "low_health_threshold"]
    );
}

#[test]
fn test_validation_requires_distinct_probe_layers() {
    let config = MovementConfig {
        wall_layer: GameLayer::Ground,
        ..MovementConfig::default()
    };

    let errors = validate_movement_config(&config);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "wall_layer");
    assert!(errors[0].to_string().contains("ground_layer"));
}
