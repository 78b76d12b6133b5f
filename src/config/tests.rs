use std::fs;

use approx::assert_relative_eq;
use tempfile::tempdir;

use super::{ConfigError, InspectorConfig, load_config, save_config};
use crate::model::{Volume, VolumeGeometry};
use crate::navigation::{BoundaryPolicy, KeyCommand, MAX_PAGE_STEP};
use crate::view::Viewport;

#[test]
fn yaml_config_overrides_only_what_it_names() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("inspect.yaml");
    fs::write(
        &path,
        r#"
navigation:
  boundary: wrap
  page_step: 4
  corrections:
    coronal: 90
annotation:
  precision: 1
display:
  window: 400
  viewport:
    width: 640
    height: 480
keys:
  j: next_slice
  k: previous_slice
"#,
    )
    .expect("write config");

    let config = load_config(&path).expect("load yaml");
    assert_eq!(config.navigation.boundary, BoundaryPolicy::Wrap);
    assert_eq!(config.navigator().page_step, 4);
    assert_relative_eq!(config.navigation.corrections.coronal, 90.0);
    assert_relative_eq!(config.navigation.corrections.sagittal, 180.0);
    assert_eq!(config.annotation.off_image, "Off Image");
    assert_eq!(config.annotation.precision, 1);
    assert_eq!(config.display.viewport, Viewport::new(640, 480));

    let bindings = config.key_bindings();
    assert_eq!(bindings.lookup("j"), Some(KeyCommand::NextSlice));
    assert_eq!(bindings.lookup("Up"), Some(KeyCommand::NextSlice));
}

#[test]
fn json_config_round_trips_through_save() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("inspect.json");
    let mut config = InspectorConfig::default();
    config.navigation.boundary = BoundaryPolicy::Reject;
    config.display.level = Some(40.0);
    config.keys.bind("space", KeyCommand::CycleOrientation);

    save_config(&path, &config).expect("save");
    let restored = load_config(&path).expect("load");
    assert_eq!(restored, config);
}

#[test]
fn empty_file_means_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("empty.json");
    fs::write(&path, "{}").expect("write");
    assert_eq!(load_config(&path).expect("load"), InspectorConfig::default());
}

#[test]
fn validation_rejects_nonsense() {
    let mut config = InspectorConfig::default();
    config.navigation.page_step = 0;
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    config.navigation.page_step = usize::MAX;
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    config.navigation.page_step = MAX_PAGE_STEP;
    assert!(config.validate().is_ok());

    let mut config = InspectorConfig::default();
    config.annotation.precision = 12;
    assert!(config.validate().is_err());

    let mut config = InspectorConfig::default();
    config.display.window = Some(-5.0);
    assert!(config.validate().is_err());

    let mut config = InspectorConfig::default();
    config.display.viewport = Viewport::new(0, 10);
    assert!(config.validate().is_err());

    let mut config = InspectorConfig::default();
    config.navigation.corrections.axial = f64::NAN;
    assert!(config.validate().is_err());

    assert!(InspectorConfig::default().validate().is_ok());
}

#[test]
fn unknown_key_commands_fail_to_parse() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("keys.yml");
    fs::write(&path, "keys:\n  x: explode\n").expect("write");
    assert!(matches!(load_config(&path), Err(ConfigError::SerdeYaml(_))));
}

#[test]
fn window_level_falls_back_to_data_range_per_field() {
    let geometry = VolumeGeometry::with_unit_spacing([2, 1, 1]).expect("geometry");
    let volume = Volume::from_vec(geometry, 1, vec![10_u16, 110]).expect("volume");

    let config = InspectorConfig::default();
    let window = config.window_level_for(&volume);
    assert_relative_eq!(window.window, 100.0);
    assert_relative_eq!(window.level, 60.0);

    let mut config = InspectorConfig::default();
    config.display.window = Some(400.0);
    let window = config.window_level_for(&volume);
    assert_relative_eq!(window.window, 400.0);
    assert_relative_eq!(window.level, 60.0);
}
