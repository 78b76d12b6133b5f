use std::fs;
use std::path::Path;

use tracing::info;

use crate::formats::is_yaml;

use super::{InspectorConfig, Result};

pub fn load_config(path: impl AsRef<Path>) -> Result<InspectorConfig> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let config = if is_yaml(path) {
        serde_yaml::from_str::<InspectorConfig>(&raw)?
    } else {
        serde_json::from_str::<InspectorConfig>(&raw)?
    };
    config.validate()?;
    info!(path = %path.display(), "loaded inspector configuration");
    Ok(config)
}

pub fn save_config(path: impl AsRef<Path>, config: &InspectorConfig) -> Result<()> {
    let path = path.as_ref();
    let serialized = if is_yaml(path) {
        serde_yaml::to_string(config)?
    } else {
        serde_json::to_string_pretty(config)?
    };
    fs::write(path, serialized)?;
    Ok(())
}
