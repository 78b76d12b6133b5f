use serde::{Deserialize, Serialize};

use crate::annotation::{AnnotationStyle, MAX_PRECISION};
use crate::model::{Volume, WindowLevel};
use crate::navigation::{
    BoundaryPolicy, DEFAULT_PAGE_STEP, KeyBindings, MAX_PAGE_STEP, SliceNavigator,
};
use crate::view::{CameraCorrections, Viewport};

use super::{ConfigError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationSettings {
    pub boundary: BoundaryPolicy,
    pub page_step: usize,
    pub corrections: CameraCorrections,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            boundary: BoundaryPolicy::default(),
            page_step: DEFAULT_PAGE_STEP,
            corrections: CameraCorrections::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Initial window; the volume's data range is used when absent.
    pub window: Option<f64>,
    pub level: Option<f64>,
    pub viewport: Viewport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    pub navigation: NavigationSettings,
    pub annotation: AnnotationStyle,
    pub display: DisplaySettings,
    /// Extra or replacement key bindings layered over the defaults.
    #[serde(skip_serializing_if = "KeyBindings::is_empty")]
    pub keys: KeyBindings,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            navigation: NavigationSettings::default(),
            annotation: AnnotationStyle::default(),
            display: DisplaySettings::default(),
            keys: KeyBindings::empty(),
        }
    }
}

impl InspectorConfig {
    pub fn validate(&self) -> Result<()> {
        let page_step = self.navigation.page_step;
        if !(1..=MAX_PAGE_STEP).contains(&page_step) {
            return Err(ConfigError::Invalid(format!(
                "navigation.page_step must be between 1 and {MAX_PAGE_STEP}, found {page_step}"
            )));
        }
        let corrections = self.navigation.corrections;
        for (name, roll) in [
            ("sagittal", corrections.sagittal),
            ("coronal", corrections.coronal),
            ("axial", corrections.axial),
        ] {
            if !roll.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "navigation.corrections.{name} must be finite, found {roll}"
                )));
            }
        }
        if self.annotation.precision > MAX_PRECISION {
            return Err(ConfigError::Invalid(format!(
                "annotation.precision must be at most {MAX_PRECISION}, found {}",
                self.annotation.precision
            )));
        }
        if let Some(window) = self.display.window {
            if !window.is_finite() || window <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "display.window must be a positive number, found {window}"
                )));
            }
        }
        if let Some(level) = self.display.level {
            if !level.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "display.level must be finite, found {level}"
                )));
            }
        }
        if self.display.viewport.is_empty() {
            return Err(ConfigError::Invalid(
                "display.viewport must have a non-zero width and height".into(),
            ));
        }
        if let Some((key, _)) = self.keys.iter().find(|(key, _)| key.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "key binding names must not be blank, found `{key}`"
            )));
        }
        Ok(())
    }

    pub fn navigator(&self) -> SliceNavigator {
        SliceNavigator::new(self.navigation.boundary, self.navigation.page_step)
    }

    pub fn key_bindings(&self) -> KeyBindings {
        let mut bindings = KeyBindings::default();
        bindings.merge(&self.keys);
        bindings
    }

    /// Configured window/level, falling back per field to the volume's data range.
    pub fn window_level_for(&self, volume: &Volume) -> WindowLevel {
        let fallback = volume.default_window_level();
        WindowLevel::new(
            self.display.window.unwrap_or(fallback.window),
            self.display.level.unwrap_or(fallback.level),
        )
    }
}
