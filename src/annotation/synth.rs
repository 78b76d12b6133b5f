use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::probe::{PickResult, append_voxel_components};
use crate::view::ViewerState;

use super::{Corner, CornerAnnotation};

pub const WINDOW_PLACEHOLDER: &str = "<window>";
pub const LEVEL_PLACEHOLDER: &str = "<level>";
pub const SLICE_PLACEHOLDER: &str = "<slice>";
pub const SLICE_MAX_PLACEHOLDER: &str = "<slice_max>";

pub const MAX_PRECISION: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationStyle {
    /// Bottom-left text when the pointer is not over the image.
    pub off_image: String,
    /// Top-right template; see the `*_PLACEHOLDER` constants.
    pub top_right: String,
    /// Decimals used for window and level.
    pub precision: usize,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            off_image: "Off Image".to_string(),
            top_right: format!("{WINDOW_PLACEHOLDER}\n{LEVEL_PLACEHOLDER}"),
            precision: 0,
        }
    }
}

static DEFAULT_STYLE: OnceLock<AnnotationStyle> = OnceLock::new();

impl AnnotationStyle {
    pub fn shared_default() -> &'static AnnotationStyle {
        DEFAULT_STYLE.get_or_init(AnnotationStyle::default)
    }
}

pub fn build_annotation(viewer: &ViewerState, pick: PickResult) -> CornerAnnotation {
    build_annotation_with(viewer, pick, AnnotationStyle::shared_default())
}

/// Corner text for `viewer` given the latest pick. Depends on nothing but its inputs.
pub fn build_annotation_with(
    viewer: &ViewerState,
    pick: PickResult,
    style: &AnnotationStyle,
) -> CornerAnnotation {
    let mut annotation = CornerAnnotation::default();
    let value = match pick {
        PickResult::Hit { voxel } => {
            let mut text = format!("({}, {}, {}, ", voxel.i, voxel.j, voxel.k);
            append_voxel_components(&mut text, viewer.volume(), voxel);
            text
        }
        PickResult::Miss => style.off_image.clone(),
    };
    annotation.set(Corner::BottomLeft, value);
    annotation.set(
        Corner::TopRight,
        render_template(&style.top_right, viewer, style.precision),
    );
    annotation
}

/// Substitutes the viewer's window, level and slice into `template`.
pub fn render_template(template: &str, viewer: &ViewerState, precision: usize) -> String {
    let window_level = viewer.window_level();
    template
        .replace(
            WINDOW_PLACEHOLDER,
            &format!("{:.precision$}", window_level.window),
        )
        .replace(
            LEVEL_PLACEHOLDER,
            &format!("{:.precision$}", window_level.level),
        )
        .replace(SLICE_MAX_PLACEHOLDER, &viewer.last_slice().to_string())
        .replace(SLICE_PLACEHOLDER, &viewer.slice().to_string())
}
