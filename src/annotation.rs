mod corner;
mod synth;

#[cfg(test)]
mod tests;

pub use corner::{Corner, CornerAnnotation, CornerOverlay, OverlaySink};
pub use synth::{
    AnnotationStyle, LEVEL_PLACEHOLDER, MAX_PRECISION, SLICE_MAX_PLACEHOLDER, SLICE_PLACEHOLDER,
    WINDOW_PLACEHOLDER, build_annotation, build_annotation_with, render_template,
};
