use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::{SliceOrientation, Volume, WindowLevel};

use super::{Camera, CameraCorrections, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewerId(pub u32);

impl fmt::Display for ViewerId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "viewer-{}", self.0)
    }
}

/// Everything one 2-D slice view needs: which plane it cuts, where, with what contrast,
/// and the camera looking at it.
#[derive(Debug, Clone)]
pub struct ViewerState {
    id: ViewerId,
    volume: Arc<Volume>,
    orientation: SliceOrientation,
    slice: usize,
    window_level: WindowLevel,
    camera: Camera,
    viewport: Viewport,
    corrections: CameraCorrections,
}

impl ViewerState {
    /// Viewer at the middle slice of `orientation`, default viewport and roll table, and a
    /// window spanning the volume's data range.
    pub fn new(id: ViewerId, volume: Arc<Volume>, orientation: SliceOrientation) -> Self {
        let viewport = Viewport::default();
        let corrections = CameraCorrections::default();
        let window_level = volume.default_window_level();
        let slice = volume.geometry().extent(orientation.slice_axis()) / 2;
        let camera = Camera::reset(orientation, volume.geometry(), viewport);
        let mut state = Self {
            id,
            camera,
            volume,
            orientation,
            slice,
            window_level,
            viewport,
            corrections,
        };
        state.reset_camera();
        state
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.set_viewport(viewport);
        self
    }

    pub fn with_corrections(mut self, corrections: CameraCorrections) -> Self {
        self.corrections = corrections;
        self.reset_camera();
        self
    }

    pub fn with_window_level(mut self, window_level: WindowLevel) -> Self {
        self.window_level = window_level;
        self
    }

    pub fn with_slice(mut self, slice: usize) -> Self {
        self.slice = slice.min(self.last_slice());
        self
    }

    pub fn id(&self) -> ViewerId {
        self.id
    }

    pub fn volume(&self) -> &Arc<Volume> {
        &self.volume
    }

    pub fn orientation(&self) -> SliceOrientation {
        self.orientation
    }

    pub fn slice(&self) -> usize {
        self.slice
    }

    pub fn window_level(&self) -> WindowLevel {
        self.window_level
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn corrections(&self) -> CameraCorrections {
        self.corrections
    }

    /// Number of slices along the viewer's slice axis.
    pub fn extent(&self) -> usize {
        self.volume.geometry().extent(self.orientation.slice_axis())
    }

    pub fn last_slice(&self) -> usize {
        self.extent().saturating_sub(1)
    }

    /// World coordinate of the displayed plane along the slice axis.
    pub fn slice_position(&self) -> f64 {
        self.volume
            .geometry()
            .plane_position(self.orientation.slice_axis(), self.slice)
    }

    /// Only the navigation controller moves slices; it is responsible for the bound.
    pub(crate) fn set_slice(&mut self, slice: usize) {
        debug_assert!(slice <= self.last_slice());
        self.slice = slice.min(self.last_slice());
    }

    /// Switches plane, recenters the slice and rebuilds the camera.
    pub(crate) fn set_orientation(&mut self, orientation: SliceOrientation) {
        self.orientation = orientation;
        self.slice = self.extent() / 2;
        self.reset_camera();
    }

    /// Fresh camera for the current orientation with its roll correction applied once.
    pub fn reset_camera(&mut self) {
        let mut camera = Camera::reset(self.orientation, self.volume.geometry(), self.viewport);
        camera.roll(self.corrections.roll_for(self.orientation));
        self.camera = camera;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.reset_camera();
    }

    pub fn set_window_level(&mut self, window_level: WindowLevel) {
        self.window_level = window_level;
    }
}
