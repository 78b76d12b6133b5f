use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::model::{SliceOrientation, VolumeGeometry};

use super::Viewport;

/// Per-orientation roll (degrees) applied once each time a camera is rebuilt, so the
/// displayed plane keeps the patient upright.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraCorrections {
    pub sagittal: f64,
    pub coronal: f64,
    pub axial: f64,
}

impl Default for CameraCorrections {
    fn default() -> Self {
        Self {
            sagittal: 180.0,
            coronal: 180.0,
            axial: 0.0,
        }
    }
}

impl CameraCorrections {
    pub const NONE: Self = Self {
        sagittal: 0.0,
        coronal: 0.0,
        axial: 0.0,
    };

    pub fn roll_for(&self, orientation: SliceOrientation) -> f64 {
        match orientation {
            SliceOrientation::Sagittal => self.sagittal,
            SliceOrientation::Coronal => self.coronal,
            SliceOrientation::Axial => self.axial,
        }
    }
}

/// Orthographic camera looking down one volume axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    focal_point: DVec3,
    direction_of_projection: DVec3,
    view_up: DVec3,
    parallel_scale: f64,
    roll: f64,
}

impl Camera {
    /// Fresh camera for `orientation`: centered on the volume, sized so the whole slice
    /// footprint fits in `viewport`, no roll.
    pub fn reset(
        orientation: SliceOrientation,
        geometry: &VolumeGeometry,
        viewport: Viewport,
    ) -> Self {
        let mut camera = Self {
            focal_point: geometry.center_world(),
            direction_of_projection: orientation.direction_of_projection(),
            view_up: orientation.default_view_up(),
            parallel_scale: 1.0,
            roll: 0.0,
        };
        camera.fit(geometry, viewport);
        camera
    }

    fn fit(&mut self, geometry: &VolumeGeometry, viewport: Viewport) {
        let extents = DVec3::new(
            geometry.physical_extent(0),
            geometry.physical_extent(1),
            geometry.physical_extent(2),
        );
        let horizontal = self.right().abs().dot(extents);
        let vertical = self.view_up.abs().dot(extents);
        let scale = (vertical * 0.5).max(horizontal * 0.5 / viewport.aspect());
        self.parallel_scale = if scale > 0.0 { scale } else { 1.0 };
    }

    /// Spins the camera about its direction of projection.
    pub fn roll(&mut self, degrees: f64) {
        if degrees == 0.0 {
            return;
        }
        let rotation = DQuat::from_axis_angle(self.direction_of_projection, degrees.to_radians());
        self.view_up = (rotation * self.view_up).normalize();
        self.roll = (self.roll + degrees).rem_euclid(360.0);
    }

    pub fn focal_point(&self) -> DVec3 {
        self.focal_point
    }

    pub fn direction_of_projection(&self) -> DVec3 {
        self.direction_of_projection
    }

    pub fn view_up(&self) -> DVec3 {
        self.view_up
    }

    /// Screen-right direction in world space.
    pub fn right(&self) -> DVec3 {
        self.direction_of_projection.cross(self.view_up).normalize()
    }

    /// Half of the viewport height in world units.
    pub fn parallel_scale(&self) -> f64 {
        self.parallel_scale
    }

    /// Accumulated roll in degrees, in `[0, 360)`.
    pub fn roll_degrees(&self) -> f64 {
        self.roll
    }
}
