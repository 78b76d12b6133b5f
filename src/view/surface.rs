use glam::DVec3;

use crate::probe::PickSurface;

use super::{DisplayPoint, ViewerState};

/// Orthographic pick surface of a single slice image: a display point hits when it lands on
/// the footprint of the viewer's current slice, and nothing else in the scene can be picked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlicePlaneSurface;

impl SlicePlaneSurface {
    /// Pixels per world unit for the viewer's camera and viewport.
    fn pixels_per_unit(viewer: &ViewerState) -> Option<f64> {
        let viewport = viewer.viewport();
        let scale = viewer.camera().parallel_scale();
        if viewport.is_empty() || scale <= 0.0 {
            return None;
        }
        Some(f64::from(viewport.height) / (2.0 * scale))
    }

    /// Projects a display point onto the current slice plane.
    pub fn display_to_world(viewer: &ViewerState, display: DisplayPoint) -> Option<DVec3> {
        let ppu = Self::pixels_per_unit(viewer)?;
        let camera = viewer.camera();
        let center = viewer.viewport().center();
        let dx = (display.x - center.x) / ppu;
        let dy = (center.y - display.y) / ppu;
        let mut world = camera.focal_point() + camera.right() * dx + camera.view_up() * dy;
        world[viewer.orientation().slice_axis()] = viewer.slice_position();
        Some(world)
    }

    pub fn world_to_display(viewer: &ViewerState, world: DVec3) -> Option<DisplayPoint> {
        let ppu = Self::pixels_per_unit(viewer)?;
        let camera = viewer.camera();
        let center = viewer.viewport().center();
        let offset = world - camera.focal_point();
        Some(DisplayPoint::new(
            center.x + offset.dot(camera.right()) * ppu,
            center.y - offset.dot(camera.view_up()) * ppu,
        ))
    }
}

impl PickSurface for SlicePlaneSurface {
    fn pick(&self, viewer: &ViewerState, display: DisplayPoint) -> Option<DVec3> {
        if !viewer.viewport().contains(display) {
            return None;
        }
        let world = Self::display_to_world(viewer, display)?;
        let geometry = viewer.volume().geometry();
        let (u, v) = viewer.orientation().plane_axes();
        [u, v]
            .into_iter()
            .all(|axis| {
                let (low, high) = geometry.footprint(axis);
                (low..=high).contains(&world[axis])
            })
            .then_some(world)
    }
}
