use glam::DVec3;
use serde::Serialize;

use crate::model::{VolumeGeometry, VoxelIndex};
use crate::view::{DisplayPoint, ViewerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PickResult {
    Hit { voxel: VoxelIndex },
    Miss,
}

impl PickResult {
    pub fn voxel(self) -> Option<VoxelIndex> {
        match self {
            Self::Hit { voxel } => Some(voxel),
            Self::Miss => None,
        }
    }

    pub fn is_hit(self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}

/// Projection pick against the viewer's image actor only. Returns the world point under
/// `display`, or `None` when the image is not under the pointer.
pub trait PickSurface {
    fn pick(&self, viewer: &ViewerState, display: DisplayPoint) -> Option<DVec3>;
}

impl<F> PickSurface for F
where
    F: Fn(&ViewerState, DisplayPoint) -> Option<DVec3>,
{
    fn pick(&self, viewer: &ViewerState, display: DisplayPoint) -> Option<DVec3> {
        self(viewer, display)
    }
}

pub fn resolve<S>(surface: &S, viewer: &ViewerState, display: DisplayPoint) -> PickResult
where
    S: PickSurface + ?Sized,
{
    match surface.pick(viewer, display) {
        Some(world) => voxel_at_world(viewer.volume().geometry(), world),
        None => PickResult::Miss,
    }
}

/// Nearest voxel to a world point. Points more than half a voxel outside the grid on any
/// axis miss; the rest round to nearest and clamp onto the border.
pub fn voxel_at_world(geometry: &VolumeGeometry, world: DVec3) -> PickResult {
    let continuous = geometry.world_to_continuous(world);
    let mut index = [0_usize; 3];
    for axis in 0..3 {
        let last = (geometry.dims[axis] - 1) as f64;
        let value = continuous[axis];
        if !value.is_finite() || value < -0.5 || value > last + 0.5 {
            return PickResult::Miss;
        }
        index[axis] = value.round().clamp(0.0, last) as usize;
    }
    PickResult::Hit {
        voxel: VoxelIndex::new(index[0], index[1], index[2]),
    }
}
