use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::{CoreError, Result};

/// Integer voxel coordinate `(i, j, k)` along the x, y and z axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoxelIndex {
    pub i: usize,
    pub j: usize,
    pub k: usize,
}

impl VoxelIndex {
    pub const fn new(i: usize, j: usize, k: usize) -> Self {
        Self { i, j, k }
    }

    pub const fn axis(self, axis: usize) -> usize {
        match axis {
            0 => self.i,
            1 => self.j,
            _ => self.k,
        }
    }
}

impl fmt::Display for VoxelIndex {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {}, {})", self.i, self.j, self.k)
    }
}

/// Sampling grid of a volume: extents, voxel spacing and the world position of voxel 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeGeometry {
    pub dims: [usize; 3],
    pub spacing: [f64; 3],
    pub origin: [f64; 3],
}

impl VolumeGeometry {
    pub fn new(dims: [usize; 3], spacing: [f64; 3], origin: [f64; 3]) -> Result<Self> {
        let geometry = Self {
            dims,
            spacing,
            origin,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn with_unit_spacing(dims: [usize; 3]) -> Result<Self> {
        Self::new(dims, [1.0; 3], [0.0; 3])
    }

    pub fn validate(&self) -> Result<()> {
        for axis in 0..3 {
            if self.dims[axis] == 0 {
                return Err(CoreError::ZeroSizedDimension { axis });
            }
            let spacing = self.spacing[axis];
            if !spacing.is_finite() || spacing <= 0.0 {
                return Err(CoreError::InvalidSpacing {
                    axis,
                    value: spacing,
                });
            }
        }
        if self.origin.iter().any(|value| !value.is_finite()) {
            return Err(CoreError::InvalidOrigin(self.origin));
        }
        self.sample_count(1)?;
        Ok(())
    }

    pub fn extent(&self, axis: usize) -> usize {
        self.dims[axis]
    }

    pub fn voxel_count(&self) -> usize {
        self.dims.iter().product()
    }

    /// Number of scalar values stored for `components` values per voxel.
    pub fn sample_count(&self, components: usize) -> Result<usize> {
        self.dims
            .iter()
            .try_fold(components, |count, &extent| count.checked_mul(extent))
            .ok_or(CoreError::TooManySamples {
                dims: self.dims,
                components,
            })
    }

    pub fn contains(&self, voxel: VoxelIndex) -> bool {
        voxel.i < self.dims[0] && voxel.j < self.dims[1] && voxel.k < self.dims[2]
    }

    pub fn center_index(&self) -> VoxelIndex {
        VoxelIndex::new(self.dims[0] / 2, self.dims[1] / 2, self.dims[2] / 2)
    }

    /// Continuous index of a world point: `(world - origin) / spacing` per axis.
    pub fn world_to_continuous(&self, world: DVec3) -> DVec3 {
        (world - DVec3::from_array(self.origin)) / DVec3::from_array(self.spacing)
    }

    pub fn index_to_world(&self, index: DVec3) -> DVec3 {
        DVec3::from_array(self.origin) + index * DVec3::from_array(self.spacing)
    }

    pub fn voxel_to_world(&self, voxel: VoxelIndex) -> DVec3 {
        self.index_to_world(DVec3::new(
            voxel.i as f64,
            voxel.j as f64,
            voxel.k as f64,
        ))
    }

    /// World-space position of slice `index` along `axis`.
    pub fn plane_position(&self, axis: usize, index: usize) -> f64 {
        self.origin[axis] + index as f64 * self.spacing[axis]
    }

    /// World interval covered by the voxels along `axis`, each voxel extending half a
    /// spacing to either side of its sample point.
    pub fn footprint(&self, axis: usize) -> (f64, f64) {
        let half = self.spacing[axis] * 0.5;
        let first = self.origin[axis];
        let last = self.plane_position(axis, self.dims[axis] - 1);
        (first - half, last + half)
    }

    /// Physical length covered along `axis`.
    pub fn physical_extent(&self, axis: usize) -> f64 {
        self.dims[axis] as f64 * self.spacing[axis]
    }

    pub fn center_world(&self) -> DVec3 {
        let mut center = DVec3::ZERO;
        for axis in 0..3 {
            let (low, high) = self.footprint(axis);
            center[axis] = (low + high) * 0.5;
        }
        center
    }
}
