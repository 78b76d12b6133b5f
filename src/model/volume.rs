use ndarray::Array4;
use ndarray::parallel::prelude::*;

use super::{CoreError, Result, Scalar, ScalarKind, VolumeGeometry, VoxelIndex, WindowLevel};

/// Typed sample storage, indexed `[k, j, i, component]`.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarBuffer {
    U8(Array4<u8>),
    I8(Array4<i8>),
    U16(Array4<u16>),
    I16(Array4<i16>),
    U32(Array4<u32>),
    I32(Array4<i32>),
    F32(Array4<f32>),
    F64(Array4<f64>),
}

/// Runs `$body` with `$data` bound to the typed array inside a [`ScalarBuffer`].
macro_rules! dispatch_buffer {
    ($buffer:expr, $data:ident => $body:expr) => {
        match $buffer {
            $crate::model::ScalarBuffer::U8($data) => $body,
            $crate::model::ScalarBuffer::I8($data) => $body,
            $crate::model::ScalarBuffer::U16($data) => $body,
            $crate::model::ScalarBuffer::I16($data) => $body,
            $crate::model::ScalarBuffer::U32($data) => $body,
            $crate::model::ScalarBuffer::I32($data) => $body,
            $crate::model::ScalarBuffer::F32($data) => $body,
            $crate::model::ScalarBuffer::F64($data) => $body,
        }
    };
}

pub(crate) use dispatch_buffer;

impl ScalarBuffer {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::U8(_) => ScalarKind::U8,
            Self::I8(_) => ScalarKind::I8,
            Self::U16(_) => ScalarKind::U16,
            Self::I16(_) => ScalarKind::I16,
            Self::U32(_) => ScalarKind::U32,
            Self::I32(_) => ScalarKind::I32,
            Self::F32(_) => ScalarKind::F32,
            Self::F64(_) => ScalarKind::F64,
        }
    }

    pub fn shape(&self) -> &[usize] {
        dispatch_buffer!(self, data => data.shape())
    }
}

/// Immutable 3-D scalar grid shared by every viewer of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    buffer: ScalarBuffer,
    geometry: VolumeGeometry,
}

impl Volume {
    pub fn new(buffer: ScalarBuffer, geometry: VolumeGeometry) -> Result<Self> {
        geometry.validate()?;
        let shape = buffer.shape();
        let components = shape[3];
        if components == 0 {
            return Err(CoreError::ZeroComponents);
        }
        let expected = vec![
            geometry.dims[2],
            geometry.dims[1],
            geometry.dims[0],
            components,
        ];
        if shape != expected.as_slice() {
            return Err(CoreError::ShapeMismatch {
                expected,
                actual: shape.to_vec(),
            });
        }
        Ok(Self { buffer, geometry })
    }

    /// Builds a volume from samples ordered component-fastest, then i, j, k.
    pub fn from_vec<T: Scalar>(
        geometry: VolumeGeometry,
        components: usize,
        values: Vec<T>,
    ) -> Result<Self> {
        if components == 0 {
            return Err(CoreError::ZeroComponents);
        }
        let expected = geometry.sample_count(components)?;
        if values.len() != expected {
            return Err(CoreError::SampleCountMismatch {
                expected,
                actual: values.len(),
            });
        }
        let [nx, ny, nz] = geometry.dims;
        let data = Array4::from_shape_vec((nz, ny, nx, components), values).map_err(|_| {
            CoreError::ShapeMismatch {
                expected: vec![nz, ny, nx, components],
                actual: vec![expected],
            }
        })?;
        Self::new(T::into_buffer(data), geometry)
    }

    pub fn from_fn<T, F>(geometry: VolumeGeometry, components: usize, mut sample: F) -> Result<Self>
    where
        T: Scalar,
        F: FnMut(VoxelIndex, usize) -> T,
    {
        if components == 0 {
            return Err(CoreError::ZeroComponents);
        }
        let [nx, ny, nz] = geometry.dims;
        let data = Array4::from_shape_fn((nz, ny, nx, components), |(k, j, i, c)| {
            sample(VoxelIndex::new(i, j, k), c)
        });
        Self::new(T::into_buffer(data), geometry)
    }

    pub fn buffer(&self) -> &ScalarBuffer {
        &self.buffer
    }

    pub fn geometry(&self) -> &VolumeGeometry {
        &self.geometry
    }

    pub fn dims(&self) -> [usize; 3] {
        self.geometry.dims
    }

    pub fn components(&self) -> usize {
        self.buffer.shape()[3]
    }

    pub fn scalar_kind(&self) -> ScalarKind {
        self.buffer.kind()
    }

    pub fn contains(&self, voxel: VoxelIndex) -> bool {
        self.geometry.contains(voxel)
    }

    pub fn value_f64(&self, voxel: VoxelIndex, component: usize) -> Option<f64> {
        dispatch_buffer!(&self.buffer, data => data
            .get([voxel.k, voxel.j, voxel.i, component])
            .map(|value| value.to_f64()))
    }

    /// Smallest and largest sample over all voxels and components. NaN samples are skipped.
    pub fn data_range(&self) -> Option<(f64, f64)> {
        dispatch_buffer!(&self.buffer, data => scan_range(data))
    }

    /// Window/level spanning the full data range.
    pub fn default_window_level(&self) -> WindowLevel {
        self.data_range()
            .map(|(min, max)| WindowLevel::from_range(min, max))
            .unwrap_or_default()
    }
}

fn scan_range<T: Scalar>(data: &Array4<T>) -> Option<(f64, f64)> {
    let (min, max) = data
        .par_iter()
        .map(|value| value.to_f64())
        .filter(|value| !value.is_nan())
        .fold(
            || (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), value| (min.min(value), max.max(value)),
        )
        .reduce(
            || (f64::INFINITY, f64::NEG_INFINITY),
            |left, right| (left.0.min(right.0), left.1.max(right.1)),
        );
    (min <= max).then_some((min, max))
}
