mod error;
mod geometry;
mod orientation;
mod scalar;
mod volume;
mod window;


pub use error::{CoreError, Result};
pub use geometry::{VolumeGeometry, VoxelIndex};
pub use orientation::SliceOrientation;
pub use scalar::{Scalar, ScalarKind};
pub use volume::{ScalarBuffer, Volume};
pub use window::WindowLevel;

pub(crate) use volume::dispatch_buffer;
