use std::path::Path;

use glam::DVec3;
use image::{GrayImage, ImageBuffer};
use ndarray::Array4;
use rayon::prelude::*;
use tracing::info;

use crate::model::{Scalar, WindowLevel, dispatch_buffer};
use crate::view::ViewerState;

use super::util::extension;
use super::{IoError, Result};

/// How screen pixels walk the volume for the viewer's current camera.
#[derive(Debug, Clone, Copy)]
struct SlicePlan {
    slice_axis: usize,
    slice: usize,
    /// Volume axis along screen x, and whether index grows with x.
    across: (usize, bool),
    /// Volume axis along screen y, and whether index grows downward.
    down: (usize, bool),
    dims: [usize; 3],
    component: usize,
}

const AXIS_TOLERANCE: f64 = 1e-9;

/// Volume axis `direction` runs along, with its sign, or `None` unless it is a unit axis.
fn aligned_axis(direction: DVec3) -> Option<(usize, bool)> {
    let magnitudes = direction.abs();
    let axis = if magnitudes.x >= magnitudes.y && magnitudes.x >= magnitudes.z {
        0
    } else if magnitudes.y >= magnitudes.z {
        1
    } else {
        2
    };
    ((magnitudes[axis] - 1.0).abs() <= AXIS_TOLERANCE).then_some((axis, direction[axis] >= 0.0))
}

impl SlicePlan {
    fn for_viewer(viewer: &ViewerState, component: usize) -> Result<Self> {
        let camera = viewer.camera();
        let slice_axis = viewer.orientation().slice_axis();
        let misaligned = || {
            IoError::UnsupportedLayout(format!(
                "camera roll of {} degrees is not a multiple of 90; export needs an axis-aligned slice",
                camera.roll_degrees()
            ))
        };
        let (right_axis, right_positive) = aligned_axis(camera.right()).ok_or_else(misaligned)?;
        let (up_axis, up_positive) = aligned_axis(camera.view_up()).ok_or_else(misaligned)?;
        if right_axis == up_axis || right_axis == slice_axis || up_axis == slice_axis {
            return Err(misaligned());
        }
        Ok(Self {
            slice_axis,
            slice: viewer.slice(),
            across: (right_axis, right_positive),
            down: (up_axis, !up_positive),
            dims: viewer.volume().dims(),
            component,
        })
    }

    fn width(&self) -> usize {
        self.dims[self.across.0]
    }

    fn height(&self) -> usize {
        self.dims[self.down.0]
    }

    fn voxel(&self, x: usize, y: usize) -> [usize; 3] {
        let mut index = [0_usize; 3];
        index[self.slice_axis] = self.slice;
        index[self.across.0] = if self.across.1 { x } else { self.width() - 1 - x };
        index[self.down.0] = if self.down.1 { y } else { self.height() - 1 - y };
        index
    }
}

fn fill_rows<T: Scalar>(
    data: &Array4<T>,
    plan: &SlicePlan,
    window_level: WindowLevel,
    pixels: &mut [u8],
) {
    let width = plan.width();
    pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                let [i, j, k] = plan.voxel(x, y);
                *pixel = window_level.to_gray(data[[k, j, i, plan.component]].to_f64());
            }
        });
}

/// Renders the viewer's current slice as 8-bit gray, oriented the way its camera shows it.
pub fn render_slice(viewer: &ViewerState, component: usize) -> Result<GrayImage> {
    let components = viewer.volume().components();
    if component >= components {
        return Err(IoError::UnsupportedLayout(format!(
            "component {component} requested from a {components}-component volume"
        )));
    }
    let plan = SlicePlan::for_viewer(viewer, component)?;
    let (width, height) = (plan.width(), plan.height());
    let mut pixels = vec![0_u8; width * height];
    let window_level = viewer.window_level();
    dispatch_buffer!(viewer.volume().buffer(), data => {
        fill_rows(data, &plan, window_level, &mut pixels)
    });
    ImageBuffer::from_raw(width as u32, height as u32, pixels).ok_or_else(|| {
        IoError::UnsupportedLayout(format!("cannot build a {width}x{height} image"))
    })
}

/// Writes the displayed slice to a PNG file and returns its pixel size.
pub fn export_slice_png(
    viewer: &ViewerState,
    component: usize,
    path: impl AsRef<Path>,
) -> Result<(u32, u32)> {
    let path = path.as_ref();
    let extension = extension(path)?;
    if extension != "png" {
        return Err(IoError::UnsupportedFormat(extension));
    }
    let image = render_slice(viewer, component)?;
    image.save(path)?;
    info!(
        path = %path.display(),
        viewer = %viewer.id(),
        orientation = %viewer.orientation(),
        slice = viewer.slice(),
        "exported slice"
    );
    Ok(image.dimensions())
}
