use std::fmt::Write;

use ndarray::{Array4, s};

use crate::model::{Scalar, Volume, VoxelIndex, dispatch_buffer};

/// Formats every component stored at `voxel` as `"( v0, v1, ..., vN )"`.
///
/// `voxel` must be inside the volume; picks are clamped before they get here, so an
/// out-of-range index panics.
pub fn format_voxel_value(volume: &Volume, voxel: VoxelIndex) -> String {
    let mut text = String::from("( ");
    append_voxel_components(&mut text, volume, voxel);
    text
}

/// Appends `"v0, v1, ..., vN )"` to `out`. The caller writes the opening parenthesis.
pub fn append_voxel_components(out: &mut String, volume: &Volume, voxel: VoxelIndex) {
    dispatch_buffer!(volume.buffer(), data => write_components(out, data, voxel));
}

pub fn voxel_components_f64(volume: &Volume, voxel: VoxelIndex) -> Vec<f64> {
    dispatch_buffer!(volume.buffer(), data => data
        .slice(s![voxel.k, voxel.j, voxel.i, ..])
        .iter()
        .map(|value| value.to_f64())
        .collect())
}

fn write_components<T: Scalar>(out: &mut String, data: &Array4<T>, voxel: VoxelIndex) {
    let components = data.slice(s![voxel.k, voxel.j, voxel.i, ..]);
    for (index, value) in components.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{value}");
    }
    out.push_str(" )");
}
