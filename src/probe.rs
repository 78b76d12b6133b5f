mod pick;
mod value;

#[cfg(test)]
mod tests;

pub use pick::{PickResult, PickSurface, resolve, voxel_at_world};
pub use value::{append_voxel_components, format_voxel_value, voxel_components_f64};
