mod api;
mod error;
mod export;
mod raw;
mod tiff;
mod util;


pub use api::{VolumeProvider, provider_for, providers, read_volume, supported_formats};
pub use error::{IoError, Result};
pub use export::{export_slice_png, render_slice};
pub use raw::{ByteOrder, RawVolumeDescriptor, RawVolumeProvider};
pub use tiff::TiffStackProvider;

pub(crate) use util::is_yaml;
