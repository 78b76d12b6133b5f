use std::path::Path;
use std::sync::OnceLock;

use tracing::info;

use crate::model::Volume;

use super::raw::RawVolumeProvider;
use super::tiff::TiffStackProvider;
use super::util::extension;
use super::{IoError, Result};

/// A source of volumes, selected by file extension.
pub trait VolumeProvider: Send + Sync {
    fn name(&self) -> &'static str;
    fn supports_extension(&self, extension: &str) -> bool;
    fn read(&self, path: &Path) -> Result<Volume>;
}

static PROVIDERS: OnceLock<Vec<Box<dyn VolumeProvider>>> = OnceLock::new();

pub fn providers() -> &'static [Box<dyn VolumeProvider>] {
    PROVIDERS.get_or_init(|| vec![Box::new(RawVolumeProvider), Box::new(TiffStackProvider)])
}

pub fn provider_for(path: &Path) -> Result<&'static dyn VolumeProvider> {
    let extension = extension(path)?;
    providers()
        .iter()
        .find(|provider| provider.supports_extension(&extension))
        .map(|provider| provider.as_ref())
        .ok_or(IoError::UnsupportedFormat(extension))
}

pub fn read_volume(path: impl AsRef<Path>) -> Result<Volume> {
    let path = path.as_ref();
    let provider = provider_for(path)?;
    let volume = provider.read(path)?;
    info!(
        path = %path.display(),
        provider = provider.name(),
        dims = ?volume.dims(),
        scalar = %volume.scalar_kind(),
        components = volume.components(),
        "loaded volume"
    );
    Ok(volume)
}

pub fn supported_formats() -> &'static [&'static str] {
    &["yaml", "yml", "json", "tif", "tiff"]
}
