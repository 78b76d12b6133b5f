use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::{Scalar, ScalarKind, Volume, VolumeGeometry};

use super::util::is_yaml;
use super::{IoError, Result, VolumeProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

fn unit_spacing() -> [f64; 3] {
    [1.0; 3]
}

fn single_component() -> usize {
    1
}

/// Sidecar describing a headerless sample file.
///
/// ```yaml
/// dims: [256, 256, 120]
/// spacing: [0.8, 0.8, 2.5]
/// scalar: unsigned short
/// data: head.raw
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawVolumeDescriptor {
    pub dims: [usize; 3],
    #[serde(default = "unit_spacing")]
    pub spacing: [f64; 3],
    #[serde(default)]
    pub origin: [f64; 3],
    /// Scalar tag, e.g. `u16` or `unsigned short`.
    pub scalar: String,
    #[serde(default = "single_component")]
    pub components: usize,
    #[serde(default)]
    pub byte_order: ByteOrder,
    /// Sample file, relative to the descriptor's directory.
    pub data: PathBuf,
    #[serde(default)]
    pub header_bytes: usize,
}

impl RawVolumeDescriptor {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let descriptor = if is_yaml(path) {
            serde_yaml::from_str::<Self>(&raw)?
        } else {
            serde_json::from_str::<Self>(&raw)?
        };
        Ok(descriptor)
    }

    pub fn scalar_kind(&self) -> Result<ScalarKind> {
        Ok(self.scalar.parse::<ScalarKind>()?)
    }

    pub fn geometry(&self) -> Result<VolumeGeometry> {
        Ok(VolumeGeometry::new(self.dims, self.spacing, self.origin)?)
    }

    pub fn data_path(&self, descriptor_path: &Path) -> PathBuf {
        match descriptor_path.parent() {
            Some(parent) if self.data.is_relative() => parent.join(&self.data),
            _ => self.data.clone(),
        }
    }

    /// Decodes the sample bytes (header included) into a volume.
    pub fn decode(&self, bytes: &[u8]) -> Result<Volume> {
        let kind = self.scalar_kind()?;
        let geometry = self.geometry()?;
        if self.components == 0 {
            return Err(IoError::Descriptor("components must be at least 1".into()));
        }
        let expected = geometry
            .sample_count(self.components)
            .ok()
            .and_then(|samples| samples.checked_mul(kind.byte_size()))
            .ok_or_else(|| {
                IoError::Descriptor(format!(
                    "dims {:?} with {} {} components do not fit in memory",
                    self.dims, self.components, kind
                ))
            })?;
        let payload = bytes.get(self.header_bytes..).ok_or_else(|| {
            IoError::UnsupportedLayout(format!(
                "file holds {} bytes, shorter than the {}-byte header",
                bytes.len(),
                self.header_bytes
            ))
        })?;
        if payload.len() < expected {
            return Err(IoError::UnsupportedLayout(format!(
                "expected {expected} sample bytes, found {}",
                payload.len()
            )));
        }
        if payload.len() > expected {
            warn!(
                extra = payload.len() - expected,
                "ignoring trailing bytes after raw samples"
            );
        }
        let payload = &payload[..expected];
        let volume = match kind {
            ScalarKind::U8 => self.build::<u8>(geometry, payload),
            ScalarKind::I8 => self.build::<i8>(geometry, payload),
            ScalarKind::U16 => self.build::<u16>(geometry, payload),
            ScalarKind::I16 => self.build::<i16>(geometry, payload),
            ScalarKind::U32 => self.build::<u32>(geometry, payload),
            ScalarKind::I32 => self.build::<i32>(geometry, payload),
            ScalarKind::F32 => self.build::<f32>(geometry, payload),
            ScalarKind::F64 => self.build::<f64>(geometry, payload),
        }?;
        Ok(volume)
    }

    fn build<T: Scalar>(&self, geometry: VolumeGeometry, payload: &[u8]) -> Result<Volume> {
        let samples = payload
            .chunks_exact(T::KIND.byte_size())
            .map(|bytes| match self.byte_order {
                ByteOrder::Little => T::from_le_slice(bytes),
                ByteOrder::Big => T::from_be_slice(bytes),
            })
            .collect::<Vec<T>>();
        Ok(Volume::from_vec(geometry, self.components, samples)?)
    }
}

/// Reads `.yaml`/`.yml`/`.json` raw volume descriptors and the sample file they name.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawVolumeProvider;

impl VolumeProvider for RawVolumeProvider {
    fn name(&self) -> &'static str {
        "raw"
    }

    fn supports_extension(&self, extension: &str) -> bool {
        matches!(extension, "yaml" | "yml" | "json")
    }

    fn read(&self, path: &Path) -> Result<Volume> {
        let descriptor = RawVolumeDescriptor::load(path)?;
        let bytes = fs::read(descriptor.data_path(path))?;
        descriptor.decode(&bytes)
    }
}
