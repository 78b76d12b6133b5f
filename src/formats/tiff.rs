use std::fs::File;
use std::path::Path;

use tiff::decoder::{Decoder, DecodingResult};

use crate::model::{Volume, VolumeGeometry};

use super::{IoError, Result, VolumeProvider};

/// Samples of one or more pages, kept in the file's own numeric type.
#[derive(Debug)]
enum StackSamples {
    U8(Vec<u8>),
    I8(Vec<i8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
    U32(Vec<u32>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

macro_rules! for_each_stack {
    ($samples:expr, $values:ident => $body:expr) => {
        match $samples {
            StackSamples::U8($values) => $body,
            StackSamples::I8($values) => $body,
            StackSamples::U16($values) => $body,
            StackSamples::I16($values) => $body,
            StackSamples::U32($values) => $body,
            StackSamples::I32($values) => $body,
            StackSamples::F32($values) => $body,
            StackSamples::F64($values) => $body,
        }
    };
}

impl StackSamples {
    fn from_page(page: DecodingResult) -> Result<Self> {
        let samples = match page {
            DecodingResult::U8(values) => Self::U8(values),
            DecodingResult::I8(values) => Self::I8(values),
            DecodingResult::U16(values) => Self::U16(values),
            DecodingResult::I16(values) => Self::I16(values),
            DecodingResult::U32(values) => Self::U32(values),
            DecodingResult::I32(values) => Self::I32(values),
            DecodingResult::F32(values) => Self::F32(values),
            DecodingResult::F64(values) => Self::F64(values),
            other => {
                return Err(IoError::UnsupportedLayout(format!(
                    "unsupported TIFF sample type: {other:?}"
                )));
            }
        };
        Ok(samples)
    }

    fn len(&self) -> usize {
        for_each_stack!(self, values => values.len())
    }

    fn append(&mut self, page: Self) -> Result<()> {
        match (self, page) {
            (Self::U8(stack), Self::U8(page)) => stack.extend(page),
            (Self::I8(stack), Self::I8(page)) => stack.extend(page),
            (Self::U16(stack), Self::U16(page)) => stack.extend(page),
            (Self::I16(stack), Self::I16(page)) => stack.extend(page),
            (Self::U32(stack), Self::U32(page)) => stack.extend(page),
            (Self::I32(stack), Self::I32(page)) => stack.extend(page),
            (Self::F32(stack), Self::F32(page)) => stack.extend(page),
            (Self::F64(stack), Self::F64(page)) => stack.extend(page),
            _ => {
                return Err(IoError::UnsupportedLayout(
                    "TIFF pages must share one sample type".into(),
                ));
            }
        }
        Ok(())
    }

    fn into_volume(self, geometry: VolumeGeometry, components: usize) -> Result<Volume> {
        Ok(for_each_stack!(self, values => Volume::from_vec(geometry, components, values))?)
    }
}

/// Multi-page TIFF where page `k` is slice `k` of the volume and rows map to `j`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TiffStackProvider;

impl VolumeProvider for TiffStackProvider {
    fn name(&self) -> &'static str {
        "tiff-stack"
    }

    fn supports_extension(&self, extension: &str) -> bool {
        matches!(extension, "tif" | "tiff")
    }

    fn read(&self, path: &Path) -> Result<Volume> {
        read_tiff_stack(path)
    }
}

pub(crate) fn read_tiff_stack(path: &Path) -> Result<Volume> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(file)?;
    let (width, height) = decoder.dimensions()?;
    let plane = width as usize * height as usize;
    if plane == 0 {
        return Err(IoError::UnsupportedLayout("TIFF page has no pixels".into()));
    }

    let first = StackSamples::from_page(decoder.read_image()?)?;
    let page_len = first.len();
    if page_len % plane != 0 || page_len < plane {
        return Err(IoError::UnsupportedLayout(format!(
            "TIFF page holds {page_len} samples for {width}x{height} pixels"
        )));
    }
    let components = page_len / plane;

    let mut stack = first;
    let mut depth = 1;
    while decoder.more_images() {
        decoder.next_image()?;
        let (other_width, other_height) = decoder.dimensions()?;
        if other_width != width || other_height != height {
            return Err(IoError::UnsupportedLayout(
                "TIFF pages must have identical dimensions".into(),
            ));
        }
        let page = StackSamples::from_page(decoder.read_image()?)?;
        if page.len() != page_len {
            return Err(IoError::UnsupportedLayout(
                "TIFF pages must have identical channel counts".into(),
            ));
        }
        stack.append(page)?;
        depth += 1;
    }

    let geometry = VolumeGeometry::with_unit_spacing([width as usize, height as usize, depth])?;
    stack.into_volume(geometry, components)
}
