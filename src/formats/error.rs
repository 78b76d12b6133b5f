use crate::model::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IoError>;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("unsupported volume format: {0}")]
    UnsupportedFormat(String),

    #[error("unsupported volume layout for this format: {0}")]
    UnsupportedLayout(String),

    #[error("invalid volume descriptor: {0}")]
    Descriptor(String),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encode failure: {0}")]
    Image(#[from] image::ImageError),

    #[error("TIFF decode failure: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("descriptor JSON failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("descriptor YAML failure: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("core volume failure: {0}")]
    Core(#[from] CoreError),
}
