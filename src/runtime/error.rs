use crate::config::ConfigError;
use crate::formats::IoError;
use crate::model::CoreError;
use crate::view::ViewerId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("volume error: {0}")]
    Core(#[from] CoreError),

    #[error("volume I/O error: {0}")]
    Io(#[from] IoError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("unknown viewer: {0}")]
    UnknownViewer(ViewerId),

    #[error("{0} is already registered")]
    DuplicateViewer(ViewerId),

    #[error("replay script file failure: {0}")]
    File(#[from] std::io::Error),

    #[error("replay JSON failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("replay YAML failure: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),
}
