use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unsupported scalar type: {0}")]
    UnsupportedScalarType(String),

    #[error("unknown slice orientation: {0}")]
    UnknownOrientation(String),

    #[error("unknown key command: {0}")]
    UnknownKeyCommand(String),

    #[error("invalid dimension size 0 at axis {axis}")]
    ZeroSizedDimension { axis: usize },

    #[error("invalid voxel spacing {value} at axis {axis}")]
    InvalidSpacing { axis: usize, value: f64 },

    #[error("invalid volume origin: {0:?}")]
    InvalidOrigin([f64; 3]),

    #[error("a {dims:?} grid with {components} components per voxel exceeds addressable memory")]
    TooManySamples { dims: [usize; 3], components: usize },

    #[error("a volume needs at least one scalar component per voxel")]
    ZeroComponents,

    #[error(
        "sample count mismatch: geometry and component count expect {expected} values but {actual} were supplied"
    )]
    SampleCountMismatch { expected: usize, actual: usize },

    #[error("buffer shape {actual:?} does not match the volume layout {expected:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
}
