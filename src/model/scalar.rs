use std::fmt;
use std::str::FromStr;

use ndarray::Array4;
use serde::{Deserialize, Serialize};

use super::{CoreError, ScalarBuffer};

/// Closed set of numeric sample types a volume can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    F32,
    F64,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 8] = [
        Self::U8,
        Self::I8,
        Self::U16,
        Self::I16,
        Self::U32,
        Self::I32,
        Self::F32,
        Self::F64,
    ];

    pub const fn tag(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::I8 => "i8",
            Self::U16 => "u16",
            Self::I16 => "i16",
            Self::U32 => "u32",
            Self::I32 => "i32",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    pub const fn byte_size(self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::F64 => 8,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.tag())
    }
}

impl FromStr for ScalarKind {
    type Err = CoreError;

    /// Accepts the short tags plus the C type names volume headers commonly use.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        let kind = match normalized.as_str() {
            "u8" | "uint8" | "unsigned char" | "uchar" => Self::U8,
            "i8" | "int8" | "char" | "signed char" => Self::I8,
            "u16" | "uint16" | "unsigned short" | "ushort" => Self::U16,
            "i16" | "int16" | "short" => Self::I16,
            "u32" | "uint32" | "unsigned int" | "uint" => Self::U32,
            "i32" | "int32" | "int" => Self::I32,
            "f32" | "float32" | "float" => Self::F32,
            "f64" | "float64" | "double" => Self::F64,
            _ => return Err(CoreError::UnsupportedScalarType(value.to_string())),
        };
        Ok(kind)
    }
}

/// A sample type that can back a [`ScalarBuffer`].
pub trait Scalar: Copy + fmt::Display + PartialOrd + Send + Sync + 'static {
    const KIND: ScalarKind;

    fn to_f64(self) -> f64;

    /// Decodes one sample from exactly `KIND.byte_size()` little-endian bytes.
    fn from_le_slice(bytes: &[u8]) -> Self;

    /// Decodes one sample from exactly `KIND.byte_size()` big-endian bytes.
    fn from_be_slice(bytes: &[u8]) -> Self;

    fn into_buffer(data: Array4<Self>) -> ScalarBuffer;
}

macro_rules! impl_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const KIND: ScalarKind = ScalarKind::$kind;

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(raw)
                }

                fn from_be_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_be_bytes(raw)
                }

                fn into_buffer(data: Array4<Self>) -> ScalarBuffer {
                    ScalarBuffer::$kind(data)
                }
            }
        )*
    };
}

impl_scalar!(
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    u32 => U32,
    i32 => I32,
    f32 => F32,
    f64 => F64,
);
