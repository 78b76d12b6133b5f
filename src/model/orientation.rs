use std::fmt;
use std::str::FromStr;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::CoreError;

/// Canonical cutting plane of a viewer. The discriminant order follows the
/// YZ / XZ / XY numbering used by slice viewers (0 = sagittal, 2 = axial).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SliceOrientation {
    Sagittal,
    Coronal,
    #[default]
    Axial,
}

impl SliceOrientation {
    pub const ALL: [SliceOrientation; 3] = [Self::Sagittal, Self::Coronal, Self::Axial];

    pub const fn index(self) -> usize {
        match self {
            Self::Sagittal => 0,
            Self::Coronal => 1,
            Self::Axial => 2,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Sagittal),
            1 => Some(Self::Coronal),
            2 => Some(Self::Axial),
            _ => None,
        }
    }

    /// Volume axis the slice index moves along.
    pub const fn slice_axis(self) -> usize {
        self.index()
    }

    /// The two volume axes spanning the displayed plane.
    pub const fn plane_axes(self) -> (usize, usize) {
        match self {
            Self::Sagittal => (1, 2),
            Self::Coronal => (0, 2),
            Self::Axial => (0, 1),
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Sagittal => Self::Coronal,
            Self::Coronal => Self::Axial,
            Self::Axial => Self::Sagittal,
        }
    }

    pub fn direction_of_projection(self) -> DVec3 {
        match self {
            Self::Sagittal => DVec3::NEG_X,
            Self::Coronal => DVec3::Y,
            Self::Axial => DVec3::NEG_Z,
        }
    }

    pub fn default_view_up(self) -> DVec3 {
        match self {
            Self::Sagittal | Self::Coronal => DVec3::Z,
            Self::Axial => DVec3::Y,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sagittal => "sagittal",
            Self::Coronal => "coronal",
            Self::Axial => "axial",
        }
    }
}

impl fmt::Display for SliceOrientation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

impl FromStr for SliceOrientation {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sagittal" | "yz" | "0" => Ok(Self::Sagittal),
            "coronal" | "xz" | "1" => Ok(Self::Coronal),
            "axial" | "xy" | "2" => Ok(Self::Axial),
            _ => Err(CoreError::UnknownOrientation(value.to_string())),
        }
    }
}
