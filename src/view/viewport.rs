use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Pixel size of one render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(512, 512)
    }
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect(&self) -> f64 {
        if self.height == 0 {
            1.0
        } else {
            f64::from(self.width) / f64::from(self.height)
        }
    }

    pub fn center(&self) -> DisplayPoint {
        DisplayPoint::new(f64::from(self.width) * 0.5, f64::from(self.height) * 0.5)
    }

    pub fn contains(&self, point: DisplayPoint) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x <= f64::from(self.width)
            && point.y <= f64::from(self.height)
    }
}

impl FromStr for Viewport {
    type Err = String;

    /// Parses `WIDTHxHEIGHT`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (width, height) = value
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, found `{value}`"))?;
        let width = width
            .trim()
            .parse::<u32>()
            .map_err(|error| format!("invalid viewport width `{width}`: {error}"))?;
        let height = height
            .trim()
            .parse::<u32>()
            .map_err(|error| format!("invalid viewport height `{height}`: {error}"))?;
        Ok(Self::new(width, height))
    }
}

/// Pointer position in viewport pixels, origin top-left, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayPoint {
    pub x: f64,
    pub y: f64,
}

impl DisplayPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl FromStr for DisplayPoint {
    type Err = String;

    /// Parses `X,Y`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (x, y) = value
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y, found `{value}`"))?;
        let x = x
            .trim()
            .parse::<f64>()
            .map_err(|error| format!("invalid x coordinate `{x}`: {error}"))?;
        let y = y
            .trim()
            .parse::<f64>()
            .map_err(|error| format!("invalid y coordinate `{y}`: {error}"))?;
        Ok(Self::new(x, y))
    }
}
