use serde::{Deserialize, Serialize};

/// Linear contrast mapping: `window` is the displayed intensity width, `level` its center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowLevel {
    pub window: f64,
    pub level: f64,
}

impl Default for WindowLevel {
    fn default() -> Self {
        Self {
            window: 255.0,
            level: 127.5,
        }
    }
}

impl WindowLevel {
    pub const fn new(window: f64, level: f64) -> Self {
        Self { window, level }
    }

    /// Window covering `[min, max]` exactly; a flat range gets a unit window.
    pub fn from_range(min: f64, max: f64) -> Self {
        let width = max - min;
        Self {
            window: if width > 0.0 { width } else { 1.0 },
            level: min + width * 0.5,
        }
    }

    pub fn lower(&self) -> f64 {
        self.level - self.window * 0.5
    }

    pub fn upper(&self) -> f64 {
        self.level + self.window * 0.5
    }

    /// Maps a raw value into `[0, 1]`.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.window.abs() < f64::EPSILON {
            return if value >= self.level { 1.0 } else { 0.0 };
        }
        ((value - self.lower()) / self.window).clamp(0.0, 1.0)
    }

    pub fn to_gray(&self, value: f64) -> u8 {
        (self.normalize(value) * 255.0).round() as u8
    }
}
