use serde::{Deserialize, Serialize};

use crate::navigation::KeyCommand;

/// Input delivered to one viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewerEvent {
    /// Pointer position in viewport pixels, origin top-left.
    PointerMove { x: f64, y: f64 },
    PointerLeave,
    /// A key name, resolved through the key bindings.
    Key { key: String },
    /// A navigation command, bypassing the key bindings.
    Command { command: KeyCommand },
    Resize { width: u32, height: u32 },
    WindowLevel { window: f64, level: f64 },
}

impl ViewerEvent {
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key { key: key.into() }
    }

    pub fn pointer(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::PointerMove { .. } => "pointer_move",
            Self::PointerLeave => "pointer_leave",
            Self::Key { .. } => "key",
            Self::Command { .. } => "command",
            Self::Resize { .. } => "resize",
            Self::WindowLevel { .. } => "window_level",
        }
    }
}
