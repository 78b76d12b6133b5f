use std::fmt;

use serde::Serialize;

/// Overlay text slots, numbered the way corner annotations are addressed by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Self::BottomLeft,
        Self::BottomRight,
        Self::TopLeft,
        Self::TopRight,
    ];

    pub const fn slot(self) -> usize {
        match self {
            Self::BottomLeft => 0,
            Self::BottomRight => 1,
            Self::TopLeft => 2,
            Self::TopRight => 3,
        }
    }

    pub const fn from_slot(slot: usize) -> Option<Self> {
        match slot {
            0 => Some(Self::BottomLeft),
            1 => Some(Self::BottomRight),
            2 => Some(Self::TopLeft),
            3 => Some(Self::TopRight),
            _ => None,
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
        };
        formatter.write_str(label)
    }
}

/// Text for all four corners of one viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CornerAnnotation {
    slots: [String; 4],
}

impl CornerAnnotation {
    pub fn text(&self, corner: Corner) -> &str {
        &self.slots[corner.slot()]
    }

    pub fn set(&mut self, corner: Corner, text: impl Into<String>) {
        self.slots[corner.slot()] = text.into();
    }

    pub fn slots(&self) -> &[String; 4] {
        &self.slots
    }

    /// Pushes every slot to `sink`, then asks for a single redraw.
    pub fn apply_to<S: OverlaySink + ?Sized>(&self, sink: &mut S) {
        for corner in Corner::ALL {
            sink.set_text(corner, self.text(corner));
        }
        sink.request_redraw();
    }
}

/// Receiver of corner text, usually the renderer's text overlay.
pub trait OverlaySink {
    fn set_text(&mut self, corner: Corner, text: &str);

    fn request_redraw(&mut self);
}

/// In-memory overlay that keeps the last text per slot and counts redraw requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CornerOverlay {
    texts: [String; 4],
    redraws: usize,
}

impl CornerOverlay {
    pub fn text(&self, corner: Corner) -> &str {
        &self.texts[corner.slot()]
    }

    pub fn texts(&self) -> &[String; 4] {
        &self.texts
    }

    pub fn redraws(&self) -> usize {
        self.redraws
    }
}

impl OverlaySink for CornerOverlay {
    fn set_text(&mut self, corner: Corner, text: &str) {
        let slot = &mut self.texts[corner.slot()];
        slot.clear();
        slot.push_str(text);
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}
