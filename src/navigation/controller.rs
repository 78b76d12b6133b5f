use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::SliceOrientation;
use crate::view::{ViewerId, ViewerState};

use super::{
    BoundaryPolicy, Direction, KeyCommand, SliceChange, advance, advance_by, cycle_orientation,
    jump_to,
};

/// Redraws one viewer.
pub trait Renderer {
    fn render(&mut self, viewer: &ViewerState);
}

impl<F> Renderer for F
where
    F: FnMut(&ViewerState),
{
    fn render(&mut self, viewer: &ViewerState) {
        self(viewer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub viewer: ViewerId,
    pub orientation: SliceOrientation,
    pub slice: usize,
    pub roll: f64,
}

/// Renderer that records every frame it is asked to draw.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameLog {
    frames: Vec<Frame>,
}

impl FrameLog {
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn count_for(&self, viewer: ViewerId) -> usize {
        self.frames
            .iter()
            .filter(|frame| frame.viewer == viewer)
            .count()
    }
}

impl Renderer for FrameLog {
    fn render(&mut self, viewer: &ViewerState) {
        self.frames.push(Frame {
            viewer: viewer.id(),
            orientation: viewer.orientation(),
            slice: viewer.slice(),
            roll: viewer.camera().roll_degrees(),
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationOutcome {
    Slice { change: SliceChange },
    Orientation {
        from: SliceOrientation,
        to: SliceOrientation,
        slice: usize,
    },
}

impl NavigationOutcome {
    pub fn needs_render(self) -> bool {
        match self {
            Self::Slice { change } => change.is_moved(),
            Self::Orientation { .. } => true,
        }
    }
}

pub const DEFAULT_PAGE_STEP: usize = 10;

/// Largest page step a navigator moves by; bigger steps behave like this one.
pub const MAX_PAGE_STEP: usize = isize::MAX as usize;

/// Executes key commands against a single viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceNavigator {
    pub policy: BoundaryPolicy,
    pub page_step: usize,
}

impl Default for SliceNavigator {
    fn default() -> Self {
        Self {
            policy: BoundaryPolicy::default(),
            page_step: DEFAULT_PAGE_STEP,
        }
    }
}

impl SliceNavigator {
    pub fn new(policy: BoundaryPolicy, page_step: usize) -> Self {
        Self {
            policy,
            page_step: page_step.clamp(1, MAX_PAGE_STEP),
        }
    }

    /// Updates `viewer` for `command` without rendering.
    pub fn apply(&self, viewer: &mut ViewerState, command: KeyCommand) -> NavigationOutcome {
        let page =
            isize::try_from(self.page_step.clamp(1, MAX_PAGE_STEP)).unwrap_or(isize::MAX);
        let change = match command {
            KeyCommand::NextSlice => advance(viewer, Direction::Forward, self.policy),
            KeyCommand::PreviousSlice => advance(viewer, Direction::Backward, self.policy),
            KeyCommand::PageForward => advance_by(viewer, page, self.policy),
            KeyCommand::PageBackward => advance_by(viewer, -page, self.policy),
            KeyCommand::FirstSlice => jump_to(viewer, 0),
            KeyCommand::LastSlice => {
                let last = viewer.last_slice();
                jump_to(viewer, last)
            }
            KeyCommand::CycleOrientation => {
                let from = viewer.orientation();
                let to = cycle_orientation(viewer);
                return NavigationOutcome::Orientation {
                    from,
                    to,
                    slice: viewer.slice(),
                };
            }
        };
        NavigationOutcome::Slice { change }
    }

    /// Applies `command` and re-renders `viewer` if anything visible changed. No other viewer
    /// is touched.
    pub fn handle<R: Renderer + ?Sized>(
        &self,
        viewer: &mut ViewerState,
        command: KeyCommand,
        renderer: &mut R,
    ) -> NavigationOutcome {
        let outcome = self.apply(viewer, command);
        if outcome.needs_render() {
            renderer.render(viewer);
        } else {
            debug!(viewer = %viewer.id(), %command, "navigation left the viewer unchanged");
        }
        outcome
    }
}
