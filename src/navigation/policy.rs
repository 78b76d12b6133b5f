use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::SliceOrientation;
use crate::view::ViewerState;

/// What a slice request does when it would leave `[0, extent - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Stop at the first/last slice.
    #[default]
    Clamp,
    /// Ignore any request that would overshoot.
    Reject,
    /// Continue from the opposite end.
    Wrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub const fn delta(self) -> isize {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SliceChange {
    Unchanged,
    Moved { from: usize, to: usize },
    Rejected { requested: isize },
}

impl SliceChange {
    pub fn is_moved(self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Slice reached from `current` after moving `delta`, or `None` when `policy` refuses it.
pub fn target_slice(
    current: usize,
    delta: isize,
    extent: usize,
    policy: BoundaryPolicy,
) -> Option<usize> {
    if extent == 0 {
        return None;
    }
    // Every usize + isize sum fits in i128.
    let last = (extent - 1) as i128;
    let requested = current as i128 + delta as i128;
    match policy {
        BoundaryPolicy::Clamp => Some(requested.clamp(0, last) as usize),
        BoundaryPolicy::Reject => (0..=last).contains(&requested).then_some(requested as usize),
        BoundaryPolicy::Wrap => Some(requested.rem_euclid(extent as i128) as usize),
    }
}

pub fn advance(
    viewer: &mut ViewerState,
    direction: Direction,
    policy: BoundaryPolicy,
) -> SliceChange {
    advance_by(viewer, direction.delta(), policy)
}

pub fn advance_by(viewer: &mut ViewerState, delta: isize, policy: BoundaryPolicy) -> SliceChange {
    let from = viewer.slice();
    match target_slice(from, delta, viewer.extent(), policy) {
        None => {
            debug!(viewer = %viewer.id(), from, delta, "slice request rejected at boundary");
            SliceChange::Rejected {
                requested: isize::try_from(from)
                    .unwrap_or(isize::MAX)
                    .saturating_add(delta),
            }
        }
        Some(to) if to == from => SliceChange::Unchanged,
        Some(to) => {
            viewer.set_slice(to);
            debug!(viewer = %viewer.id(), from, to, "slice changed");
            SliceChange::Moved { from, to }
        }
    }
}

/// Moves straight to `slice`, clamped to the last slice.
pub fn jump_to(viewer: &mut ViewerState, slice: usize) -> SliceChange {
    let from = viewer.slice();
    let to = slice.min(viewer.last_slice());
    if to == from {
        return SliceChange::Unchanged;
    }
    viewer.set_slice(to);
    debug!(viewer = %viewer.id(), from, to, "slice changed");
    SliceChange::Moved { from, to }
}

/// Switches to the next orientation. The slice lands in the middle and the camera is rebuilt
/// with that orientation's roll applied once.
pub fn cycle_orientation(viewer: &mut ViewerState) -> SliceOrientation {
    let from = viewer.orientation();
    let to = from.next();
    viewer.set_orientation(to);
    debug!(
        viewer = %viewer.id(),
        %from,
        %to,
        roll = viewer.camera().roll_degrees(),
        "orientation changed"
    );
    to
}
