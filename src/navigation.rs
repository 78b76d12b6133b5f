mod controller;
mod keys;
mod policy;


pub use controller::{
    DEFAULT_PAGE_STEP, Frame, FrameLog, MAX_PAGE_STEP, NavigationOutcome, Renderer,
    SliceNavigator,
};
pub use keys::{KeyBindings, KeyCommand};
pub use policy::{
    BoundaryPolicy, Direction, SliceChange, advance, advance_by, cycle_orientation, jump_to,
    target_slice,
};
