mod camera;
mod state;
mod surface;
mod viewport;


pub use camera::{Camera, CameraCorrections};
pub use state::{ViewerId, ViewerState};
pub use surface::SlicePlaneSurface;
pub use viewport::{DisplayPoint, Viewport};
