mod error;
mod events;
mod handlers;
mod script;
mod session;

#[cfg(test)]
mod tests;

pub use error::{AppError, Result};
pub use events::ViewerEvent;
pub use script::{
    ReplayReport, ReplayScript, ReplayStep, ScriptedEvent, load_script, save_report,
};
pub use session::{Handler, Session, ViewerSlot};
