use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::annotation::CornerOverlay;
use crate::formats::is_yaml;
use crate::model::SliceOrientation;
use crate::navigation::FrameLog;
use crate::probe::PickResult;
use crate::view::ViewerId;

use super::{Result, Session, ViewerEvent};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    pub viewer: ViewerId,
    #[serde(flatten)]
    pub event: ViewerEvent,
}

/// Ordered list of events to replay against a session.
///
/// ```yaml
/// events:
///   - { viewer: 2, type: pointer_move, x: 256, y: 256 }
///   - { viewer: 2, type: key, key: Up }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    pub events: Vec<ScriptedEvent>,
}

pub fn load_script(path: impl AsRef<Path>) -> Result<ReplayScript> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let script = if is_yaml(path) {
        serde_yaml::from_str::<ReplayScript>(&raw)?
    } else {
        serde_json::from_str::<ReplayScript>(&raw)?
    };
    Ok(script)
}

/// Viewer snapshot taken after one replayed event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayStep {
    pub index: usize,
    pub viewer: ViewerId,
    pub event: ViewerEvent,
    pub orientation: SliceOrientation,
    pub slice: usize,
    pub pick: PickResult,
    pub corners: [String; 4],
    pub frames: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<ReplayStep>,
}

impl ReplayReport {
    pub fn last_for(&self, viewer: ViewerId) -> Option<&ReplayStep> {
        self.steps.iter().rev().find(|step| step.viewer == viewer)
    }
}

impl Session<CornerOverlay, FrameLog> {
    /// Dispatches every scripted event in order and records the target viewer afterwards.
    pub fn replay(&mut self, script: &ReplayScript) -> Result<ReplayReport> {
        let mut report = ReplayReport::default();
        for (index, scripted) in script.events.iter().enumerate() {
            self.dispatch(scripted.viewer, &scripted.event)?;
            if let Some(slot) = self.viewer(scripted.viewer) {
                report.steps.push(ReplayStep {
                    index,
                    viewer: scripted.viewer,
                    event: scripted.event.clone(),
                    orientation: slot.state().orientation(),
                    slice: slot.state().slice(),
                    pick: slot.pick(),
                    corners: slot.overlay().texts().clone(),
                    frames: slot.renderer().len(),
                });
            }
        }
        info!(events = script.events.len(), "replayed script");
        Ok(report)
    }
}

pub fn save_report(path: impl AsRef<Path>, report: &ReplayReport) -> Result<()> {
    let path = path.as_ref();
    let serialized = if is_yaml(path) {
        serde_yaml::to_string(report)?
    } else {
        serde_json::to_string_pretty(report)?
    };
    fs::write(path, serialized)?;
    Ok(())
}

