use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::annotation::{CornerOverlay, OverlaySink};
use crate::config::InspectorConfig;
use crate::model::{SliceOrientation, Volume};
use crate::navigation::{FrameLog, Renderer};
use crate::probe::{PickResult, PickSurface, resolve};
use crate::view::{DisplayPoint, SlicePlaneSurface, ViewerId, ViewerState};

use super::handlers::{annotation_handler, navigation_handler};
use super::{AppError, Result, ViewerEvent};

/// One viewer together with everything it owns: pick surface, overlay, renderer and the
/// last known pointer position.
pub struct ViewerSlot<O, R> {
    state: ViewerState,
    surface: Box<dyn PickSurface>,
    overlay: O,
    renderer: R,
    pointer: Option<DisplayPoint>,
}

impl<O, R> ViewerSlot<O, R> {
    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewerState {
        &mut self.state
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn pointer(&self) -> Option<DisplayPoint> {
        self.pointer
    }

    /// Resolves the stored pointer against the current slice.
    pub fn pick(&self) -> PickResult {
        match self.pointer {
            Some(display) => resolve(self.surface.as_ref(), &self.state, display),
            None => PickResult::Miss,
        }
    }

    /// Split borrow for handlers that mutate the viewer and draw it in one go.
    pub fn parts_mut(&mut self) -> (&mut ViewerState, &mut O, &mut R) {
        (&mut self.state, &mut self.overlay, &mut self.renderer)
    }
}

/// Callback run for every event delivered to its viewer, in registration order.
pub type Handler<O, R> = Box<dyn FnMut(&mut ViewerSlot<O, R>, &ViewerEvent) -> Result<()>>;

struct ViewerEntry<O, R> {
    slot: ViewerSlot<O, R>,
    handlers: Vec<Handler<O, R>>,
}

/// Viewers keyed by id, each with its own handler chain. Events are processed synchronously
/// and completely, one at a time.
pub struct Session<O = CornerOverlay, R = FrameLog> {
    viewers: BTreeMap<ViewerId, ViewerEntry<O, R>>,
}

impl<O, R> Default for Session<O, R> {
    fn default() -> Self {
        Self {
            viewers: BTreeMap::new(),
        }
    }
}

impl<O, R> Session<O, R>
where
    O: OverlaySink + 'static,
    R: Renderer + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_viewer_with(
        &mut self,
        state: ViewerState,
        surface: Box<dyn PickSurface>,
        overlay: O,
        renderer: R,
    ) -> Result<ViewerId> {
        let id = state.id();
        if self.viewers.contains_key(&id) {
            return Err(AppError::DuplicateViewer(id));
        }
        let slot = ViewerSlot {
            state,
            surface,
            overlay,
            renderer,
            pointer: None,
        };
        self.viewers.insert(
            id,
            ViewerEntry {
                slot,
                handlers: Vec::new(),
            },
        );
        Ok(id)
    }

    pub fn add_viewer(&mut self, state: ViewerState) -> Result<ViewerId>
    where
        O: Default,
        R: Default,
    {
        self.add_viewer_with(
            state,
            Box::new(SlicePlaneSurface),
            O::default(),
            R::default(),
        )
    }

    pub fn bind<F>(&mut self, id: ViewerId, handler: F) -> Result<()>
    where
        F: FnMut(&mut ViewerSlot<O, R>, &ViewerEvent) -> Result<()> + 'static,
    {
        let entry = self
            .viewers
            .get_mut(&id)
            .ok_or(AppError::UnknownViewer(id))?;
        entry.handlers.push(Box::new(handler));
        Ok(())
    }

    /// Registers the slice navigation handler followed by the corner annotation handler.
    pub fn bind_inspection(&mut self, id: ViewerId, config: &InspectorConfig) -> Result<()> {
        self.bind(id, navigation_handler(config))?;
        self.bind(id, annotation_handler(config.annotation.clone()))
    }

    /// Delivers `event` to viewer `id` only. Pointer events update the stored pointer
    /// before any handler runs.
    pub fn dispatch(&mut self, id: ViewerId, event: &ViewerEvent) -> Result<()> {
        let entry = self
            .viewers
            .get_mut(&id)
            .ok_or(AppError::UnknownViewer(id))?;
        match event {
            ViewerEvent::PointerMove { x, y } => {
                entry.slot.pointer = Some(DisplayPoint::new(*x, *y));
            }
            ViewerEvent::PointerLeave => entry.slot.pointer = None,
            _ => {}
        }
        debug!(viewer = %id, event = event.kind(), "dispatching event");
        for handler in &mut entry.handlers {
            handler(&mut entry.slot, event)?;
        }
        Ok(())
    }

    pub fn viewer(&self, id: ViewerId) -> Option<&ViewerSlot<O, R>> {
        self.viewers.get(&id).map(|entry| &entry.slot)
    }

    pub fn viewer_mut(&mut self, id: ViewerId) -> Option<&mut ViewerSlot<O, R>> {
        self.viewers.get_mut(&id).map(|entry| &mut entry.slot)
    }

    pub fn viewer_ids(&self) -> impl Iterator<Item = ViewerId> + '_ {
        self.viewers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.viewers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewers.is_empty()
    }
}

impl<O, R> Session<O, R>
where
    O: OverlaySink + Default + 'static,
    R: Renderer + Default + 'static,
{
    /// Builds a viewer for `orientation` configured from `config`, registers it with the
    /// inspection handlers and draws its first frame and overlay.
    pub fn open_viewer(
        &mut self,
        id: ViewerId,
        volume: Arc<Volume>,
        orientation: SliceOrientation,
        config: &InspectorConfig,
    ) -> Result<ViewerId> {
        let window_level = config.window_level_for(&volume);
        let state = ViewerState::new(id, volume, orientation)
            .with_viewport(config.display.viewport)
            .with_corrections(config.navigation.corrections)
            .with_window_level(window_level);
        self.add_viewer(state)?;
        self.bind_inspection(id, config)?;
        if let Some(slot) = self.viewer_mut(id) {
            let (state, _, renderer) = slot.parts_mut();
            renderer.render(state);
        }
        self.dispatch(id, &ViewerEvent::PointerLeave)?;
        Ok(id)
    }

    /// Sagittal, coronal and axial viewers (ids 0, 1, 2) over one shared volume.
    pub fn triple(volume: Arc<Volume>, config: &InspectorConfig) -> Result<Self> {
        let mut session = Self::new();
        for orientation in SliceOrientation::ALL {
            session.open_viewer(
                ViewerId(orientation.index() as u32),
                volume.clone(),
                orientation,
                config,
            )?;
        }
        Ok(session)
    }
}
