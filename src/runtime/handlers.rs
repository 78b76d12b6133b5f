use tracing::warn;

use crate::annotation::{AnnotationStyle, OverlaySink, build_annotation_with};
use crate::config::InspectorConfig;
use crate::model::WindowLevel;
use crate::navigation::Renderer;
use crate::view::Viewport;

use super::{Handler, Result, ViewerEvent, ViewerSlot};

/// Key and display events: moves the slice, switches orientation, resizes and re-windows,
/// redrawing only this viewer when something changed.
pub(crate) fn navigation_handler<O, R>(config: &InspectorConfig) -> Handler<O, R>
where
    O: OverlaySink + 'static,
    R: Renderer + 'static,
{
    let navigator = config.navigator();
    let bindings = config.key_bindings();
    Box::new(
        move |slot: &mut ViewerSlot<O, R>, event: &ViewerEvent| -> Result<()> {
            let command = match event {
                ViewerEvent::Key { key } => match bindings.lookup(key) {
                    Some(command) => command,
                    None => {
                        warn!(viewer = %slot.state().id(), key = %key, "ignoring unbound key");
                        return Ok(());
                    }
                },
                ViewerEvent::Command { command } => *command,
                ViewerEvent::Resize { width, height } => {
                    let (state, _, renderer) = slot.parts_mut();
                    state.set_viewport(Viewport::new(*width, *height));
                    renderer.render(state);
                    return Ok(());
                }
                ViewerEvent::WindowLevel { window, level } => {
                    let (state, _, renderer) = slot.parts_mut();
                    state.set_window_level(WindowLevel::new(*window, *level));
                    renderer.render(state);
                    return Ok(());
                }
                ViewerEvent::PointerMove { .. } | ViewerEvent::PointerLeave => return Ok(()),
            };
            let (state, _, renderer) = slot.parts_mut();
            navigator.handle(state, command, renderer);
            Ok(())
        },
    )
}

/// Rebuilds all four corner texts from the viewer state and the stored pointer after every
/// event, then pushes them to the overlay.
pub(crate) fn annotation_handler<O, R>(style: AnnotationStyle) -> Handler<O, R>
where
    O: OverlaySink + 'static,
    R: Renderer + 'static,
{
    Box::new(
        move |slot: &mut ViewerSlot<O, R>, _event: &ViewerEvent| -> Result<()> {
            let pick = slot.pick();
            let annotation = build_annotation_with(slot.state(), pick, &style);
            let (_, overlay, _) = slot.parts_mut();
            annotation.apply_to(overlay);
            Ok(())
        },
    )
}
