use std::cell::Cell;
use std::fs;
use std::rc::Rc;
use std::sync::Arc;

use approx::assert_relative_eq;
use tempfile::tempdir;

use super::{AppError, Session, ViewerEvent, ViewerSlot, load_script, save_report};
use crate::annotation::{Corner, CornerOverlay};
use crate::config::InspectorConfig;
use crate::model::{SliceOrientation, Volume, VolumeGeometry, VoxelIndex};
use crate::navigation::{FrameLog, KeyCommand};
use crate::probe::PickResult;
use crate::view::{DisplayPoint, SlicePlaneSurface, ViewerId, ViewerState};

const SAGITTAL: ViewerId = ViewerId(0);
const CORONAL: ViewerId = ViewerId(1);
const AXIAL: ViewerId = ViewerId(2);

fn scenario_volume() -> Arc<Volume> {
    let geometry = VolumeGeometry::with_unit_spacing([10, 10, 5]).expect("geometry");
    let volume = Volume::from_fn(geometry, 1, |voxel, _| {
        if voxel == VoxelIndex::new(5, 5, 2) { 200_u8 } else { 0 }
    })
    .expect("volume");
    Arc::new(volume)
}

fn scenario_session() -> Session {
    let mut config = InspectorConfig::default();
    config.display.window = Some(400.0);
    config.display.level = Some(40.0);
    Session::triple(scenario_volume(), &config).expect("session")
}

fn display_of(session: &Session, id: ViewerId, voxel: VoxelIndex) -> DisplayPoint {
    let state = session.viewer(id).expect("viewer").state();
    let world = state.volume().geometry().voxel_to_world(voxel);
    SlicePlaneSurface::world_to_display(state, world).expect("display point")
}

fn corner(session: &Session, id: ViewerId, corner: Corner) -> String {
    session
        .viewer(id)
        .expect("viewer")
        .overlay()
        .text(corner)
        .to_string()
}

#[test]
fn three_viewers_start_off_image_with_window_level() {
    let session = scenario_session();
    assert_eq!(session.viewer_ids().collect::<Vec<_>>(), vec![SAGITTAL, CORONAL, AXIAL]);
    for id in [SAGITTAL, CORONAL, AXIAL] {
        let slot = session.viewer(id).expect("viewer");
        assert_eq!(slot.overlay().text(Corner::BottomLeft), "Off Image");
        assert_eq!(slot.overlay().text(Corner::TopRight), "400\n40");
        assert_eq!(slot.renderer().len(), 1);
    }
    let axial = session.viewer(AXIAL).expect("axial").state();
    assert_eq!(axial.orientation(), SliceOrientation::Axial);
    assert_eq!(axial.slice(), 2);
}

#[test]
fn pointer_over_the_bright_voxel_reads_its_value() {
    let mut session = scenario_session();
    let point = display_of(&session, AXIAL, VoxelIndex::new(5, 5, 2));
    session
        .dispatch(AXIAL, &ViewerEvent::pointer(point.x, point.y))
        .expect("dispatch");
    assert_eq!(corner(&session, AXIAL, Corner::BottomLeft), "(5, 5, 2, 200 )");
    assert_eq!(corner(&session, AXIAL, Corner::TopRight), "400\n40");
    assert_eq!(
        session.viewer(AXIAL).expect("axial").pick(),
        PickResult::Hit {
            voxel: VoxelIndex::new(5, 5, 2)
        }
    );

    session
        .dispatch(AXIAL, &ViewerEvent::pointer(-40.0, -40.0))
        .expect("dispatch");
    assert_eq!(corner(&session, AXIAL, Corner::BottomLeft), "Off Image");

    session
        .dispatch(AXIAL, &ViewerEvent::pointer(point.x, point.y))
        .expect("dispatch");
    session
        .dispatch(AXIAL, &ViewerEvent::PointerLeave)
        .expect("dispatch");
    assert_eq!(corner(&session, AXIAL, Corner::BottomLeft), "Off Image");
}

#[test]
fn the_same_voxel_reads_the_same_from_every_plane() {
    let mut session = scenario_session();
    for id in [SAGITTAL, CORONAL] {
        assert_eq!(session.viewer(id).expect("viewer").state().slice(), 5, "{id}");
        let point = display_of(&session, id, VoxelIndex::new(5, 5, 2));
        session
            .dispatch(id, &ViewerEvent::pointer(point.x, point.y))
            .expect("dispatch");
        assert_eq!(corner(&session, id, Corner::BottomLeft), "(5, 5, 2, 200 )");
    }
}

#[test]
fn keys_move_only_the_target_viewer() {
    let mut session = scenario_session();
    let point = display_of(&session, AXIAL, VoxelIndex::new(5, 5, 2));
    session
        .dispatch(AXIAL, &ViewerEvent::pointer(point.x, point.y))
        .expect("dispatch");
    session.dispatch(AXIAL, &ViewerEvent::key("Up")).expect("dispatch");

    let axial = session.viewer(AXIAL).expect("axial");
    assert_eq!(axial.state().slice(), 3);
    assert_eq!(axial.renderer().len(), 2);
    assert_eq!(axial.overlay().text(Corner::BottomLeft), "(5, 5, 3, 0 )");
    for id in [SAGITTAL, CORONAL] {
        let slot = session.viewer(id).expect("viewer");
        assert_eq!(slot.renderer().len(), 1);
        assert_eq!(slot.state().slice(), 5);
    }
}

#[test]
fn boundary_keys_do_not_render() {
    let mut session = scenario_session();
    session.dispatch(AXIAL, &ViewerEvent::key("Home")).expect("dispatch");
    session.dispatch(AXIAL, &ViewerEvent::key("Down")).expect("dispatch");
    session.dispatch(AXIAL, &ViewerEvent::key("Left")).expect("dispatch");
    let axial = session.viewer(AXIAL).expect("axial");
    assert_eq!(axial.state().slice(), 0);
    assert_eq!(axial.renderer().len(), 2);

    session.dispatch(AXIAL, &ViewerEvent::key("End")).expect("dispatch");
    session.dispatch(AXIAL, &ViewerEvent::key("Up")).expect("dispatch");
    let axial = session.viewer(AXIAL).expect("axial");
    assert_eq!(axial.state().slice(), 4);
    assert_eq!(axial.renderer().len(), 3);
}

#[test]
fn forward_then_back_restores_the_slice() {
    let mut session = scenario_session();
    for (forward, back) in [("Up", "Down"), ("Right", "Left")] {
        let before = session.viewer(CORONAL).expect("coronal").state().slice();
        session.dispatch(CORONAL, &ViewerEvent::key(forward)).expect("dispatch");
        session.dispatch(CORONAL, &ViewerEvent::key(back)).expect("dispatch");
        assert_eq!(session.viewer(CORONAL).expect("coronal").state().slice(), before);
    }
}

#[test]
fn cycling_orientation_never_accumulates_roll() {
    let mut session = scenario_session();
    for _ in 0..3 {
        session.dispatch(SAGITTAL, &ViewerEvent::key("o")).expect("dispatch");
    }
    let sagittal = session.viewer(SAGITTAL).expect("sagittal");
    assert_eq!(sagittal.state().orientation(), SliceOrientation::Sagittal);
    assert_relative_eq!(sagittal.state().camera().roll_degrees(), 180.0);
    assert_relative_eq!(sagittal.state().camera().view_up().z, -1.0, epsilon = 1e-12);
    let rolls = sagittal
        .renderer()
        .frames()
        .iter()
        .map(|frame| frame.roll)
        .collect::<Vec<_>>();
    assert_eq!(rolls, vec![180.0, 180.0, 0.0, 180.0]);
}

#[test]
fn commands_resize_and_window_level_events_apply() {
    let mut session = scenario_session();
    session
        .dispatch(
            AXIAL,
            &ViewerEvent::Command {
                command: KeyCommand::PageForward,
            },
        )
        .expect("dispatch");
    session
        .dispatch(
            AXIAL,
            &ViewerEvent::WindowLevel {
                window: 80.0,
                level: 20.25,
            },
        )
        .expect("dispatch");
    session
        .dispatch(
            AXIAL,
            &ViewerEvent::Resize {
                width: 200,
                height: 100,
            },
        )
        .expect("dispatch");

    let axial = session.viewer(AXIAL).expect("axial");
    assert_eq!(axial.state().slice(), 4);
    assert_eq!(axial.overlay().text(Corner::TopRight), "80\n20");
    assert_eq!(axial.state().viewport().width, 200);
    assert_eq!(axial.renderer().len(), 4);
}

#[test]
fn unbound_keys_are_ignored() {
    let mut session = scenario_session();
    session.dispatch(AXIAL, &ViewerEvent::key("F13")).expect("dispatch");
    assert_eq!(session.viewer(AXIAL).expect("axial").renderer().len(), 1);
}

#[test]
fn unknown_and_duplicate_viewers_are_errors() {
    let mut session = scenario_session();
    assert!(matches!(
        session.dispatch(ViewerId(9), &ViewerEvent::PointerLeave),
        Err(AppError::UnknownViewer(ViewerId(9)))
    ));
    let duplicate = ViewerState::new(AXIAL, scenario_volume(), SliceOrientation::Axial);
    assert!(matches!(
        session.add_viewer(duplicate),
        Err(AppError::DuplicateViewer(AXIAL))
    ));
}

#[test]
fn custom_handlers_run_after_the_built_in_ones() {
    let mut session: Session<CornerOverlay, FrameLog> = Session::new();
    let state = ViewerState::new(ViewerId(7), scenario_volume(), SliceOrientation::Axial);
    let id = session.add_viewer(state).expect("add");
    session
        .bind_inspection(id, &InspectorConfig::default())
        .expect("bind");

    let seen = Rc::new(Cell::new(0));
    let counter = seen.clone();
    session
        .bind(
            id,
            move |slot: &mut ViewerSlot<CornerOverlay, FrameLog>, _: &ViewerEvent| {
                assert_eq!(slot.state().slice(), 3);
                counter.set(counter.get() + 1);
                Ok(())
            },
        )
        .expect("bind");
    session.dispatch(id, &ViewerEvent::key("Up")).expect("dispatch");
    assert_eq!(seen.get(), 1);
}

#[test]
fn replay_scripts_report_each_step() {
    let dir = tempdir().expect("tempdir");
    let script_path = dir.path().join("events.yaml");
    fs::write(
        &script_path,
        r#"
events:
  - { viewer: 2, type: pointer_move, x: 256, y: 256 }
  - { viewer: 2, type: key, key: Up }
  - { viewer: 0, type: command, command: cycle_orientation }
  - { viewer: 2, type: pointer_leave }
"#,
    )
    .expect("write script");

    let script = load_script(&script_path).expect("load");
    assert_eq!(script.events.len(), 4);
    let mut session = scenario_session();
    let report = session.replay(&script).expect("replay");
    assert_eq!(report.steps.len(), 4);
    assert!(report.steps[0].pick.is_hit());
    assert_eq!(report.steps[1].slice, 3);
    assert_eq!(report.steps[2].orientation, SliceOrientation::Coronal);
    assert_eq!(report.steps[3].corners[0], "Off Image");
    assert_eq!(
        report.last_for(AXIAL).map(|step| step.frames),
        Some(2)
    );

    let report_path = dir.path().join("report.json");
    save_report(&report_path, &report).expect("save");
    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).expect("read")).expect("json");
    assert_eq!(saved["steps"][1]["event"]["type"], "key");
    assert_eq!(saved["steps"][0]["pick"]["kind"], "hit");
}
