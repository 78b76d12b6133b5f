use std::sync::Arc;

use super::{
    AnnotationStyle, Corner, CornerAnnotation, CornerOverlay, OverlaySink, build_annotation,
    build_annotation_with, render_template,
};
use crate::model::{SliceOrientation, Volume, VolumeGeometry, VoxelIndex, WindowLevel};
use crate::probe::PickResult;
use crate::view::{ViewerId, ViewerState};

fn viewer(components: usize) -> ViewerState {
    let geometry = VolumeGeometry::with_unit_spacing([10, 10, 5]).expect("geometry");
    let volume = Volume::from_fn(geometry, components, |voxel, component| {
        if voxel == VoxelIndex::new(5, 5, 2) {
            200_u8 - component as u8
        } else {
            0
        }
    })
    .expect("volume");
    ViewerState::new(ViewerId(2), Arc::new(volume), SliceOrientation::Axial)
        .with_window_level(WindowLevel::new(400.0, 40.0))
}

#[test]
fn miss_reads_off_image_and_keeps_window_level() {
    let annotation = build_annotation(&viewer(1), PickResult::Miss);
    assert_eq!(annotation.text(Corner::BottomLeft), "Off Image");
    assert_eq!(annotation.text(Corner::TopRight), "400\n40");
    assert_eq!(annotation.text(Corner::BottomRight), "");
    assert_eq!(annotation.text(Corner::TopLeft), "");
}

#[test]
fn hit_prefixes_the_voxel_index_to_its_values() {
    let hit = PickResult::Hit {
        voxel: VoxelIndex::new(5, 5, 2),
    };
    assert_eq!(
        build_annotation(&viewer(1), hit).text(Corner::BottomLeft),
        "(5, 5, 2, 200 )"
    );
    assert_eq!(
        build_annotation(&viewer(3), hit).text(Corner::BottomLeft),
        "(5, 5, 2, 200, 199, 198 )"
    );
}

#[test]
fn annotation_is_a_pure_function_of_its_inputs() {
    let viewer = viewer(1);
    let hit = PickResult::Hit {
        voxel: VoxelIndex::new(1, 2, 3),
    };
    assert_eq!(build_annotation(&viewer, hit), build_annotation(&viewer, hit));
    assert_eq!(
        build_annotation(&viewer, hit).text(Corner::BottomLeft),
        "(1, 2, 3, 0 )"
    );
}

#[test]
fn style_overrides_text_template_and_precision() {
    let style = AnnotationStyle {
        off_image: "--".to_string(),
        top_right: "W <window> L <level>\n<slice>/<slice_max>".to_string(),
        precision: 2,
    };
    let annotation = build_annotation_with(&viewer(1), PickResult::Miss, &style);
    assert_eq!(annotation.text(Corner::BottomLeft), "--");
    assert_eq!(annotation.text(Corner::TopRight), "W 400.00 L 40.00\n2/4");
    assert_eq!(
        render_template("<level>", &viewer(1), 1),
        "40.0".to_string()
    );
}

#[test]
fn applying_pushes_every_slot_and_one_redraw() {
    let mut annotation = CornerAnnotation::default();
    annotation.set(Corner::BottomLeft, "value");
    annotation.set(Corner::TopRight, "1\n2");

    let mut overlay = CornerOverlay::default();
    overlay.set_text(Corner::TopLeft, "stale");
    annotation.apply_to(&mut overlay);
    assert_eq!(overlay.texts(), annotation.slots());
    assert_eq!(overlay.text(Corner::TopLeft), "");
    assert_eq!(overlay.redraws(), 1);
}

#[test]
fn corners_keep_their_slot_numbers() {
    for (slot, corner) in Corner::ALL.into_iter().enumerate() {
        assert_eq!(corner.slot(), slot);
        assert_eq!(Corner::from_slot(slot), Some(corner));
    }
    assert_eq!(Corner::from_slot(4), None);
}
