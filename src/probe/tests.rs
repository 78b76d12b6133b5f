use std::sync::Arc;

use glam::DVec3;

use super::{
    PickResult, append_voxel_components, format_voxel_value, resolve, voxel_at_world,
    voxel_components_f64,
};
use crate::model::{ScalarKind, SliceOrientation, Volume, VolumeGeometry, VoxelIndex};
use crate::view::{DisplayPoint, SlicePlaneSurface, ViewerId, ViewerState};

fn geometry(dims: [usize; 3]) -> VolumeGeometry {
    VolumeGeometry::with_unit_spacing(dims).expect("geometry")
}

macro_rules! volumes_of_every_kind {
    ($components:expr, $($ty:ty),*) => {
        vec![$(
            Volume::from_fn(geometry([3, 2, 2]), $components, |voxel, component| {
                (voxel.i + voxel.j + voxel.k + component) as $ty
            })
            .expect("volume"),
        )*]
    };
}

#[test]
fn every_scalar_kind_formats_one_value_per_component() {
    for components in [1, 2, 4] {
        let volumes = volumes_of_every_kind!(components, u8, i8, u16, i16, u32, i32, f32, f64);
        let kinds = volumes.iter().map(Volume::scalar_kind).collect::<Vec<_>>();
        assert_eq!(kinds, ScalarKind::ALL.to_vec());
        for volume in &volumes {
            for k in 0..2 {
                for j in 0..2 {
                    for i in 0..3 {
                        let text = format_voxel_value(volume, VoxelIndex::new(i, j, k));
                        let inner = text
                            .strip_prefix("( ")
                            .and_then(|rest| rest.strip_suffix(" )"))
                            .expect("wrapped");
                        assert_eq!(inner.split(", ").count(), components, "{text}");
                    }
                }
            }
        }
    }
}

#[test]
fn values_use_the_natural_textual_form_of_their_type() {
    let floats = Volume::from_vec(geometry([2, 1, 1]), 2, vec![200.0_f32, 0.25, -1.5, 3.0])
        .expect("volume");
    assert_eq!(format_voxel_value(&floats, VoxelIndex::new(0, 0, 0)), "( 200, 0.25 )");
    assert_eq!(format_voxel_value(&floats, VoxelIndex::new(1, 0, 0)), "( -1.5, 3 )");

    let signed = Volume::from_vec(geometry([1, 1, 1]), 1, vec![-42_i16]).expect("volume");
    assert_eq!(format_voxel_value(&signed, VoxelIndex::new(0, 0, 0)), "( -42 )");
}

#[test]
fn appending_writes_only_the_tail() {
    let volume = Volume::from_vec(geometry([1, 1, 1]), 3, vec![1_u8, 2, 3]).expect("volume");
    let mut text = String::from("(0, 0, 0, ");
    append_voxel_components(&mut text, &volume, VoxelIndex::new(0, 0, 0));
    assert_eq!(text, "(0, 0, 0, 1, 2, 3 )");
    assert_eq!(
        voxel_components_f64(&volume, VoxelIndex::new(0, 0, 0)),
        vec![1.0, 2.0, 3.0]
    );
}

#[test]
#[should_panic]
fn out_of_range_voxels_are_a_caller_bug() {
    let volume = Volume::from_vec(geometry([1, 1, 1]), 1, vec![1_u8]).expect("volume");
    let _ = format_voxel_value(&volume, VoxelIndex::new(1, 0, 0));
}

#[test]
fn border_points_round_and_clamp_into_the_grid() {
    let geometry = geometry([10, 10, 5]);
    assert_eq!(
        voxel_at_world(&geometry, DVec3::new(-0.49, 9.49, 4.2)),
        PickResult::Hit {
            voxel: VoxelIndex::new(0, 9, 4)
        }
    );
    assert_eq!(
        voxel_at_world(&geometry, DVec3::new(4.5, 4.5, 2.0)),
        PickResult::Hit {
            voxel: VoxelIndex::new(5, 5, 2)
        }
    );
    assert_eq!(
        voxel_at_world(&geometry, DVec3::new(-0.51, 0.0, 0.0)),
        PickResult::Miss
    );
    assert_eq!(
        voxel_at_world(&geometry, DVec3::new(0.0, 0.0, 4.6)),
        PickResult::Miss
    );
    assert_eq!(
        voxel_at_world(&geometry, DVec3::new(f64::NAN, 0.0, 0.0)),
        PickResult::Miss
    );
}

#[test]
fn spacing_and_origin_are_honoured() {
    let geometry = VolumeGeometry::new([4, 4, 4], [2.0, 0.5, 1.0], [10.0, -1.0, 0.0])
        .expect("geometry");
    assert_eq!(
        voxel_at_world(&geometry, DVec3::new(14.2, 0.0, 3.0)).voxel(),
        Some(VoxelIndex::new(2, 2, 3))
    );
}

#[test]
fn surface_misses_and_hits_map_to_pick_results() {
    let volume = Arc::new(
        Volume::from_fn(geometry([10, 10, 5]), 1, |voxel, _| voxel.k as u8).expect("volume"),
    );
    let viewer = ViewerState::new(ViewerId(2), volume, SliceOrientation::Axial);

    let nothing = |_: &ViewerState, _: DisplayPoint| -> Option<DVec3> { None };
    assert_eq!(resolve(&nothing, &viewer, DisplayPoint::new(1.0, 1.0)), PickResult::Miss);

    let far = |_: &ViewerState, _: DisplayPoint| -> Option<DVec3> {
        Some(DVec3::new(50.0, 0.0, 0.0))
    };
    assert_eq!(resolve(&far, &viewer, DisplayPoint::new(1.0, 1.0)), PickResult::Miss);

    let center = resolve(&SlicePlaneSurface, &viewer, viewer.viewport().center());
    assert!(center.is_hit());
    assert_eq!(center.voxel().map(|voxel| voxel.k), Some(viewer.slice()));
}
