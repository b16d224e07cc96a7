// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Asset loading, framing, and composition through a mounted session.

mod common;

use approx::assert_relative_eq;
use common::{floor_box, graph, mount, mount_ready};
use cosmo_geom::{CameraPose, Vec3};
use cosmo_scene_port::{
    describe, AuxGeometry, Backdrop, EnvironmentPreset, LoadError, MockScenePort, SceneMode,
    ScenePort, Subject,
};
use cosmo_viewer::{
    AssetRef, HeadlessHost, LoadState, Notice, Param, ParamValue, PanelInput,
};

#[test]
fn floor_box_is_framed_from_the_diagonal() {
    let host = HeadlessHost::new();
    let mut session = mount_ready(&host, "rover.glb");
    assert_eq!(session.load_state(), &LoadState::Ready);

    let rig = session.frame().camera;
    assert_relative_eq!(rig.fov_y, 75f32.to_radians());
    assert_relative_eq!(rig.pose.position.x, 1.9548, epsilon = 1e-3);
    assert_relative_eq!(rig.pose.position.y, 1.0, epsilon = 1e-6);
    assert_relative_eq!(rig.pose.position.z, 1.9548, epsilon = 1e-3);
    assert_eq!(rig.pose.look_at, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(rig.snap, 1);
    assert!(matches!(session.frame().subject, Subject::Asset(_)));
}

#[test]
fn result_for_a_superseded_request_is_dropped() {
    let host = HeadlessHost::new();
    let mut session = mount(&host, Some("a.glb"));
    session.set_asset(AssetRef::from_url("b.glb"));
    assert_eq!(session.loader_mut().issued.len(), 2);

    // B lands first, then the slow A response.
    assert!(session.loader_mut().resolve("b.glb", Ok(floor_box("b.glb"))));
    session.poll_loads();
    assert!(session
        .loader_mut()
        .resolve("a.glb", Ok(graph("a.glb", Vec3::splat(-50.0), Vec3::splat(50.0)))));
    assert_eq!(session.poll_loads(), 1);

    assert!(matches!(
        &session.frame().subject,
        Subject::Asset(shown) if shown.source() == "b.glb"
    ));
    assert_eq!(session.asset().map(|a| a.url.as_str()), Some("b.glb"));
    let loaded: Vec<_> = session
        .drain_notices()
        .into_iter()
        .filter(|n| matches!(n, Notice::AssetLoaded { .. }))
        .collect();
    assert_eq!(loaded.len(), 1);
}

#[test]
fn stale_result_while_loading_keeps_the_placeholder() {
    let host = HeadlessHost::new();
    let mut session = mount(&host, Some("a.glb"));
    session.set_asset(AssetRef::from_url("b.glb"));
    session.loader_mut().resolve("a.glb", Ok(floor_box("a.glb")));
    session.poll_loads();

    assert!(matches!(session.load_state(), LoadState::Loading { .. }));
    assert!(matches!(session.frame().subject, Subject::Placeholder(_)));
}

#[test]
fn failed_load_stays_in_error_without_retrying() {
    let host = HeadlessHost::new();
    let mut session = mount(&host, Some("missing.glb"));
    session
        .loader_mut()
        .resolve("missing.glb", Err(LoadError::NotFound("missing.glb".into())));
    session.poll_loads();

    assert!(matches!(session.load_state(), LoadState::Error(LoadError::NotFound(_))));
    assert!(matches!(session.frame().subject, Subject::Placeholder(_)));
    assert!(matches!(
        session.drain_notices().as_slice(),
        [Notice::LoadFailed { .. }]
    ));

    for _ in 0..3 {
        assert_eq!(session.poll_loads(), 0);
    }
    assert_eq!(session.loader_mut().issued.len(), 1);

    // Selecting it again is an explicit retry.
    session.set_asset(AssetRef::from_url("missing.glb"));
    assert_eq!(session.loader_mut().issued.len(), 2);
}

#[test]
fn reselecting_the_shown_asset_is_a_no_op() {
    let host = HeadlessHost::new();
    let mut session = mount_ready(&host, "rover.glb");
    let rev = session.revision();
    session.set_asset(AssetRef::from_url("rover.glb"));
    assert_eq!(session.revision(), rev);
    assert_eq!(session.loader_mut().issued.len(), 1);
}

#[test]
fn flat_asset_falls_back_to_the_default_camera() {
    let host = HeadlessHost::new();
    let mut session = mount(&host, Some("decal.glb"));
    session
        .loader_mut()
        .resolve("decal.glb", Ok(graph("decal.glb", Vec3::ONE, Vec3::ONE)));
    session.poll_loads();

    assert_eq!(session.load_state(), &LoadState::Ready);
    assert_eq!(session.frame().camera.pose, CameraPose::DEFAULT);
    assert!(session
        .drain_notices()
        .iter()
        .any(|n| matches!(n, Notice::FramingFallback { .. })));
}

#[test]
fn placeholder_toggle_overrides_a_ready_asset() {
    let host = HeadlessHost::new();
    let mut session = mount_ready(&host, "rover.glb");
    session
        .set_param(Param::ShowPlaceholder, ParamValue::Bool(true))
        .unwrap();
    assert!(matches!(session.frame().subject, Subject::Placeholder(_)));
    assert_eq!(session.load_state(), &LoadState::Ready);

    session
        .set_param(Param::ShowPlaceholder, ParamValue::Bool(false))
        .unwrap();
    assert!(matches!(session.frame().subject, Subject::Asset(_)));
}

#[test]
fn mode_round_trip_restores_the_stage() {
    let host = HeadlessHost::new();
    let mut session = mount_ready(&host, "rover.glb");
    session.set_param(Param::ShowGrid, ParamValue::Bool(true)).unwrap();
    let mut port = MockScenePort::new();
    port.present(session.frame());
    let before = session.frame().clone();

    session
        .set_param(Param::SceneMode, ParamValue::Mode(SceneMode::Water))
        .unwrap();
    port.present(session.frame());
    let water = session.frame().clone();
    assert_eq!(water.subject, Subject::Empty);
    assert_eq!(water.camera.pose, describe(SceneMode::Water).default_camera);
    assert_eq!(port.aux_count_like(&AuxGeometry::WaterPlane(
        describe(SceneMode::Water).aux.water_plane.unwrap()
    )), 1);

    session
        .set_param(Param::SceneMode, ParamValue::Mode(SceneMode::Model))
        .unwrap();
    port.present(session.frame());
    let after = session.frame().clone();

    assert_eq!(after.subject, before.subject);
    assert_eq!(after.camera.pose, before.camera.pose);
    assert_eq!(after.aux, before.aux);
    assert_eq!(port.aux_count_like(&AuxGeometry::Grid(
        describe(SceneMode::Model).aux.grid.unwrap()
    )), 1);
    assert_eq!(session.loader_mut().issued.len(), 1);
    assert_eq!(
        session.drain_notices(),
        vec![
            Notice::SceneChanged(SceneMode::Water),
            Notice::SceneChanged(SceneMode::Model)
        ]
    );
}

#[test]
fn switching_between_asset_stages_keeps_the_camera() {
    let host = HeadlessHost::new();
    let mut session = mount_ready(&host, "rover.glb");
    session.set_param(Param::ShowAxes, ParamValue::Bool(true)).unwrap();
    let before = session.frame().clone();

    for mode in [SceneMode::Hangar, SceneMode::Starfield, SceneMode::Model] {
        session
            .set_param(Param::SceneMode, ParamValue::Mode(mode))
            .unwrap();
        assert_eq!(session.frame().camera.pose, before.camera.pose);
        assert_eq!(session.frame().camera.snap, before.camera.snap);
    }
    assert_eq!(session.frame().aux, before.aux);
    assert_eq!(session.frame().subject, before.subject);
    assert_eq!(session.load_state(), &LoadState::Ready);
}

#[test]
fn hangar_backdrop_wins_over_the_preset_and_restores_it() {
    let host = HeadlessHost::new();
    let mut session = mount_ready(&host, "rover.glb");
    session
        .set_param(
            Param::EnvironmentPreset,
            ParamValue::Preset(Some(EnvironmentPreset::Galaxy)),
        )
        .unwrap();
    assert_eq!(session.frame().backdrop, EnvironmentPreset::Galaxy.backdrop());

    session
        .set_param(Param::SceneMode, ParamValue::Mode(SceneMode::Hangar))
        .unwrap();
    assert!(matches!(
        session.frame().backdrop,
        Backdrop::Preset { name: "warehouse", .. }
    ));

    session
        .set_param(Param::SceneMode, ParamValue::Mode(SceneMode::Model))
        .unwrap();
    assert_eq!(session.frame().backdrop.name(), Some("galaxy"));
}

#[test]
fn recenter_snaps_the_camera_back() {
    let host = HeadlessHost::new();
    let mut session = mount_ready(&host, "rover.glb");
    let snap = session.frame().camera.snap;
    session.apply_input(PanelInput::Recenter).unwrap();
    assert_eq!(session.frame().camera.snap, snap + 1);
    assert_relative_eq!(session.frame().camera.pose.look_at.y, 1.0);
}

#[test]
fn panel_values_are_clamped_through_the_session() {
    let host = HeadlessHost::new();
    let mut session = mount(&host, None);
    let change = session
        .set_param(Param::AutoRotateSpeed, ParamValue::Number(25.0))
        .unwrap()
        .unwrap();
    assert_eq!(change.value, ParamValue::Number(10.0));
    assert_relative_eq!(session.frame().camera.orbit.auto_rotate_speed, 10.0);

    let rev = session.revision();
    assert_eq!(
        session
            .set_param(Param::AutoRotateSpeed, ParamValue::Number(f32::NAN))
            .unwrap(),
        None
    );
    assert_eq!(session.revision(), rev);
    assert!(session
        .set_param(Param::AutoRotateSpeed, ParamValue::Bool(true))
        .is_err());
}

#[test]
fn frames_are_recomposed_only_after_changes() {
    let host = HeadlessHost::new();
    let mut session = mount_ready(&host, "rover.glb");
    let first = session.frame().clone();
    assert_eq!(session.frame(), &first);

    host.simulate_resize(cosmo_scene_port::Viewport {
        width: 1280,
        height: 720,
        dpr: 2.0,
    });
    common::pump(&host, &mut session);
    assert_eq!(session.frame().viewport.width, 1280);
}

#[test]
fn saved_prefs_are_applied_through_the_clamp() {
    let mut prefs = cosmo_app_core::prefs::ViewerPrefs::default();
    prefs.scene.mode = "hangar".into();
    prefs.environment.preset = Some("nebula".into());
    prefs.lighting.ambient = 9.0;
    prefs.last_model_url = Some("rover.glb".into());

    let host = HeadlessHost::new();
    let session = cosmo_viewer::ViewerSession::mount(
        host.clone(),
        cosmo_asset::ScriptedLoader::new(),
        Some(AssetRef::from_url("rover.glb")),
        cosmo_viewer::SessionConfig {
            prefs: Some(prefs),
            ..cosmo_viewer::SessionConfig::default()
        },
    )
    .unwrap();

    assert_eq!(session.scene_mode(), SceneMode::Hangar);
    assert_relative_eq!(session.panel().state().ambient, 2.0);
    assert_eq!(session.panel().state().preset, None);

    let saved = session.export_prefs();
    assert_eq!(saved.scene.mode, "hangar");
    assert_eq!(saved.last_model_url.as_deref(), Some("rover.glb"));
}

#[test]
fn reset_lighting_input_restores_the_mode_template() {
    let host = HeadlessHost::new();
    let mut session = mount_ready(&host, "rover.glb");
    session
        .apply_input(PanelInput::Set(Param::Ambient, ParamValue::Number(1.7)))
        .unwrap();
    session
        .apply_input(PanelInput::Set(Param::Key, ParamValue::Number(0.2)))
        .unwrap();
    assert_relative_eq!(session.frame().lights.ambient, 1.7);

    let rev = session.revision();
    session.apply_input(PanelInput::ResetLighting).unwrap();
    assert!(session.revision() > rev);

    let template = describe(SceneMode::Model).lighting;
    let lights = session.frame().lights;
    assert_relative_eq!(lights.ambient, template.ambient);
    assert_relative_eq!(lights.key.intensity, template.key.intensity);
    assert_relative_eq!(lights.fill.intensity, template.fill.intensity);

    // Already at the template: nothing changes.
    let rev = session.revision();
    session.apply_input(PanelInput::ResetLighting).unwrap();
    assert_eq!(session.revision(), rev);
}

#[test]
fn mistyped_panel_input_is_rejected_without_a_change() {
    let host = HeadlessHost::new();
    let mut session = mount(&host, None);
    let rev = session.revision();
    assert!(session
        .apply_input(PanelInput::Set(Param::ShowGrid, ParamValue::Number(1.0)))
        .is_err());
    assert_eq!(session.revision(), rev);
}
