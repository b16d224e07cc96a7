// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pure frame composition: session state in, [`FrameBundle`] out.

use std::sync::Arc;

use cosmo_scene_port::{
    describe, AuxGeometry, Backdrop, CameraRig, Caption, EnvironmentPolicy, FrameBundle, Hud,
    OrbitBehavior, Placeholder, PostProcessing, SceneDescriptor, Subject, Viewport,
};

use crate::slot::{scene_fov_y, AssetSlot, LoadState};
use crate::ControlPanelState;

const ORBIT_HINT: &str = "Drag to rotate • Scroll to zoom • Right-click to pan";
const WINDOWED_HINT: &str = "Use the Expand Viewer button to enter fullscreen";
const FULLSCREEN_HINT: &str = "Press Esc or use the dashboard button to exit fullscreen";

/// Everything a frame is derived from.
#[derive(Clone, Copy, Debug)]
pub struct ComposeInputs<'a> {
    /// Panel values, including the scene mode.
    pub panel: &'a ControlPanelState,
    /// Asset slot.
    pub slot: &'a AssetSlot,
    /// Camera snap counter.
    pub camera_snap: u64,
    /// Mirrored fullscreen flag.
    pub fullscreen: bool,
    /// Surface size.
    pub viewport: Viewport,
}

fn subject(d: &SceneDescriptor, inputs: &ComposeInputs<'_>) -> Subject {
    if !d.hosts_asset {
        return Subject::Empty;
    }
    if inputs.panel.show_placeholder {
        return Subject::Placeholder(Placeholder::LOADING_BOX);
    }
    match (inputs.slot.state(), inputs.slot.graph()) {
        (LoadState::Ready, Some(graph)) => Subject::Asset(Arc::clone(graph)),
        _ => Subject::Placeholder(Placeholder::LOADING_BOX),
    }
}

fn backdrop(d: &SceneDescriptor, panel: &ControlPanelState) -> Backdrop {
    match d.environment {
        EnvironmentPolicy::UserPreset => panel.preset.map_or(Backdrop::None, |p| p.backdrop()),
        EnvironmentPolicy::Fixed(b) => b,
        EnvironmentPolicy::Disabled => Backdrop::None,
    }
}

fn aux(d: &SceneDescriptor, panel: &ControlPanelState) -> Vec<AuxGeometry> {
    let mut out = Vec::with_capacity(4);
    if let Some(w) = d.aux.water_plane {
        out.push(AuxGeometry::WaterPlane(w));
    }
    if let Some(g) = d.aux.grid.filter(|_| panel.show_grid) {
        out.push(AuxGeometry::Grid(g));
    }
    if let Some(a) = d.aux.axes.filter(|_| panel.show_axes) {
        out.push(AuxGeometry::Axes(a));
    }
    if let Some(c) = d.aux.contact_shadows.filter(|_| panel.contact_shadows) {
        out.push(AuxGeometry::ContactShadows(c));
    }
    out
}

fn hud(d: &SceneDescriptor, inputs: &ComposeInputs<'_>) -> Hud {
    let caption = inputs.fullscreen.then(|| Caption {
        title: d.caption_title.map_or_else(
            || {
                inputs
                    .slot
                    .asset()
                    .map_or_else(|| "3D Model".to_owned(), |a| a.name.clone())
            },
            str::to_owned,
        ),
        subtitle: d.caption_subtitle.to_owned(),
    });
    Hud {
        caption,
        instructions: [
            ORBIT_HINT,
            if inputs.fullscreen {
                FULLSCREEN_HINT
            } else {
                WINDOWED_HINT
            },
        ],
    }
}

/// Build the bundle for one refresh. Equal inputs give equal bundles.
///
/// Asset-hosting modes aim the camera at the framed pose when one exists;
/// every other case uses the mode's default camera.
pub fn compose_frame(inputs: &ComposeInputs<'_>) -> FrameBundle {
    let panel = inputs.panel;
    let d = describe(panel.mode);

    let pose = if d.hosts_asset {
        inputs.slot.framed_pose().unwrap_or(d.default_camera)
    } else {
        d.default_camera
    };

    FrameBundle {
        mode: panel.mode,
        subject: subject(&d, inputs),
        backdrop: backdrop(&d, panel),
        starfield: d.starfield,
        lights: d
            .lighting
            .with_intensities(panel.ambient, panel.key, panel.fill),
        aux: aux(&d, panel),
        camera: CameraRig {
            pose,
            fov_y: scene_fov_y(),
            snap: inputs.camera_snap,
            orbit: OrbitBehavior {
                auto_rotate: panel.auto_rotate,
                auto_rotate_speed: panel.auto_rotate_speed,
                zoom_speed: panel.zoom_speed,
                pan_speed: panel.pan_speed,
                damping_factor: panel.damping_factor,
            },
        },
        post: PostProcessing {
            tone_mapping: panel.tone_mapping,
            ao_radius: panel.ao_radius,
            ao_intensity: panel.ao_intensity,
        },
        hud: hud(&d, inputs),
        viewport: inputs.viewport,
    }
}

#[cfg(test)]
mod tests {
    use cosmo_scene_port::{EnvironmentPreset, SceneMode};

    use super::*;

    fn inputs<'a>(panel: &'a ControlPanelState, slot: &'a AssetSlot) -> ComposeInputs<'a> {
        ComposeInputs {
            panel,
            slot,
            camera_snap: 0,
            fullscreen: false,
            viewport: Viewport::default(),
        }
    }

    #[test]
    fn hangar_overrides_user_preset() {
        let slot = AssetSlot::default();
        let mut panel = ControlPanelState {
            preset: Some(EnvironmentPreset::Galaxy),
            ..ControlPanelState::default()
        };
        assert_eq!(compose_frame(&inputs(&panel, &slot)).backdrop.name(), Some("galaxy"));
        panel.mode = SceneMode::Hangar;
        let f = compose_frame(&inputs(&panel, &slot));
        assert_eq!(f.backdrop.name(), Some("warehouse"));
    }

    #[test]
    fn idle_slot_shows_placeholder_and_water_shows_nothing() {
        let slot = AssetSlot::default();
        let mut panel = ControlPanelState::default();
        assert_eq!(
            compose_frame(&inputs(&panel, &slot)).subject,
            Subject::Placeholder(Placeholder::LOADING_BOX)
        );
        panel.mode = SceneMode::Water;
        let f = compose_frame(&inputs(&panel, &slot));
        assert_eq!(f.subject, Subject::Empty);
        assert!(matches!(f.aux.as_slice(), [AuxGeometry::WaterPlane(_)]));
    }

    #[test]
    fn toggles_gate_helpers() {
        let slot = AssetSlot::default();
        let panel = ControlPanelState {
            show_grid: true,
            show_axes: true,
            ..ControlPanelState::default()
        };
        let f = compose_frame(&inputs(&panel, &slot));
        assert_eq!(f.aux.len(), 2);
        assert!(f.hud.caption.is_none());
    }

    #[test]
    fn fullscreen_caption_follows_mode() {
        let slot = AssetSlot::default();
        let panel = ControlPanelState {
            mode: SceneMode::Void,
            ..ControlPanelState::default()
        };
        let mut i = inputs(&panel, &slot);
        i.fullscreen = true;
        let f = compose_frame(&i);
        let caption = f.hud.caption.unwrap_or_else(|| Caption {
            title: String::new(),
            subtitle: String::new(),
        });
        assert_eq!(caption.title, "Void Scene");
        assert_eq!(caption.subtitle, "Minimal light rig");
        assert_eq!(f.hud.instructions[1], FULLSCREEN_HINT);
    }
}
