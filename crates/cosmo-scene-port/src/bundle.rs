// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The per-frame input bundle handed to the renderer.

use std::sync::Arc;

use cosmo_geom::{CameraPose, Vec3};

use crate::{
    AxesSpec, Backdrop, ColorRgba8, ContactShadowSpec, GridSpec, LightingRig, NodeGraph,
    SceneMode, Starfield, WaterPlane,
};

/// Stand-in box drawn while an asset is pending, failed, or forced off.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placeholder {
    /// Box center.
    pub center: Vec3,
    /// Box edge lengths.
    pub size: Vec3,
    /// Diffuse color.
    pub color: ColorRgba8,
    /// Emissive color.
    pub emissive: ColorRgba8,
}

impl Placeholder {
    /// The green loading box.
    pub const LOADING_BOX: Self = Self {
        center: Vec3::new(0.0, 2.0, 0.0),
        size: Vec3::new(2.0, 2.0, 2.0),
        color: [0x00, 0xff, 0x00, 0xff],
        emissive: [0x00, 0xaa, 0x00, 0xff],
    };
}

/// What sits at the center of the stage.
#[derive(Clone, Debug, PartialEq)]
pub enum Subject {
    /// The committed asset.
    Asset(Arc<NodeGraph>),
    /// The placeholder box.
    Placeholder(Placeholder),
    /// Nothing; the mode has no asset concept.
    Empty,
}

/// Helper geometry drawn around the subject.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AuxGeometry {
    /// Floor grid.
    Grid(GridSpec),
    /// Axes helper.
    Axes(AxesSpec),
    /// Water plane.
    WaterPlane(WaterPlane),
    /// Contact-shadow plane.
    ContactShadows(ContactShadowSpec),
}

/// Live orbit-control behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitBehavior {
    /// Spin around the target when idle.
    pub auto_rotate: bool,
    /// Auto-rotate speed.
    pub auto_rotate_speed: f32,
    /// Wheel zoom speed.
    pub zoom_speed: f32,
    /// Pan speed.
    pub pan_speed: f32,
    /// Inertia damping.
    pub damping_factor: f32,
}

/// Camera inputs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    /// Pose to adopt when `snap` changes.
    pub pose: CameraPose,
    /// Vertical field of view (radians).
    pub fov_y: f32,
    /// Increments whenever the renderer must snap to `pose`, discarding user orbiting.
    pub snap: u64,
    /// Orbit-control behavior.
    pub orbit: OrbitBehavior,
}

/// Post-processing chain settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostProcessing {
    /// Tone mapping on/off.
    pub tone_mapping: bool,
    /// Ambient-occlusion sample radius.
    pub ao_radius: f32,
    /// Ambient-occlusion strength.
    pub ao_intensity: f32,
}

/// Caption shown over the viewer in fullscreen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caption {
    /// Headline.
    pub title: String,
    /// Smaller second line.
    pub subtitle: String,
}

/// Overlay text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hud {
    /// Present only while fullscreen.
    pub caption: Option<Caption>,
    /// Interaction hints.
    pub instructions: [&'static str; 2],
}

/// Drawable surface size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Width in physical pixels.
    pub width: u32,
    /// Height in physical pixels.
    pub height: u32,
    /// Device pixel ratio.
    pub dpr: f32,
}

impl Viewport {
    /// Width over height, never below `0.1`.
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        (self.width as f32 / self.height as f32).max(0.1)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            dpr: 1.0,
        }
    }
}

/// Everything the renderer needs for one refresh.
///
/// Built purely from the session's scene mode, control panel, asset slot,
/// and fullscreen mirror; two sessions in the same state compose equal bundles.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBundle {
    /// Active mode.
    pub mode: SceneMode,
    /// Model, placeholder, or nothing.
    pub subject: Subject,
    /// Environment backdrop.
    pub backdrop: Backdrop,
    /// Procedural starfield.
    pub starfield: Option<Starfield>,
    /// Lights with panel intensities applied.
    pub lights: LightingRig,
    /// Helper geometry, at most one entry per kind.
    pub aux: Vec<AuxGeometry>,
    /// Camera inputs.
    pub camera: CameraRig,
    /// Post-processing settings.
    pub post: PostProcessing,
    /// Overlay text.
    pub hud: Hud,
    /// Surface size.
    pub viewport: Viewport,
}
