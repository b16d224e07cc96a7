// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Descriptor table: what each [`SceneMode`] needs on stage.

use cosmo_geom::{CameraPose, Vec3};

use crate::{Backdrop, SceneMode, Starfield};

/// RGBA color with 8-bit components.
pub type ColorRgba8 = [u8; 4];

/// Vertical field of view shared by every mode, in degrees.
pub const SCENE_FOV_Y_DEGREES: f32 = 75.0;

/// Where a mode takes its environment backdrop from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnvironmentPolicy {
    /// Use `environment.preset` from the control panel.
    UserPreset,
    /// Always use this backdrop; the panel preset is ignored.
    Fixed(Backdrop),
    /// No environment imagery.
    Disabled,
}

/// A directional light in the rig.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Light position; it shines towards the origin.
    pub position: Vec3,
    /// Intensity multiplier.
    pub intensity: f32,
    /// Whether the light casts shadows.
    pub cast_shadow: bool,
}

/// Ambient + key + fill lighting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightingRig {
    /// Ambient intensity.
    pub ambient: f32,
    /// Key light (shadow caster).
    pub key: DirectionalLight,
    /// Fill light.
    pub fill: DirectionalLight,
}

impl LightingRig {
    /// Copy of the rig with the three intensities replaced.
    #[must_use]
    pub fn with_intensities(mut self, ambient: f32, key: f32, fill: f32) -> Self {
        self.ambient = ambient;
        self.key.intensity = key;
        self.fill.intensity = fill;
        self
    }
}

/// Floor grid helper.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    /// Edge length.
    pub size: f32,
    /// Number of divisions per edge.
    pub divisions: u32,
}

/// Axes helper.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxesSpec {
    /// Length of each axis line.
    pub size: f32,
}

/// Horizontal reflective plane at `y = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaterPlane {
    /// Edge length.
    pub size: f32,
    /// Tessellation per edge.
    pub segments: u32,
    /// Surface color.
    pub color: ColorRgba8,
    /// PBR metalness.
    pub metalness: f32,
    /// PBR roughness.
    pub roughness: f32,
}

/// Soft contact-shadow plane under the model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactShadowSpec {
    /// Shadow opacity.
    pub opacity: f32,
    /// Plane scale.
    pub scale: f32,
    /// Blur radius.
    pub blur: f32,
    /// Capture distance above the plane.
    pub far: f32,
}

/// Auxiliary geometry a mode supports; `None` means never drawn in this mode.
///
/// Grid, axes, and contact shadows are additionally gated by panel toggles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuxFlags {
    /// Grid helper, shown when `scene.showGrid`.
    pub grid: Option<GridSpec>,
    /// Axes helper, shown when `scene.showAxes`.
    pub axes: Option<AxesSpec>,
    /// Water plane, always shown when present.
    pub water_plane: Option<WaterPlane>,
    /// Contact shadows, shown when `lighting.contactShadows`.
    pub contact_shadows: Option<ContactShadowSpec>,
}

/// Everything a mode declares about its stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneDescriptor {
    /// The mode described.
    pub mode: SceneMode,
    /// Backdrop source.
    pub environment: EnvironmentPolicy,
    /// Procedural starfield, drawn in addition to the environment.
    pub starfield: Option<Starfield>,
    /// Light positions and default intensities.
    pub lighting: LightingRig,
    /// Supported auxiliary geometry.
    pub aux: AuxFlags,
    /// Camera used when no asset framing applies.
    pub default_camera: CameraPose,
    /// Whether the loaded asset is drawn.
    pub hosts_asset: bool,
    /// Fullscreen caption; `None` title means "use the asset name".
    pub caption_title: Option<&'static str>,
    /// Fullscreen caption subtitle.
    pub caption_subtitle: &'static str,
}

const AMBIENT: f32 = 0.9;
const KEY: f32 = 1.4;
const FILL: f32 = 0.6;

const MODEL_GRID: GridSpec = GridSpec {
    size: 50.0,
    divisions: 50,
};

const AXES: AxesSpec = AxesSpec { size: 10.0 };

const fn rig(key: Vec3, fill: Vec3) -> LightingRig {
    LightingRig {
        ambient: AMBIENT,
        key: DirectionalLight {
            position: key,
            intensity: KEY,
            cast_shadow: true,
        },
        fill: DirectionalLight {
            position: fill,
            intensity: FILL,
            cast_shadow: false,
        },
    }
}

const MODEL_RIG: LightingRig = rig(Vec3::new(12.0, 18.0, 10.0), Vec3::new(-10.0, -4.0, -10.0));
const STAGE_RIG: LightingRig = rig(Vec3::new(10.0, 15.0, 10.0), Vec3::new(-10.0, -5.0, -10.0));

/// Pure lookup of the descriptor for `mode`.
pub fn describe(mode: SceneMode) -> SceneDescriptor {
    let asset_stage = SceneDescriptor {
        mode,
        environment: EnvironmentPolicy::UserPreset,
        starfield: None,
        lighting: MODEL_RIG,
        aux: AuxFlags {
            grid: Some(MODEL_GRID),
            axes: Some(AXES),
            water_plane: None,
            contact_shadows: None,
        },
        default_camera: CameraPose::DEFAULT,
        hosts_asset: true,
        caption_title: None,
        caption_subtitle: "Interactive 3D model",
    };

    match mode {
        SceneMode::Model => asset_stage,
        SceneMode::Starfield => SceneDescriptor {
            starfield: Some(Starfield {
                radius: 120.0,
                depth: 50.0,
                count: 9000,
                factor: 4.0,
                fade: true,
                speed: 0.4,
            }),
            ..asset_stage
        },
        SceneMode::Hangar => SceneDescriptor {
            environment: EnvironmentPolicy::Fixed(Backdrop::Preset {
                name: "warehouse",
                blur: 0.65,
            }),
            aux: AuxFlags {
                contact_shadows: Some(ContactShadowSpec {
                    opacity: 0.55,
                    scale: 25.0,
                    blur: 2.0,
                    far: 25.0,
                }),
                ..asset_stage.aux
            },
            ..asset_stage
        },
        SceneMode::Water => SceneDescriptor {
            mode,
            environment: EnvironmentPolicy::Disabled,
            starfield: None,
            lighting: STAGE_RIG,
            aux: AuxFlags {
                grid: Some(GridSpec {
                    size: 100.0,
                    divisions: 20,
                }),
                axes: None,
                water_plane: Some(WaterPlane {
                    size: 120.0,
                    segments: 64,
                    color: [0x1b, 0x26, 0x3b, 0xff],
                    metalness: 0.7,
                    roughness: 0.3,
                }),
                contact_shadows: None,
            },
            default_camera: CameraPose::new(Vec3::new(15.0, 10.0, 15.0), Vec3::ZERO),
            hosts_asset: false,
            caption_title: Some("Water Scene"),
            caption_subtitle: "Reflective ocean plane",
        },
        SceneMode::Void => SceneDescriptor {
            mode,
            environment: EnvironmentPolicy::Disabled,
            starfield: None,
            lighting: STAGE_RIG,
            aux: AuxFlags {
                grid: Some(MODEL_GRID),
                axes: None,
                water_plane: None,
                contact_shadows: None,
            },
            default_camera: CameraPose::DEFAULT,
            hosts_asset: false,
            caption_title: Some("Void Scene"),
            caption_subtitle: "Minimal light rig",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_matches_mode() {
        for m in SceneMode::ALL {
            let d = describe(m);
            assert_eq!(d.mode, m);
            assert_eq!(d.hosts_asset, m.hosts_asset());
        }
    }

    #[test]
    fn hangar_pins_warehouse_backdrop() {
        let d = describe(SceneMode::Hangar);
        assert!(matches!(
            d.environment,
            EnvironmentPolicy::Fixed(Backdrop::Preset { name: "warehouse", .. })
        ));
        assert!(d.aux.contact_shadows.is_some());
    }

    #[test]
    fn only_water_has_a_water_plane() {
        for m in SceneMode::ALL {
            assert_eq!(describe(m).aux.water_plane.is_some(), m == SceneMode::Water);
        }
    }
}
