// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Control panel model: named parameters with declared ranges.
//!
//! Every mutation goes through [`ControlPanel::set`], which clamps numbers
//! into range and reports a [`PanelChange`] only when the stored value moved.

use core::fmt;
use core::str::FromStr;

use cosmo_app_core::prefs::{
    CameraPrefs, EnvironmentPrefs, LightingPrefs, PostPrefs, ScenePrefs, ViewerPrefs,
};
use cosmo_scene_port::{describe, EnvironmentPreset, SceneMode};
use thiserror::Error;
use tracing::debug;

/// Folder a parameter is grouped under in the panel UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Folder {
    /// Scene mode and helpers.
    Scene,
    /// Backdrop preset.
    Environment,
    /// Orbit controls.
    Camera,
    /// Light intensities.
    Lighting,
    /// Post-processing.
    Post,
}

impl Folder {
    /// Every folder, in display order.
    pub const ALL: [Self; 5] = [
        Self::Scene,
        Self::Environment,
        Self::Camera,
        Self::Lighting,
        Self::Post,
    ];

    /// Folder title.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scene => "Scene",
            Self::Environment => "Environment",
            Self::Camera => "Camera",
            Self::Lighting => "Lighting",
            Self::Post => "Post",
        }
    }
}

/// A named control-panel parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Param {
    /// `scene.mode`.
    SceneMode,
    /// `scene.showPlaceholder`.
    ShowPlaceholder,
    /// `scene.showGrid`.
    ShowGrid,
    /// `scene.showAxes`.
    ShowAxes,
    /// `environment.preset`.
    EnvironmentPreset,
    /// `camera.autoRotate`.
    AutoRotate,
    /// `camera.autoRotateSpeed`, `[0, 10]`.
    AutoRotateSpeed,
    /// `camera.zoomSpeed`, `[0.2, 4]`.
    ZoomSpeed,
    /// `camera.panSpeed`, `[0.1, 2]`.
    PanSpeed,
    /// `camera.dampingFactor`, `[0.01, 0.2]`.
    DampingFactor,
    /// `lighting.ambient`, `[0, 2]`.
    Ambient,
    /// `lighting.key`, `[0, 3]`.
    Key,
    /// `lighting.fill`, `[0, 3]`.
    Fill,
    /// `lighting.contactShadows`.
    ContactShadows,
    /// `post.aoRadius`, `[0, 5]`.
    AoRadius,
    /// `post.aoIntensity`, `[0, 2]`.
    AoIntensity,
    /// `post.toneMapping`.
    ToneMapping,
}

/// Value type a parameter accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    /// Toggle.
    Bool,
    /// Clamped float.
    Number,
    /// [`SceneMode`].
    Mode,
    /// Optional [`EnvironmentPreset`].
    Preset,
}

impl ParamKind {
    const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Number => "number",
            Self::Mode => "scene mode",
            Self::Preset => "environment preset",
        }
    }
}

/// Declared bounds, default, and UI step of a numeric parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumericRange {
    /// Lower bound (inclusive).
    pub min: f32,
    /// Upper bound (inclusive).
    pub max: f32,
    /// Initial value.
    pub default: f32,
    /// Slider step.
    pub step: f32,
}

impl NumericRange {
    const fn new(min: f32, max: f32, default: f32, step: f32) -> Self {
        Self {
            min,
            max,
            default,
            step,
        }
    }

    /// Clamp `v` into `[min, max]`.
    pub fn clamp(&self, v: f32) -> f32 {
        v.clamp(self.min, self.max)
    }
}

impl Param {
    /// Every parameter, in panel order.
    pub const ALL: [Self; 17] = [
        Self::SceneMode,
        Self::ShowPlaceholder,
        Self::ShowGrid,
        Self::ShowAxes,
        Self::EnvironmentPreset,
        Self::AutoRotate,
        Self::AutoRotateSpeed,
        Self::ZoomSpeed,
        Self::PanSpeed,
        Self::DampingFactor,
        Self::Ambient,
        Self::Key,
        Self::Fill,
        Self::ContactShadows,
        Self::AoRadius,
        Self::AoIntensity,
        Self::ToneMapping,
    ];

    /// Dotted key, e.g. `lighting.ambient`.
    pub const fn key(self) -> &'static str {
        match self {
            Self::SceneMode => "scene.mode",
            Self::ShowPlaceholder => "scene.showPlaceholder",
            Self::ShowGrid => "scene.showGrid",
            Self::ShowAxes => "scene.showAxes",
            Self::EnvironmentPreset => "environment.preset",
            Self::AutoRotate => "camera.autoRotate",
            Self::AutoRotateSpeed => "camera.autoRotateSpeed",
            Self::ZoomSpeed => "camera.zoomSpeed",
            Self::PanSpeed => "camera.panSpeed",
            Self::DampingFactor => "camera.dampingFactor",
            Self::Ambient => "lighting.ambient",
            Self::Key => "lighting.key",
            Self::Fill => "lighting.fill",
            Self::ContactShadows => "lighting.contactShadows",
            Self::AoRadius => "post.aoRadius",
            Self::AoIntensity => "post.aoIntensity",
            Self::ToneMapping => "post.toneMapping",
        }
    }

    /// Short widget label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::SceneMode => "Mode",
            Self::ShowPlaceholder => "Placeholder",
            Self::ShowGrid => "Grid",
            Self::ShowAxes => "Axes",
            Self::EnvironmentPreset => "Preset",
            Self::AutoRotate => "Auto rotate",
            Self::AutoRotateSpeed => "Rotate speed",
            Self::ZoomSpeed => "Zoom speed",
            Self::PanSpeed => "Pan speed",
            Self::DampingFactor => "Damping",
            Self::Ambient => "Ambient",
            Self::Key => "Key light",
            Self::Fill => "Fill light",
            Self::ContactShadows => "Contact shadows",
            Self::AoRadius => "AO radius",
            Self::AoIntensity => "AO intensity",
            Self::ToneMapping => "Tone mapping",
        }
    }

    /// Folder the parameter lives in.
    pub const fn folder(self) -> Folder {
        match self {
            Self::SceneMode | Self::ShowPlaceholder | Self::ShowGrid | Self::ShowAxes => {
                Folder::Scene
            }
            Self::EnvironmentPreset => Folder::Environment,
            Self::AutoRotate
            | Self::AutoRotateSpeed
            | Self::ZoomSpeed
            | Self::PanSpeed
            | Self::DampingFactor => Folder::Camera,
            Self::Ambient | Self::Key | Self::Fill | Self::ContactShadows => Folder::Lighting,
            Self::AoRadius | Self::AoIntensity | Self::ToneMapping => Folder::Post,
        }
    }

    /// Accepted value type.
    pub const fn kind(self) -> ParamKind {
        match self {
            Self::SceneMode => ParamKind::Mode,
            Self::EnvironmentPreset => ParamKind::Preset,
            Self::ShowPlaceholder
            | Self::ShowGrid
            | Self::ShowAxes
            | Self::AutoRotate
            | Self::ContactShadows
            | Self::ToneMapping => ParamKind::Bool,
            _ => ParamKind::Number,
        }
    }

    /// Declared range for numeric parameters, `None` otherwise.
    pub const fn range(self) -> Option<NumericRange> {
        Some(match self {
            Self::AutoRotateSpeed => NumericRange::new(0.0, 10.0, 2.0, 0.5),
            Self::ZoomSpeed => NumericRange::new(0.2, 4.0, 1.2, 0.1),
            Self::PanSpeed => NumericRange::new(0.1, 2.0, 0.8, 0.1),
            Self::DampingFactor => NumericRange::new(0.01, 0.2, 0.08, 0.01),
            Self::Ambient => NumericRange::new(0.0, 2.0, 0.9, 0.1),
            Self::Key => NumericRange::new(0.0, 3.0, 1.4, 0.1),
            Self::Fill => NumericRange::new(0.0, 3.0, 0.6, 0.1),
            Self::AoRadius => NumericRange::new(0.0, 5.0, 1.2, 0.1),
            Self::AoIntensity => NumericRange::new(0.0, 2.0, 0.6, 0.05),
            _ => return None,
        })
    }

    /// Parameters in `folder`, in panel order.
    pub fn in_folder(folder: Folder) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |p| p.folder() == folder)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Param {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.key() == s)
            .ok_or_else(|| PanelError::UnknownParam(s.to_owned()))
    }
}

/// A parameter value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    /// Toggle state.
    Bool(bool),
    /// Number (clamped on `set`).
    Number(f32),
    /// Scene mode.
    Mode(SceneMode),
    /// Environment preset or none.
    Preset(Option<EnvironmentPreset>),
}

impl ParamValue {
    const fn kind(&self) -> ParamKind {
        match self {
            Self::Bool(_) => ParamKind::Bool,
            Self::Number(_) => ParamKind::Number,
            Self::Mode(_) => ParamKind::Mode,
            Self::Preset(_) => ParamKind::Preset,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Mode(m) => f.write_str(m.key()),
            Self::Preset(Some(p)) => f.write_str(p.key()),
            Self::Preset(None) => f.write_str("none"),
        }
    }
}

/// Misuse of the panel API. Out-of-range numbers are never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    /// Value type does not match the parameter.
    #[error("{param} expects a {expected} value, got {got}")]
    WrongType {
        /// Parameter being set.
        param: Param,
        /// Expected value type.
        expected: &'static str,
        /// Supplied value type.
        got: &'static str,
    },
    /// No parameter has this key.
    #[error("unknown parameter `{0}`")]
    UnknownParam(String),
}

/// Flat record of every parameter value. See [`Param::key`] for the
/// dotted names and [`Param::range`] for numeric bounds.
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub struct ControlPanelState {
    /// Active scene mode.
    pub mode: SceneMode,
    pub show_placeholder: bool,
    pub show_grid: bool,
    pub show_axes: bool,
    /// Environment preset; `None` shows no backdrop.
    pub preset: Option<EnvironmentPreset>,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    pub ambient: f32,
    pub key: f32,
    pub fill: f32,
    pub contact_shadows: bool,
    pub ao_radius: f32,
    pub ao_intensity: f32,
    pub tone_mapping: bool,
}

const fn default_of(p: Param) -> f32 {
    match p.range() {
        Some(r) => r.default,
        None => 0.0,
    }
}

impl Default for ControlPanelState {
    fn default() -> Self {
        Self {
            mode: SceneMode::Model,
            show_placeholder: false,
            show_grid: false,
            show_axes: false,
            preset: None,
            auto_rotate: false,
            auto_rotate_speed: default_of(Param::AutoRotateSpeed),
            zoom_speed: default_of(Param::ZoomSpeed),
            pan_speed: default_of(Param::PanSpeed),
            damping_factor: default_of(Param::DampingFactor),
            ambient: default_of(Param::Ambient),
            key: default_of(Param::Key),
            fill: default_of(Param::Fill),
            contact_shadows: true,
            ao_radius: default_of(Param::AoRadius),
            ao_intensity: default_of(Param::AoIntensity),
            tone_mapping: true,
        }
    }
}

impl ControlPanelState {
    fn number_slot(&mut self, p: Param) -> Option<&mut f32> {
        Some(match p {
            Param::AutoRotateSpeed => &mut self.auto_rotate_speed,
            Param::ZoomSpeed => &mut self.zoom_speed,
            Param::PanSpeed => &mut self.pan_speed,
            Param::DampingFactor => &mut self.damping_factor,
            Param::Ambient => &mut self.ambient,
            Param::Key => &mut self.key,
            Param::Fill => &mut self.fill,
            Param::AoRadius => &mut self.ao_radius,
            Param::AoIntensity => &mut self.ao_intensity,
            _ => return None,
        })
    }

    fn bool_slot(&mut self, p: Param) -> Option<&mut bool> {
        Some(match p {
            Param::ShowPlaceholder => &mut self.show_placeholder,
            Param::ShowGrid => &mut self.show_grid,
            Param::ShowAxes => &mut self.show_axes,
            Param::AutoRotate => &mut self.auto_rotate,
            Param::ContactShadows => &mut self.contact_shadows,
            Param::ToneMapping => &mut self.tone_mapping,
            _ => return None,
        })
    }

    /// Current value of `p`.
    pub fn get(&self, p: Param) -> ParamValue {
        match p {
            Param::SceneMode => ParamValue::Mode(self.mode),
            Param::EnvironmentPreset => ParamValue::Preset(self.preset),
            Param::ShowPlaceholder => ParamValue::Bool(self.show_placeholder),
            Param::ShowGrid => ParamValue::Bool(self.show_grid),
            Param::ShowAxes => ParamValue::Bool(self.show_axes),
            Param::AutoRotate => ParamValue::Bool(self.auto_rotate),
            Param::ContactShadows => ParamValue::Bool(self.contact_shadows),
            Param::ToneMapping => ParamValue::Bool(self.tone_mapping),
            Param::AutoRotateSpeed => ParamValue::Number(self.auto_rotate_speed),
            Param::ZoomSpeed => ParamValue::Number(self.zoom_speed),
            Param::PanSpeed => ParamValue::Number(self.pan_speed),
            Param::DampingFactor => ParamValue::Number(self.damping_factor),
            Param::Ambient => ParamValue::Number(self.ambient),
            Param::Key => ParamValue::Number(self.key),
            Param::Fill => ParamValue::Number(self.fill),
            Param::AoRadius => ParamValue::Number(self.ao_radius),
            Param::AoIntensity => ParamValue::Number(self.ao_intensity),
        }
    }
}

/// A stored value that actually changed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelChange {
    /// Parameter that changed.
    pub param: Param,
    /// Value now stored (after clamping).
    pub value: ParamValue,
    /// Panel revision after the change.
    pub revision: u64,
}

/// A user interaction produced by a panel UI, applied through the session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanelInput {
    /// Set a parameter.
    Set(Param, ParamValue),
    /// Reframe the camera on the current asset.
    Recenter,
    /// Restore the active mode's lighting template.
    ResetLighting,
}

/// The control panel: state plus the change contract.
#[derive(Debug, Default)]
pub struct ControlPanel {
    state: ControlPanelState,
    revision: u64,
    recenter_requests: u64,
}

impl ControlPanel {
    /// Panel with every parameter at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of every value.
    pub fn state(&self) -> &ControlPanelState {
        &self.state
    }

    /// Bumped once per stored change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Current value of `p`.
    pub fn get(&self, p: Param) -> ParamValue {
        self.state.get(p)
    }

    /// Store `value` for `param`, clamping numbers into range.
    ///
    /// Returns `Ok(None)` when the stored value is unchanged, including a
    /// NaN number, which is ignored.
    pub fn set(&mut self, param: Param, value: ParamValue) -> Result<Option<PanelChange>, PanelError> {
        if param.kind() != value.kind() {
            return Err(PanelError::WrongType {
                param,
                expected: param.kind().name(),
                got: value.kind().name(),
            });
        }

        let stored = match (param, value) {
            (Param::SceneMode, ParamValue::Mode(m)) => {
                if self.state.mode == m {
                    return Ok(None);
                }
                self.state.mode = m;
                value
            }
            (Param::EnvironmentPreset, ParamValue::Preset(p)) => {
                if self.state.preset == p {
                    return Ok(None);
                }
                self.state.preset = p;
                value
            }
            (_, ParamValue::Bool(b)) => {
                let Some(slot) = self.state.bool_slot(param) else {
                    return Ok(None);
                };
                if *slot == b {
                    return Ok(None);
                }
                *slot = b;
                value
            }
            (_, ParamValue::Number(requested)) => {
                let (Some(range), Some(slot)) = (param.range(), self.state.number_slot(param))
                else {
                    return Ok(None);
                };
                if requested.is_nan() {
                    debug!(key = param.key(), "ignoring NaN panel input");
                    return Ok(None);
                }
                let clamped = range.clamp(requested);
                if clamped.to_bits() != requested.to_bits() {
                    debug!(key = param.key(), requested, stored = clamped, "clamped panel input");
                }
                if slot.to_bits() == clamped.to_bits() {
                    return Ok(None);
                }
                *slot = clamped;
                ParamValue::Number(clamped)
            }
            _ => return Ok(None),
        };

        self.revision += 1;
        debug!(key = param.key(), value = %stored, revision = self.revision, "panel parameter changed");
        Ok(Some(PanelChange {
            param,
            value: stored,
            revision: self.revision,
        }))
    }

    /// Ask for the camera to be reframed on the current asset. Stores nothing;
    /// returns the running count of requests.
    pub fn recenter(&mut self) -> u64 {
        self.recenter_requests += 1;
        self.recenter_requests
    }

    /// Restore the lighting template of `mode`.
    pub fn reset_lighting(&mut self, mode: SceneMode) -> Vec<PanelChange> {
        let rig = describe(mode).lighting;
        [
            (Param::Ambient, rig.ambient),
            (Param::Key, rig.key.intensity),
            (Param::Fill, rig.fill.intensity),
        ]
        .into_iter()
        .filter_map(|(p, v)| self.set(p, ParamValue::Number(v)).ok().flatten())
        .collect()
    }

    /// Apply saved prefs through `set`, so stored numbers are clamped too.
    /// Unknown enum keys keep the current value.
    pub fn apply_prefs(&mut self, prefs: &ViewerPrefs) -> Vec<PanelChange> {
        let mut values = vec![
            (Param::ShowPlaceholder, ParamValue::Bool(prefs.scene.show_placeholder)),
            (Param::ShowGrid, ParamValue::Bool(prefs.scene.show_grid)),
            (Param::ShowAxes, ParamValue::Bool(prefs.scene.show_axes)),
            (Param::AutoRotate, ParamValue::Bool(prefs.camera.auto_rotate)),
            (Param::AutoRotateSpeed, ParamValue::Number(prefs.camera.auto_rotate_speed)),
            (Param::ZoomSpeed, ParamValue::Number(prefs.camera.zoom_speed)),
            (Param::PanSpeed, ParamValue::Number(prefs.camera.pan_speed)),
            (Param::DampingFactor, ParamValue::Number(prefs.camera.damping_factor)),
            (Param::Ambient, ParamValue::Number(prefs.lighting.ambient)),
            (Param::Key, ParamValue::Number(prefs.lighting.key)),
            (Param::Fill, ParamValue::Number(prefs.lighting.fill)),
            (Param::ContactShadows, ParamValue::Bool(prefs.lighting.contact_shadows)),
            (Param::AoRadius, ParamValue::Number(prefs.post.ao_radius)),
            (Param::AoIntensity, ParamValue::Number(prefs.post.ao_intensity)),
            (Param::ToneMapping, ParamValue::Bool(prefs.post.tone_mapping)),
        ];
        match prefs.scene.mode.parse::<SceneMode>() {
            Ok(m) => values.push((Param::SceneMode, ParamValue::Mode(m))),
            Err(err) => debug!(%err, "ignoring saved scene mode"),
        }
        match prefs.environment.preset.as_deref().map(str::parse::<EnvironmentPreset>) {
            None => values.push((Param::EnvironmentPreset, ParamValue::Preset(None))),
            Some(Ok(p)) => values.push((Param::EnvironmentPreset, ParamValue::Preset(Some(p)))),
            Some(Err(err)) => debug!(%err, "ignoring saved environment preset"),
        }
        values
            .into_iter()
            .filter_map(|(p, v)| self.set(p, v).ok().flatten())
            .collect()
    }

    /// Snapshot the panel as prefs.
    pub fn export_prefs(&self, last_model_url: Option<&str>) -> ViewerPrefs {
        let s = &self.state;
        ViewerPrefs {
            scene: ScenePrefs {
                mode: s.mode.key().to_owned(),
                show_placeholder: s.show_placeholder,
                show_grid: s.show_grid,
                show_axes: s.show_axes,
            },
            environment: EnvironmentPrefs {
                preset: s.preset.map(|p| p.key().to_owned()),
            },
            camera: CameraPrefs {
                auto_rotate: s.auto_rotate,
                auto_rotate_speed: s.auto_rotate_speed,
                zoom_speed: s.zoom_speed,
                pan_speed: s.pan_speed,
                damping_factor: s.damping_factor,
            },
            lighting: LightingPrefs {
                ambient: s.ambient,
                key: s.key,
                fill: s.fill,
                contact_shadows: s.contact_shadows,
            },
            post: PostPrefs {
                ao_radius: s.ao_radius,
                ao_intensity: s.ao_intensity,
                tone_mapping: s.tone_mapping,
            },
            last_model_url: last_model_url.map(str::to_owned),
        }
    }
}
