// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted viewer preferences (control panel values + last model).
//!
//! Enums are stored by their string keys so the file stays readable and
//! survives variant reordering. Values are not validated here; the viewer
//! applies them through its clamping panel setter.

use serde::{Deserialize, Serialize};

/// Saved preferences for one viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ViewerPrefs {
    /// Scene folder.
    pub scene: ScenePrefs,
    /// Environment folder.
    pub environment: EnvironmentPrefs,
    /// Camera folder.
    pub camera: CameraPrefs,
    /// Lighting folder.
    pub lighting: LightingPrefs,
    /// Post-processing folder.
    pub post: PostPrefs,
    /// URL of the most recently selected model.
    pub last_model_url: Option<String>,
}

/// Scene mode and helper toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenePrefs {
    /// Scene mode key (`"model"`, `"water"`, `"void"`, `"starfield"`, `"hangar"`).
    pub mode: String,
    /// Force the placeholder box.
    pub show_placeholder: bool,
    /// Grid helper.
    pub show_grid: bool,
    /// Axes helper.
    pub show_axes: bool,
}

impl Default for ScenePrefs {
    fn default() -> Self {
        Self {
            mode: "model".into(),
            show_placeholder: false,
            show_grid: false,
            show_axes: false,
        }
    }
}

/// Environment backdrop selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EnvironmentPrefs {
    /// Preset key (`"sunset"`, `"galaxy"`, `"sphere"`), `None` for no backdrop.
    pub preset: Option<String>,
}

/// Orbit-control behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraPrefs {
    /// Spin around the target when idle.
    pub auto_rotate: bool,
    /// Auto-rotate speed.
    pub auto_rotate_speed: f32,
    /// Zoom speed.
    pub zoom_speed: f32,
    /// Pan speed.
    pub pan_speed: f32,
    /// Orbit damping factor.
    pub damping_factor: f32,
}

impl Default for CameraPrefs {
    fn default() -> Self {
        Self {
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            zoom_speed: 1.2,
            pan_speed: 0.8,
            damping_factor: 0.08,
        }
    }
}

/// Light intensities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingPrefs {
    /// Ambient light.
    pub ambient: f32,
    /// Key light.
    pub key: f32,
    /// Fill light.
    pub fill: f32,
    /// Contact-shadow plane (Hangar only).
    pub contact_shadows: bool,
}

impl Default for LightingPrefs {
    fn default() -> Self {
        Self {
            ambient: 0.9,
            key: 1.4,
            fill: 0.6,
            contact_shadows: true,
        }
    }
}

/// Post-processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostPrefs {
    /// Ambient-occlusion radius.
    pub ao_radius: f32,
    /// Ambient-occlusion intensity.
    pub ao_intensity: f32,
    /// Filmic tone mapping.
    pub tone_mapping: bool,
}

impl Default for PostPrefs {
    fn default() -> Self {
        Self {
            ao_radius: 1.2,
            ao_intensity: 0.6,
            tone_mapping: true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn partial_documents_fill_defaults() {
        let prefs: ViewerPrefs =
            serde_json::from_str(r#"{"lighting": {"ambient": 1.5}}"#).unwrap();
        assert!((prefs.lighting.ambient - 1.5).abs() < f32::EPSILON);
        assert!((prefs.lighting.key - 1.4).abs() < f32::EPSILON);
        assert_eq!(prefs.scene.mode, "model");
        assert_eq!(prefs.environment.preset, None);
    }
}
