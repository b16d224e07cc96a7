// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene modes and user-selectable environment presets.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::Backdrop;

/// A string key that does not name any variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{key}`")]
pub struct UnknownKey {
    /// What was being parsed (e.g. "scene mode").
    pub kind: &'static str,
    /// The rejected input.
    pub key: String,
}

/// Presentation mode of the viewer. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SceneMode {
    /// Loaded model under the user's environment backdrop.
    #[default]
    Model,
    /// Reflective ocean plane; no model.
    Water,
    /// Minimal light rig on an empty stage; no model.
    Void,
    /// Model surrounded by a procedural starfield.
    Starfield,
    /// Model on a shadowed hangar floor with a fixed warehouse backdrop.
    Hangar,
}

impl SceneMode {
    /// Every mode, in panel order.
    pub const ALL: [Self; 5] = [
        Self::Model,
        Self::Water,
        Self::Void,
        Self::Starfield,
        Self::Hangar,
    ];

    /// Stable key used in prefs and logs.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Water => "water",
            Self::Void => "void",
            Self::Starfield => "starfield",
            Self::Hangar => "hangar",
        }
    }

    /// Display label for menus.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Model => "Model",
            Self::Water => "Water",
            Self::Void => "Void",
            Self::Starfield => "Starfield",
            Self::Hangar => "Hangar",
        }
    }

    /// Whether the mode displays the loaded asset at all.
    pub const fn hosts_asset(self) -> bool {
        !matches!(self, Self::Water | Self::Void)
    }
}

impl fmt::Display for SceneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SceneMode {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownKey {
                kind: "scene mode",
                key: s.to_owned(),
            })
    }
}

/// User-selectable environment backdrop. `None` in the panel means no backdrop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnvironmentPreset {
    /// Six-face sunset cubemap.
    Sunset,
    /// Six-face galaxy cubemap.
    Galaxy,
    /// Single equirectangular panorama.
    Sphere,
}

impl EnvironmentPreset {
    /// Every preset, in panel order.
    pub const ALL: [Self; 3] = [Self::Sunset, Self::Galaxy, Self::Sphere];

    /// Stable key used in prefs and logs.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Sunset => "sunset",
            Self::Galaxy => "galaxy",
            Self::Sphere => "sphere",
        }
    }

    /// Display label for menus.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sunset => "Sunset",
            Self::Galaxy => "Galaxy",
            Self::Sphere => "Sphere",
        }
    }

    /// Imagery this preset resolves to.
    pub const fn backdrop(self) -> Backdrop {
        match self {
            Self::Sunset => Backdrop::Cubemap {
                name: "sunset",
                faces: [
                    "/cubemap/sunset/right.png",
                    "/cubemap/sunset/left.png",
                    "/cubemap/sunset/top.png",
                    "/cubemap/sunset/bot.png",
                    "/cubemap/sunset/front.png",
                    "/cubemap/sunset/back.png",
                ],
            },
            Self::Galaxy => Backdrop::Cubemap {
                name: "galaxy",
                faces: [
                    "/cubemap/galaxy/right.png",
                    "/cubemap/galaxy/left.png",
                    "/cubemap/galaxy/top.png",
                    "/cubemap/galaxy/bot.png",
                    "/cubemap/galaxy/front.png",
                    "/cubemap/galaxy/back.png",
                ],
            },
            Self::Sphere => Backdrop::Equirect {
                name: "sphere",
                image: "/cubemap/sphere.jpg",
            },
        }
    }
}

impl fmt::Display for EnvironmentPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EnvironmentPreset {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownKey {
                kind: "environment preset",
                key: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_parse_back() {
        for m in SceneMode::ALL {
            assert_eq!(m.key().parse::<SceneMode>(), Ok(m));
        }
        for p in EnvironmentPreset::ALL {
            assert_eq!(p.key().parse::<EnvironmentPreset>(), Ok(p));
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = "lava".parse::<SceneMode>().unwrap_err();
        assert_eq!(err.key, "lava");
    }

    #[test]
    fn only_water_and_void_drop_the_asset() {
        let hosting: Vec<_> = SceneMode::ALL.into_iter().filter(|m| !m.hosts_asset()).collect();
        assert_eq!(hosting, vec![SceneMode::Water, SceneMode::Void]);
    }
}
