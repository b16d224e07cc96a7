// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Environment imagery and procedural skies drawn behind the model.

use core::fmt;

/// Backdrop rendered as the scene background and image-based light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Backdrop {
    /// Plain clear color.
    None,
    /// Six cubemap faces in `+x, -x, +y, -y, +z, -z` order.
    Cubemap {
        /// Preset name the faces belong to.
        name: &'static str,
        /// Face image paths.
        faces: [&'static str; 6],
    },
    /// One equirectangular panorama.
    Equirect {
        /// Preset name.
        name: &'static str,
        /// Image path.
        image: &'static str,
    },
    /// A renderer-provided named preset (e.g. "warehouse").
    Preset {
        /// Renderer preset name.
        name: &'static str,
        /// Background blur in `[0, 1]`.
        blur: f32,
    },
}

impl Backdrop {
    /// Name of the imagery, `None` for a plain background.
    pub const fn name(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Cubemap { name, .. } | Self::Equirect { name, .. } | Self::Preset { name, .. } => {
                Some(*name)
            }
        }
    }
}

impl fmt::Display for Backdrop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Cubemap { name, .. } => write!(f, "cubemap:{name}"),
            Self::Equirect { name, .. } => write!(f, "equirect:{name}"),
            Self::Preset { name, .. } => write!(f, "preset:{name}"),
        }
    }
}

/// Procedural star shell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Starfield {
    /// Inner radius of the shell.
    pub radius: f32,
    /// Shell thickness.
    pub depth: f32,
    /// Number of stars.
    pub count: u32,
    /// Star size factor.
    pub factor: f32,
    /// Fade stars towards the shell edge.
    pub fade: bool,
    /// Twinkle animation speed.
    pub speed: f32,
}

impl Starfield {
    /// Stars per unit of shell volume; useful for comparing configurations.
    pub fn density(&self) -> f32 {
        let outer = self.radius + self.depth;
        let volume = 4.0 / 3.0 * core::f32::consts::PI * (outer.powi(3) - self.radius.powi(3));
        if volume > 0.0 {
            self.count as f32 / volume
        } else {
            0.0
        }
    }
}
