// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Camera auto-framing: fit a bounding box into a perspective view.

use core::f32::consts::PI;

use glam::Vec3;
use thiserror::Error;

use crate::Aabb;

/// Distance multiplier applied on top of the exact fit so the model does not
/// touch the viewport edges.
pub const FRAMING_PADDING: f32 = 1.5;

/// Position plus look-at target; fully defines view orientation (up is +Y).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera looks at; orbit controls pivot around it.
    pub look_at: Vec3,
}

impl CameraPose {
    /// Pose used when nothing better is known.
    pub const DEFAULT: Self = Self::new(Vec3::new(0.0, 4.0, 12.0), Vec3::ZERO);

    /// Builds a pose from a position and a target.
    #[must_use]
    pub const fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    /// Distance between the camera and its target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.position.distance(self.look_at)
    }

    /// True when both points are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.look_at.is_finite()
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Reasons a bounding box cannot be framed.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FramingError {
    /// The asset produced no geometry to bound.
    #[error("asset has no bounded geometry")]
    Empty,
    /// Every extent is zero (a point) or not positive.
    #[error("bounding box is degenerate (max extent {max_dim})")]
    Degenerate {
        /// Largest extent that was observed.
        max_dim: f32,
    },
    /// The box (or the computed pose) contains NaN or infinity.
    #[error("bounding box is not finite")]
    NonFinite,
    /// Vertical field of view outside `(0, π)`.
    #[error("vertical field of view {0} rad is outside (0, π)")]
    InvalidFov(f32),
}

/// Computes a camera pose that fits `bounds` in a view with vertical FOV
/// `fov_y` (radians).
///
/// The camera sits at `(d, center.y, d)` and aims at the box center, where
/// `d = (max_dim / 2) / tan(fov_y / 2) * FRAMING_PADDING`. Pure: identical
/// inputs always yield bit-identical poses.
pub fn frame(bounds: &Aabb, fov_y: f32) -> Result<CameraPose, FramingError> {
    if !bounds.is_finite() {
        return Err(FramingError::NonFinite);
    }
    if !fov_y.is_finite() || fov_y <= 0.0 || fov_y >= PI {
        return Err(FramingError::InvalidFov(fov_y));
    }
    let max_dim = bounds.max_dim();
    if max_dim <= 0.0 {
        return Err(FramingError::Degenerate { max_dim });
    }

    let center = bounds.center();
    let distance = (max_dim / 2.0 / (fov_y / 2.0).tan()).abs() * FRAMING_PADDING;
    let pose = CameraPose::new(Vec3::new(distance, center.y, distance), center);
    if pose.is_finite() {
        Ok(pose)
    } else {
        Err(FramingError::NonFinite)
    }
}

/// Frames an optional box, treating `None` as an empty asset.
pub fn frame_optional(bounds: Option<&Aabb>, fov_y: f32) -> Result<CameraPose, FramingError> {
    bounds.map_or(Err(FramingError::Empty), |b| frame(b, fov_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_box_is_degenerate() {
        let b = Aabb::from_corners(Vec3::ONE, Vec3::ONE);
        assert!(matches!(
            frame(&b, 1.0),
            Err(FramingError::Degenerate { .. })
        ));
    }

    #[test]
    fn fov_bounds_are_exclusive() {
        let b = Aabb::from_center_size(Vec3::ZERO, Vec3::ONE);
        assert_eq!(frame(&b, 0.0), Err(FramingError::InvalidFov(0.0)));
        assert_eq!(frame(&b, PI), Err(FramingError::InvalidFov(PI)));
    }

    #[test]
    fn missing_bounds_are_empty() {
        assert_eq!(frame_optional(None, 1.0), Err(FramingError::Empty));
    }
}
