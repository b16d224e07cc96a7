// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Axis-aligned bounding boxes for loaded assets.

use glam::{Mat4, Vec3};

/// Axis-aligned bounding box in model/world coordinates.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - A box may be flat or a single point; framing rejects those separately.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Constructs an AABB from two opposite corners, in any order.
    #[must_use]
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Builds an AABB centered at `center` with the given full `size`.
    #[must_use]
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Returns the minimum corner.
    #[must_use]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Full extent along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Largest component of [`Aabb::size`].
    #[must_use]
    pub fn max_dim(&self) -> f32 {
        self.size().max_element()
    }

    /// True when every corner component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Returns the union of two AABBs.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Computes the AABB that bounds this box after transformation by `mat`.
    ///
    /// Evaluates the eight corners under the affine transform and builds a new
    /// axis-aligned box containing them.
    #[must_use]
    pub fn transformed(&self, mat: &Mat4) -> Self {
        let [minx, miny, minz] = self.min.to_array();
        let [maxx, maxy, maxz] = self.max.to_array();
        let corners = [
            Vec3::new(minx, miny, minz),
            Vec3::new(minx, miny, maxz),
            Vec3::new(minx, maxy, minz),
            Vec3::new(minx, maxy, maxz),
            Vec3::new(maxx, miny, minz),
            Vec3::new(maxx, miny, maxz),
            Vec3::new(maxx, maxy, minz),
            Vec3::new(maxx, maxy, maxz),
        ];
        let mut min = mat.transform_point3(corners[0]);
        let mut max = min;
        for c in &corners[1..] {
            let p = mat.transform_point3(*c);
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }
}
