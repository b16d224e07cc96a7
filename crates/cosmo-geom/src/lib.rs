// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry primitives for the Cosmo model viewer.

This crate provides:
- Axis-aligned bounding boxes (`Aabb`).
- Camera poses (`CameraPose`) and the bounding-box auto-framer (`frame`).

Design notes:
- Deterministic: no hidden state; framing the same box twice yields the same pose.
- Float32 throughout, built on `glam`.
"]

mod aabb;
mod framing;

pub use aabb::Aabb;
pub use framing::{frame, frame_optional, CameraPose, FramingError, FRAMING_PADDING};
pub use glam::{Mat4, Vec3};
