// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene port contract for Cosmo renderers.
//!
//! This crate defines the contract between the viewer session and whatever
//! draws the scene. It holds the closed set of scene modes with their
//! descriptor table, the loaded-asset node graph, and the per-frame bundle.
//!
//! # Design Principles
//!
//! - **Renderers are dumb** — they receive a [`FrameBundle`] once per refresh and draw it.
//! - **Closed modes** — [`SceneMode`] is an enum; every mode has exactly one [`SceneDescriptor`].
//! - **No time ownership** — all timing comes from the host, not the renderer.
//!
//! # Crate Features
//!
//! - `test-utils`: exposes `MockScenePort` for headless tests.

use thiserror::Error;

/// Failure while producing a [`NodeGraph`] from an asset URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Transport failure (connection refused, HTTP status, I/O).
    #[error("network error: {0}")]
    Network(String),
    /// The asset does not exist at the given location.
    #[error("asset not found: {0}")]
    NotFound(String),
    /// Bytes were fetched but do not decode as a model.
    #[error("malformed asset: {0}")]
    Malformed(String),
    /// The asset uses a container or feature the loader cannot read.
    #[error("unsupported asset: {0}")]
    Unsupported(String),
}

impl LoadError {
    /// Human-readable reason without the category prefix.
    pub fn reason(&self) -> &str {
        match self {
            Self::Network(r) | Self::NotFound(r) | Self::Malformed(r) | Self::Unsupported(r) => r,
        }
    }
}

mod backdrop;
mod bundle;
mod graph;
#[cfg(feature = "test-utils")]
mod mock;
mod mode;
mod port;
mod registry;

pub use backdrop::{Backdrop, Starfield};
pub use bundle::{
    AuxGeometry, CameraRig, Caption, FrameBundle, Hud, OrbitBehavior, Placeholder,
    PostProcessing, Subject, Viewport,
};
pub use graph::{MeshInstance, NodeGraph};
#[cfg(feature = "test-utils")]
pub use mock::MockScenePort;
pub use mode::{EnvironmentPreset, SceneMode, UnknownKey};
pub use port::ScenePort;
pub use registry::{
    describe, AuxFlags, AxesSpec, ColorRgba8, ContactShadowSpec, DirectionalLight,
    EnvironmentPolicy, GridSpec, LightingRig, SceneDescriptor, WaterPlane, SCENE_FOV_Y_DEGREES,
};
