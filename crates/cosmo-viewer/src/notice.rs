// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Outbound notifications for host page chrome.

use cosmo_geom::FramingError;
use cosmo_scene_port::{LoadError, SceneMode};

use crate::FullscreenRequestError;

/// Something host chrome may want to react to. Drained with
/// [`crate::ViewerSession::drain_notices`].
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    /// The mirrored fullscreen state; also sent as `false` when a request is denied.
    FullScreenChanged(bool),
    /// The active scene mode changed.
    SceneChanged(SceneMode),
    /// An asset was committed.
    AssetLoaded {
        /// Asset URL.
        url: String,
        /// Display name.
        name: String,
    },
    /// The latest load failed; the placeholder stays up.
    LoadFailed {
        /// Asset URL.
        url: String,
        /// Failure reason.
        error: LoadError,
    },
    /// Framing failed and the default camera is in use.
    FramingFallback {
        /// Asset URL.
        url: String,
        /// Why framing failed.
        error: FramingError,
    },
    /// The host refused fullscreen.
    FullscreenDenied(FullscreenRequestError),
}
