// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene port trait defining the renderer contract.

use crate::{FrameBundle, Viewport};

/// Scene rendering port trait.
///
/// Implementors receive one [`FrameBundle`] per display refresh and draw it.
/// No time ownership and no domain logic: everything a frame shows is in the bundle.
pub trait ScenePort {
    /// Draw one frame.
    fn present(&mut self, frame: &FrameBundle);

    /// Resize the drawable surface.
    fn resize(&mut self, viewport: Viewport);

    /// Dispose all GPU resources. Called once, when the session unmounts.
    fn dispose(&mut self);
}
