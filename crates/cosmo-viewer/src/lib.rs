// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cosmo viewer core: control panel, viewer session, and host port.
//!
//! The [`ViewerSession`] owns one asset slot, one scene mode, one control
//! panel, and one fullscreen mirror. It issues loads through a
//! [`cosmo_asset::LoaderPort`], reconciles fullscreen against a
//! [`HostPort`], and composes a [`cosmo_scene_port::FrameBundle`] the
//! renderer draws each refresh.

mod catalog;
mod compose;
mod control_panel;
mod host;
mod notice;
mod session;
mod slot;
pub mod ui;

pub use catalog::{by_id, in_category, AssetDescriptor, AssetRef, BUILTIN};
pub use compose::{compose_frame, ComposeInputs};
pub use control_panel::{
    ControlPanel, ControlPanelState, Folder, NumericRange, PanelChange, PanelError, PanelInput,
    Param, ParamKind, ParamValue,
};
pub use host::{
    FullscreenRequestError, HeadlessHost, HostError, HostEvent, HostPort, ListenerId,
    ListenerKind, RenderContextId, SurfaceId,
};
pub use notice::Notice;
pub use session::{SessionConfig, ViewerSession};
pub use slot::{scene_fov_y, AssetSlot, LoadState};
