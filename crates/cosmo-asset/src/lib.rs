// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Asset loader adapter for the Cosmo viewer.
//!
//! Loads are asynchronous and tagged with a [`RequestToken`]. A loader never
//! commits anything itself: it delivers [`LoadOutcome`]s that the session
//! drains and compares against the newest token it issued, so a stale
//! result can be discarded without cancelling the in-flight fetch.
//!
//! [`decode`] reads glTF 2.0 (`.gltf` JSON or `.glb` binary container) far
//! enough to recover world-space mesh bounds; drawing is the renderer's job.
//!
//! # Crate Features
//!
//! - `test-utils`: exposes `ScriptedLoader`, a loader resolved by hand from tests.

mod decoder;
mod loader;
#[cfg(feature = "test-utils")]
mod scripted;
mod source;
mod token;

pub use decoder::decode;
pub use loader::{load_with, ChannelLoader, LoadOutcome, LoaderPort};
#[cfg(feature = "test-utils")]
pub use scripted::ScriptedLoader;
pub use source::{AssetSource, DefaultSource, FileSource, HttpSource};
pub use token::{RequestToken, TokenCounter};
