// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Host-environment port (fullscreen, listeners, render context, redraw) and
//! a scriptable headless host.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use cosmo_scene_port::Viewport;
use thiserror::Error;

/// Identifies the drawable surface a session renders into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u32);

impl Default for SurfaceId {
    fn default() -> Self {
        Self(1)
    }
}

/// Handle to an acquired render context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderContextId(pub u64);

/// Handle to a registered host listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Host notifications a session subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerKind {
    /// Fullscreen target changed.
    FullscreenChange,
    /// Window resized.
    Resize,
}

/// A notification delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// The fullscreen target changed; query [`HostPort::fullscreen_surface`] for the new one.
    FullscreenChanged,
    /// A fullscreen request was refused after the fact.
    FullscreenError,
    /// The surface was resized.
    Resized(Viewport),
}

impl HostEvent {
    /// Listener kind that receives this event.
    pub const fn kind(&self) -> ListenerKind {
        match self {
            Self::FullscreenChanged | Self::FullscreenError => ListenerKind::FullscreenChange,
            Self::Resized(_) => ListenerKind::Resize,
        }
    }
}

/// Host-level failures that prevent a session from mounting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// Another session holds the surface's render context.
    #[error("render context for surface {0:?} is already held")]
    ContextBusy(SurfaceId),
    /// The host cannot create a context at all.
    #[error("render context unavailable: {0}")]
    ContextUnavailable(String),
}

/// The host refused to enter fullscreen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fullscreen request denied: {reason}")]
pub struct FullscreenRequestError {
    /// Host-provided reason (e.g. "no user gesture").
    pub reason: String,
}

/// Port onto the host environment (browser window, native shell, test host).
pub trait HostPort {
    /// Surface currently shown fullscreen, if any.
    fn fullscreen_surface(&self) -> Option<SurfaceId>;
    /// Ask the host to show `surface` fullscreen. Success means "requested";
    /// the change is confirmed by a [`HostEvent::FullscreenChanged`].
    fn request_fullscreen(&mut self, surface: SurfaceId) -> Result<(), FullscreenRequestError>;
    /// Ask the host to leave fullscreen.
    fn exit_fullscreen(&mut self);
    /// Register a listener for `kind`.
    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId;
    /// Remove a listener registered with [`HostPort::add_listener`].
    fn remove_listener(&mut self, id: ListenerId);
    /// Take exclusive ownership of the render context for `surface`.
    fn acquire_render_context(&mut self, surface: SurfaceId) -> Result<RenderContextId, HostError>;
    /// Release a context acquired with [`HostPort::acquire_render_context`].
    fn release_render_context(&mut self, ctx: RenderContextId);
    /// Ask for another frame.
    fn request_redraw(&self);
    /// Current surface size.
    fn viewport(&self, surface: SurfaceId) -> Viewport;
}

#[derive(Debug, Default)]
struct HeadlessState {
    fullscreen: Option<SurfaceId>,
    deny_reason: Option<String>,
    listeners: BTreeMap<ListenerId, ListenerKind>,
    next_listener: u64,
    listeners_added: u32,
    listeners_removed: u32,
    contexts: BTreeMap<SurfaceId, RenderContextId>,
    next_context: u64,
    contexts_released: u32,
    redraws: u32,
    viewport: Viewport,
    queue: VecDeque<HostEvent>,
}

impl HeadlessState {
    fn post(&mut self, event: HostEvent) {
        if self.listeners.values().any(|k| *k == event.kind()) {
            self.queue.push_back(event);
        }
    }
}

/// In-process host with no window. Clones share state, so a test can keep
/// one handle while the session owns another.
///
/// Notifications are queued and only reach the app when it calls
/// [`HeadlessHost::take_events`]; events with no live listener are dropped.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    inner: Rc<RefCell<HeadlessState>>,
}

impl HeadlessHost {
    /// Host with no fullscreen surface and a default viewport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse fullscreen requests with `reason` until [`HeadlessHost::allow_fullscreen`].
    pub fn deny_fullscreen(&self, reason: impl Into<String>) {
        self.inner.borrow_mut().deny_reason = Some(reason.into());
    }

    /// Accept fullscreen requests again.
    pub fn allow_fullscreen(&self) {
        self.inner.borrow_mut().deny_reason = None;
    }

    /// User leaves fullscreen through the host (Escape key, OS gesture).
    pub fn simulate_user_exit(&self) {
        let mut s = self.inner.borrow_mut();
        if s.fullscreen.take().is_some() {
            s.post(HostEvent::FullscreenChanged);
        }
    }

    /// Surface resized by the host.
    pub fn simulate_resize(&self, viewport: Viewport) {
        let mut s = self.inner.borrow_mut();
        s.viewport = viewport;
        s.post(HostEvent::Resized(viewport));
    }

    /// Drain queued notifications.
    pub fn take_events(&self) -> Vec<HostEvent> {
        self.inner.borrow_mut().queue.drain(..).collect()
    }

    /// Listeners currently registered.
    pub fn active_listeners(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Total `add_listener` calls.
    pub fn listeners_added(&self) -> u32 {
        self.inner.borrow().listeners_added
    }

    /// Total effective `remove_listener` calls.
    pub fn listeners_removed(&self) -> u32 {
        self.inner.borrow().listeners_removed
    }

    /// Whether `surface` currently has a context held.
    pub fn context_held(&self, surface: SurfaceId) -> bool {
        self.inner.borrow().contexts.contains_key(&surface)
    }

    /// Total effective context releases.
    pub fn contexts_released(&self) -> u32 {
        self.inner.borrow().contexts_released
    }

    /// Total redraw requests.
    pub fn redraws(&self) -> u32 {
        self.inner.borrow().redraws
    }
}

impl HostPort for HeadlessHost {
    fn fullscreen_surface(&self) -> Option<SurfaceId> {
        self.inner.borrow().fullscreen
    }

    fn request_fullscreen(&mut self, surface: SurfaceId) -> Result<(), FullscreenRequestError> {
        let mut s = self.inner.borrow_mut();
        if let Some(reason) = s.deny_reason.clone() {
            return Err(FullscreenRequestError { reason });
        }
        if s.fullscreen != Some(surface) {
            s.fullscreen = Some(surface);
            s.post(HostEvent::FullscreenChanged);
        }
        Ok(())
    }

    fn exit_fullscreen(&mut self) {
        let mut s = self.inner.borrow_mut();
        if s.fullscreen.take().is_some() {
            s.post(HostEvent::FullscreenChanged);
        }
    }

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        let mut s = self.inner.borrow_mut();
        s.next_listener += 1;
        let id = ListenerId(s.next_listener);
        s.listeners.insert(id, kind);
        s.listeners_added += 1;
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        let mut s = self.inner.borrow_mut();
        if s.listeners.remove(&id).is_some() {
            s.listeners_removed += 1;
        }
    }

    fn acquire_render_context(&mut self, surface: SurfaceId) -> Result<RenderContextId, HostError> {
        let mut s = self.inner.borrow_mut();
        if s.contexts.contains_key(&surface) {
            return Err(HostError::ContextBusy(surface));
        }
        s.next_context += 1;
        let ctx = RenderContextId(s.next_context);
        s.contexts.insert(surface, ctx);
        Ok(ctx)
    }

    fn release_render_context(&mut self, ctx: RenderContextId) {
        let mut s = self.inner.borrow_mut();
        let before = s.contexts.len();
        s.contexts.retain(|_, held| *held != ctx);
        if s.contexts.len() < before {
            s.contexts_released += 1;
        }
    }

    fn request_redraw(&self) {
        self.inner.borrow_mut().redraws += 1;
    }

    fn viewport(&self, _surface: SurfaceId) -> Viewport {
        self.inner.borrow().viewport
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn events_reach_only_live_listeners() {
        let mut host = HeadlessHost::new();
        host.request_fullscreen(SurfaceId(1)).unwrap();
        assert!(host.take_events().is_empty());

        let id = host.add_listener(ListenerKind::FullscreenChange);
        host.simulate_user_exit();
        assert_eq!(host.take_events(), vec![HostEvent::FullscreenChanged]);

        host.remove_listener(id);
        host.remove_listener(id);
        assert_eq!(host.listeners_removed(), 1);
    }

    #[test]
    fn second_context_on_a_surface_is_busy() {
        let mut host = HeadlessHost::new();
        let ctx = host.acquire_render_context(SurfaceId(7)).unwrap();
        assert_eq!(
            host.acquire_render_context(SurfaceId(7)),
            Err(HostError::ContextBusy(SurfaceId(7)))
        );
        host.release_render_context(ctx);
        assert!(host.acquire_render_context(SurfaceId(7)).is_ok());
    }

    #[test]
    fn denied_request_changes_nothing() {
        let mut host = HeadlessHost::new();
        host.add_listener(ListenerKind::FullscreenChange);
        host.deny_fullscreen("no user gesture");
        let err = host.request_fullscreen(SurfaceId(1)).unwrap_err();
        assert_eq!(err.reason, "no user gesture");
        assert_eq!(host.fullscreen_surface(), None);
        assert!(host.take_events().is_empty());
    }
}
