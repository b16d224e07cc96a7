// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Viewer session controller.
//!
//! Owns the scene mode (via the panel), the asset slot, and the fullscreen
//! mirror, and exposes one [`FrameBundle`] per refresh. Host listeners and
//! the render context are held for the lifetime of the session and released
//! exactly once on teardown.

use cosmo_app_core::prefs::ViewerPrefs;
use cosmo_asset::{LoaderPort, TokenCounter};
use cosmo_geom::FramingError;
use cosmo_scene_port::{FrameBundle, SceneMode, Viewport};
use tracing::{debug, info, warn};

use crate::compose::{compose_frame, ComposeInputs};
use crate::host::{
    FullscreenRequestError, HostError, HostEvent, HostPort, ListenerId, ListenerKind,
    RenderContextId, SurfaceId,
};
use crate::slot::{AssetSlot, LoadState, Resolution};
use crate::{AssetRef, ControlPanel, Notice, PanelChange, PanelError, PanelInput, Param, ParamValue};

/// Outcomes drained from the loader per [`ViewerSession::poll_loads`] call.
const MAX_DRAIN: usize = 16;

/// Mount-time settings.
#[derive(Clone, Debug, Default)]
pub struct SessionConfig {
    /// Surface the session renders into.
    pub surface: SurfaceId,
    /// Saved prefs to apply to the panel before the first frame.
    pub prefs: Option<ViewerPrefs>,
}

/// One mounted viewer.
pub struct ViewerSession<H: HostPort, L: LoaderPort> {
    host: H,
    loader: L,
    surface: SurfaceId,
    context: Option<RenderContextId>,
    listeners: Vec<ListenerId>,
    panel: ControlPanel,
    slot: AssetSlot,
    tokens: TokenCounter,
    fullscreen: bool,
    force_fullscreen: bool,
    camera_snap: u64,
    viewport: Viewport,
    notices: Vec<Notice>,
    revision: u64,
    cached: (u64, FrameBundle),
}

impl<H: HostPort, L: LoaderPort> ViewerSession<H, L> {
    /// Acquire the surface's render context, register host listeners, apply
    /// prefs, and start loading `asset` if given.
    pub fn mount(
        mut host: H,
        loader: L,
        asset: Option<AssetRef>,
        config: SessionConfig,
    ) -> Result<Self, HostError> {
        let surface = config.surface;
        let context = host.acquire_render_context(surface)?;
        let listeners = vec![
            host.add_listener(ListenerKind::FullscreenChange),
            host.add_listener(ListenerKind::Resize),
        ];
        let viewport = host.viewport(surface);
        let fullscreen = host.fullscreen_surface() == Some(surface);

        let mut panel = ControlPanel::new();
        if let Some(prefs) = &config.prefs {
            let applied = panel.apply_prefs(prefs);
            debug!(changed = applied.len(), "applied saved prefs");
        }

        let slot = AssetSlot::default();
        let cached = compose_frame(&ComposeInputs {
            panel: panel.state(),
            slot: &slot,
            camera_snap: 0,
            fullscreen,
            viewport,
        });

        let mut session = Self {
            host,
            loader,
            surface,
            context: Some(context),
            listeners,
            panel,
            slot,
            tokens: TokenCounter::new(),
            fullscreen,
            force_fullscreen: false,
            camera_snap: 0,
            viewport,
            notices: Vec::new(),
            revision: 0,
            cached: (0, cached),
        };
        info!(surface = surface.0, mode = session.scene_mode().key(), "viewer session mounted");
        if let Some(asset) = asset {
            session.set_asset(asset);
        }
        Ok(session)
    }

    /// Tear the session down. Dropping the session does the same.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        let Some(ctx) = self.context.take() else {
            return;
        };
        for id in self.listeners.drain(..) {
            self.host.remove_listener(id);
        }
        if self.host.fullscreen_surface() == Some(self.surface) {
            self.host.exit_fullscreen();
        }
        self.host.release_render_context(ctx);
        self.slot.clear();
        info!(surface = self.surface.0, "viewer session unmounted");
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.host.request_redraw();
    }

    fn inputs(&self) -> ComposeInputs<'_> {
        ComposeInputs {
            panel: self.panel.state(),
            slot: &self.slot,
            camera_snap: self.camera_snap,
            fullscreen: self.fullscreen,
            viewport: self.viewport,
        }
    }

    /// Bundle for the current state; recomposed only after a change.
    pub fn frame(&mut self) -> &FrameBundle {
        if self.cached.0 != self.revision {
            let bundle = compose_frame(&self.inputs());
            self.cached = (self.revision, bundle);
        }
        &self.cached.1
    }

    /// Bumped whenever anything the frame depends on changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Select a new asset and start loading it with a fresh token.
    ///
    /// Re-selecting the asset that is already loading or shown does nothing;
    /// re-selecting a failed one retries it.
    pub fn set_asset(&mut self, asset: AssetRef) {
        let same = self.slot.asset().is_some_and(|a| a.url == asset.url);
        if same && matches!(self.slot.state(), LoadState::Loading { .. } | LoadState::Ready) {
            debug!(url = %asset.url, "asset already selected");
            return;
        }
        let token = self.tokens.issue();
        info!(url = %asset.url, %token, "asset load issued");
        self.loader.request(token, &asset.url);
        self.slot.begin(asset, token);
        self.touch();
    }

    /// Apply completed loads. Returns how many outcomes were drained.
    pub fn poll_loads(&mut self) -> usize {
        let outcomes = self.loader.drain(MAX_DRAIN);
        let drained = outcomes.len();
        for outcome in outcomes {
            let token = outcome.token;
            match self.slot.resolve(token, outcome.result) {
                Resolution::Stale => {
                    debug!(%token, current = ?self.tokens.latest(), url = %outcome.url, "stale load discarded");
                }
                Resolution::Committed(framing) => {
                    if let Some(graph) = self.slot.graph() {
                        info!(
                            url = %outcome.url,
                            %token,
                            digest = %hex::encode(&graph.digest()[..8]),
                            "asset committed"
                        );
                    }
                    self.camera_snap += 1;
                    if let Err(error) = framing {
                        self.framing_fallback(error);
                    }
                    let name = self.slot.asset().map(|a| a.name.clone()).unwrap_or_default();
                    self.notices.push(Notice::AssetLoaded {
                        url: outcome.url,
                        name,
                    });
                    self.touch();
                }
                Resolution::Failed(error) => {
                    warn!(url = %outcome.url, %token, %error, "asset load failed");
                    self.notices.push(Notice::LoadFailed {
                        url: outcome.url,
                        error,
                    });
                    self.touch();
                }
            }
        }
        drained
    }

    fn framing_fallback(&mut self, error: FramingError) {
        let url = self.slot.asset().map(|a| a.url.clone()).unwrap_or_default();
        warn!(%url, %error, "framing failed; using default camera");
        self.notices.push(Notice::FramingFallback { url, error });
    }

    /// Set a panel parameter; see [`ControlPanel::set`].
    pub fn set_param(
        &mut self,
        param: Param,
        value: ParamValue,
    ) -> Result<Option<PanelChange>, PanelError> {
        let before = self.scene_mode();
        let change = self.panel.set(param, value)?;
        if change.is_some() {
            if param == Param::SceneMode {
                self.mode_changed(before);
            }
            self.touch();
        }
        Ok(change)
    }

    /// Apply one interaction from a panel UI.
    pub fn apply_input(&mut self, input: PanelInput) -> Result<(), PanelError> {
        match input {
            PanelInput::Set(param, value) => self.set_param(param, value).map(drop),
            PanelInput::Recenter => {
                self.recenter();
                Ok(())
            }
            PanelInput::ResetLighting => {
                if !self.panel.reset_lighting(self.scene_mode()).is_empty() {
                    self.touch();
                }
                Ok(())
            }
        }
    }

    fn mode_changed(&mut self, before: SceneMode) {
        let now = self.scene_mode();
        info!(from = before.key(), to = now.key(), "scene mode changed");
        if before.hosts_asset() != now.hosts_asset() {
            self.camera_snap += 1;
        }
        self.notices.push(Notice::SceneChanged(now));
    }

    /// Reframe the camera on the current asset and snap to it.
    pub fn recenter(&mut self) {
        self.panel.recenter();
        if self.scene_mode().hosts_asset() {
            if let Some(Err(error)) = self.slot.reframe() {
                self.framing_fallback(error);
            }
        }
        self.camera_snap += 1;
        self.touch();
    }

    /// Request fullscreen on (`true`) or off (`false`). The mirrored flag
    /// only changes when the host reports it.
    pub fn set_force_fullscreen(&mut self, force: bool) {
        self.force_fullscreen = force;
        let on_surface = self.host.fullscreen_surface() == Some(self.surface);
        if force && !on_surface {
            debug!(surface = self.surface.0, "requesting fullscreen");
            if let Err(err) = self.host.request_fullscreen(self.surface) {
                self.fullscreen_denied(err, false);
            }
        } else if !force && on_surface {
            debug!(surface = self.surface.0, "requesting fullscreen exit");
            self.host.exit_fullscreen();
        }
    }

    /// Record a denied request. `reported` is true when the mirror change
    /// has already been announced for this event.
    fn fullscreen_denied(&mut self, err: FullscreenRequestError, reported: bool) {
        warn!(%err, "fullscreen request denied");
        self.force_fullscreen = false;
        self.notices.push(Notice::FullscreenDenied(err));
        if !reported && !self.fullscreen {
            self.notices.push(Notice::FullScreenChanged(false));
        }
    }

    /// Handle a host notification.
    pub fn handle_host_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::FullscreenChanged => {
                self.sync_fullscreen();
            }
            HostEvent::FullscreenError => {
                let reported = self.sync_fullscreen();
                self.fullscreen_denied(
                    FullscreenRequestError {
                        reason: "host reported a fullscreen error".into(),
                    },
                    reported,
                );
            }
            HostEvent::Resized(viewport) => {
                if viewport != self.viewport {
                    debug!(width = viewport.width, height = viewport.height, "viewport resized");
                    self.viewport = viewport;
                    self.touch();
                }
            }
        }
    }

    /// Mirror the host's fullscreen target. Returns true if the flag changed.
    fn sync_fullscreen(&mut self) -> bool {
        let active = self.host.fullscreen_surface() == Some(self.surface);
        if active == self.fullscreen {
            return false;
        }
        self.fullscreen = active;
        if !active {
            self.force_fullscreen = false;
        }
        info!(active, "fullscreen changed");
        self.notices.push(Notice::FullScreenChanged(active));
        self.touch();
        true
    }

    /// Take pending notices, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Load state of the active asset.
    pub fn load_state(&self) -> &LoadState {
        self.slot.state()
    }

    /// The selected asset.
    pub fn asset(&self) -> Option<&AssetRef> {
        self.slot.asset()
    }

    /// Mirrored fullscreen flag.
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Whether fullscreen is currently being forced by the caller.
    pub fn is_forcing_fullscreen(&self) -> bool {
        self.force_fullscreen
    }

    /// Active scene mode.
    pub fn scene_mode(&self) -> SceneMode {
        self.panel.state().mode
    }

    /// The panel, read-only. Mutate through [`ViewerSession::set_param`].
    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    /// Current surface size.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Snapshot prefs, including the selected asset URL.
    pub fn export_prefs(&self) -> ViewerPrefs {
        self.panel
            .export_prefs(self.slot.asset().map(|a| a.url.as_str()))
    }

    /// The host port.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The loader, for draining or scripting in tests.
    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }
}

impl<H: HostPort, L: LoaderPort> Drop for ViewerSession<H, L> {
    fn drop(&mut self) {
        self.teardown();
    }
}
