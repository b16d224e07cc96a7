// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Headless application wiring: config, toasts, session, and a tracing renderer.

use std::thread;
use std::time::{Duration, Instant};

use cosmo_app_core::{
    config::ConfigService,
    config_port::ConfigPort,
    toast::{ToastKind, ToastService},
};
use cosmo_asset::{ChannelLoader, DefaultSource, HttpSource};
use cosmo_config_fs::FsConfigStore;
use cosmo_scene_port::{FrameBundle, ScenePort, Subject, Viewport};
use cosmo_viewer::{
    AssetDescriptor, AssetRef, HeadlessHost, LoadState, Notice, SessionConfig, ViewerSession,
    BUILTIN,
};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

const FRAME: Duration = Duration::from_millis(16);
const TOAST_TTL: Duration = Duration::from_secs(6);
const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Renderer that logs each presented bundle instead of drawing it.
#[derive(Debug, Default)]
pub struct TraceScenePort {
    presented: u64,
}

impl ScenePort for TraceScenePort {
    fn present(&mut self, frame: &FrameBundle) {
        self.presented += 1;
        let subject = match &frame.subject {
            Subject::Asset(graph) => format!("asset:{}", graph.source()),
            Subject::Placeholder(_) => "placeholder".to_owned(),
            Subject::Empty => "empty".to_owned(),
        };
        let pose = frame.camera.pose;
        debug!(
            n = self.presented,
            mode = frame.mode.key(),
            %subject,
            backdrop = %frame.backdrop,
            aux = frame.aux.len(),
            camera = ?pose.position.to_array(),
            look_at = ?pose.look_at.to_array(),
            snap = frame.camera.snap,
            "frame presented"
        );
    }

    fn resize(&mut self, viewport: Viewport) {
        debug!(width = viewport.width, height = viewport.height, "renderer resized");
    }

    fn dispose(&mut self) {
        debug!(frames = self.presented, "renderer disposed");
    }
}

type Session = ViewerSession<HeadlessHost, ChannelLoader<DefaultSource>>;

pub struct App {
    pub config: Option<Box<dyn ConfigPort>>,
    pub toasts: ToastService,
    pub host: HeadlessHost,
    pub session: Session,
    pub port: TraceScenePort,
    presented_rev: Option<u64>,
}

impl App {
    pub fn new(runtime: Handle, model_url: Option<String>) -> anyhow::Result<Self> {
        let config = FsConfigStore::new()
            .map(ConfigService::new)
            .map(|svc| Box::new(svc) as Box<dyn ConfigPort>)
            .ok();
        let prefs = config.as_ref().and_then(|c| c.load_prefs());
        let mut toasts = ToastService::new(32);
        if config.is_none() {
            toasts.push(
                ToastKind::Warn,
                "Config store unavailable",
                Some(String::from(
                    "FsConfigStore init failed; prefs won't persist this session",
                )),
                TOAST_TTL,
                Instant::now(),
            );
        }

        let asset = model_url
            .or_else(|| prefs.as_ref().and_then(|p| p.last_model_url.clone()))
            .map(AssetRef::from_url)
            .or_else(|| BUILTIN.first().map(AssetDescriptor::asset_ref));

        let host = HeadlessHost::new();
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()?;
        let source = DefaultSource::with_http(HttpSource::with_client(client));
        let loader = ChannelLoader::new(source, runtime);
        let session = ViewerSession::mount(
            host.clone(),
            loader,
            asset,
            SessionConfig {
                prefs,
                ..SessionConfig::default()
            },
        )?;

        Ok(Self {
            config,
            toasts,
            host,
            session,
            port: TraceScenePort::default(),
            presented_rev: None,
        })
    }

    fn notice_to_toast(&mut self, notice: Notice, now: Instant) {
        let (kind, title, body) = match notice {
            Notice::AssetLoaded { name, .. } => (ToastKind::Info, format!("Loaded {name}"), None),
            Notice::LoadFailed { url, error } => {
                (ToastKind::Error, "Model failed to load".to_owned(), Some(format!("{url}: {error}")))
            }
            Notice::FramingFallback { error, .. } => (
                ToastKind::Warn,
                "Using default camera".to_owned(),
                Some(error.to_string()),
            ),
            Notice::FullscreenDenied(err) => {
                (ToastKind::Warn, "Fullscreen unavailable".to_owned(), Some(err.reason))
            }
            Notice::SceneChanged(mode) => {
                info!(mode = mode.key(), "currently viewing");
                return;
            }
            Notice::FullScreenChanged(active) => {
                info!(active, "fullscreen chrome update");
                return;
            }
        };
        self.toasts.push(kind, title, body, TOAST_TTL, now);
    }

    /// One host/loader/render pass.
    pub fn tick(&mut self) {
        for event in self.host.take_events() {
            self.session.handle_host_event(event);
        }
        self.session.poll_loads();
        if self.presented_rev != Some(self.session.revision()) {
            self.presented_rev = Some(self.session.revision());
            self.port.present(self.session.frame());
        }
        let now = Instant::now();
        for notice in self.session.drain_notices() {
            self.notice_to_toast(notice, now);
        }
        self.toasts.retain_visible(now);
    }

    /// Run until the load settles or `budget` elapses, then show the result
    /// briefly in fullscreen.
    pub fn run(&mut self, budget: Duration) {
        self.port.resize(self.session.viewport());
        let deadline = Instant::now() + budget;
        self.tick();
        while matches!(self.session.load_state(), LoadState::Loading { .. }) {
            if Instant::now() >= deadline {
                warn!("model still loading when the time budget ran out");
                break;
            }
            thread::sleep(FRAME);
            self.tick();
        }

        self.session.set_force_fullscreen(true);
        self.tick();
        self.session.set_force_fullscreen(false);
        self.tick();

        for t in self.toasts.visible(Instant::now()) {
            info!(kind = ?t.kind, title = %t.title, body = t.body.as_deref().unwrap_or(""), "toast");
        }
    }

    /// Save prefs and tear the session down.
    pub fn shutdown(self) {
        if let Some(config) = &self.config {
            config.save_prefs(&self.session.export_prefs());
        }
        let Self { session, mut port, .. } = self;
        session.unmount();
        port.dispose();
    }
}
