// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Loader port and the tokio-backed channel loader.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;

use cosmo_scene_port::{LoadError, NodeGraph};
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::{decode, AssetSource, RequestToken};

/// Result of one load request, delivered back to the session.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    /// Token the request was issued with.
    pub token: RequestToken,
    /// URL that was requested.
    pub url: String,
    /// Decoded graph or the reason the load failed.
    pub result: Result<NodeGraph, LoadError>,
}

/// Port the viewer session issues loads through.
///
/// `request` never blocks and never reports completion directly; outcomes
/// are picked up with `drain`, in completion order.
pub trait LoaderPort {
    /// Start loading `url` under `token`.
    fn request(&mut self, token: RequestToken, url: &str);
    /// Take up to `max` completed outcomes.
    fn drain(&mut self, max: usize) -> Vec<LoadOutcome>;
}

/// Fetch and decode `url` from `source`.
pub async fn load_with<S: AssetSource + ?Sized>(
    source: &S,
    url: &str,
) -> Result<NodeGraph, LoadError> {
    let bytes = source.fetch(url).await?;
    decode(url, &bytes)
}

/// Loader that runs each request as a task on a tokio runtime and hands the
/// outcome back over a channel.
///
/// Abandoned requests are not cancelled; their outcomes still arrive and the
/// session drops them by token.
pub struct ChannelLoader<S> {
    source: Arc<S>,
    runtime: Handle,
    tx: Sender<LoadOutcome>,
    rx: Receiver<LoadOutcome>,
}

impl<S: AssetSource> ChannelLoader<S> {
    /// Spawn loads onto `runtime`, fetching through `source`.
    pub fn new(source: S, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source: Arc::new(source),
            runtime,
            tx,
            rx,
        }
    }
}

impl<S: AssetSource> LoaderPort for ChannelLoader<S> {
    fn request(&mut self, token: RequestToken, url: &str) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let url = url.to_owned();
        self.runtime.spawn(async move {
            let result = load_with(source.as_ref(), &url).await;
            match &result {
                Ok(graph) => debug!(
                    %token,
                    %url,
                    meshes = graph.meshes().len(),
                    digest = %hex::encode(&graph.digest()[..8]),
                    "asset decoded"
                ),
                Err(err) => debug!(%token, %url, %err, "asset load failed"),
            }
            if tx.send(LoadOutcome { token, url, result }).is_err() {
                debug!(%token, "loader dropped before outcome delivery");
            }
        });
    }

    fn drain(&mut self, max: usize) -> Vec<LoadOutcome> {
        let mut out = Vec::new();
        while out.len() < max {
            match self.rx.try_recv() {
                Ok(outcome) => out.push(outcome),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("load channel disconnected");
                    break;
                }
            }
        }
        out
    }
}
