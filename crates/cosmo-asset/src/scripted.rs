// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Hand-resolved loader for tests.

use std::collections::VecDeque;

use cosmo_scene_port::{LoadError, NodeGraph};

use crate::{LoadOutcome, LoaderPort, RequestToken};

/// Loader whose requests complete only when a test resolves them.
///
/// Requests can be resolved in any order, which is how stale-result races
/// are reproduced deterministically.
#[derive(Debug, Default)]
pub struct ScriptedLoader {
    pending: Vec<(RequestToken, String)>,
    ready: VecDeque<LoadOutcome>,
    /// Every request seen, in issue order.
    pub issued: Vec<(RequestToken, String)>,
}

impl ScriptedLoader {
    /// Empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests not yet resolved.
    pub fn pending(&self) -> &[(RequestToken, String)] {
        &self.pending
    }

    /// Complete the oldest pending request for `url`. Returns false if none is pending.
    pub fn resolve(&mut self, url: &str, result: Result<NodeGraph, LoadError>) -> bool {
        let Some(pos) = self.pending.iter().position(|(_, u)| u == url) else {
            return false;
        };
        let (token, url) = self.pending.remove(pos);
        self.ready.push_back(LoadOutcome { token, url, result });
        true
    }

    /// Complete the pending request issued with `token`.
    pub fn resolve_token(
        &mut self,
        token: RequestToken,
        result: Result<NodeGraph, LoadError>,
    ) -> bool {
        let Some(pos) = self.pending.iter().position(|(t, _)| *t == token) else {
            return false;
        };
        let (token, url) = self.pending.remove(pos);
        self.ready.push_back(LoadOutcome { token, url, result });
        true
    }
}

impl LoaderPort for ScriptedLoader {
    fn request(&mut self, token: RequestToken, url: &str) {
        self.pending.push((token, url.to_owned()));
        self.issued.push((token, url.to_owned()));
    }

    fn drain(&mut self, max: usize) -> Vec<LoadOutcome> {
        let n = max.min(self.ready.len());
        self.ready.drain(..n).collect()
    }
}
