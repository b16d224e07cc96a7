// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Banner queue with TTL + dedupe for non-fatal viewer notices.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Informational note.
    Info,
    /// Degraded but usable (framing fallback, prefs not persisted).
    Warn,
    /// Operation failed (asset load).
    Error,
}

/// Identifier for a toast entry.
pub type ToastId = u64;

#[derive(Debug, Clone)]
struct Toast {
    id: ToastId,
    kind: ToastKind,
    title: String,
    body: Option<String>,
    ttl: Duration,
    created: Instant,
}

/// Rendering-friendly view of a toast.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastRender {
    /// Stable identifier.
    pub id: ToastId,
    /// Severity.
    pub kind: ToastKind,
    /// Short title line.
    pub title: String,
    /// Optional body text.
    pub body: Option<String>,
    /// 1.0 -> just created, 0.0 -> expired.
    pub progress: f32,
}

/// In-memory toast queue with TTL and a dedupe window.
pub struct ToastService {
    queue: VecDeque<Toast>,
    max: usize,
    dedupe_window: Duration,
    next_id: ToastId,
}

impl ToastService {
    /// Create a queue holding at most `max` toasts; the oldest is evicted first.
    pub fn new(max: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            max: max.max(1),
            dedupe_window: Duration::from_millis(500),
            next_id: 1,
        }
    }

    /// Push a toast. An identical toast pushed within the dedupe window is
    /// refreshed instead of duplicated and keeps its id.
    pub fn push<S, B>(
        &mut self,
        kind: ToastKind,
        title: S,
        body: B,
        ttl: Duration,
        now: Instant,
    ) -> ToastId
    where
        S: Into<String>,
        B: Into<Option<String>>,
    {
        let title = title.into();
        let body = body.into();

        if let Some(existing) = self.queue.iter_mut().find(|t| {
            t.kind == kind
                && t.title == title
                && t.body == body
                && now.saturating_duration_since(t.created) <= self.dedupe_window
        }) {
            existing.created = now;
            existing.ttl = ttl;
            return existing.id;
        }

        let id = self.next_id;
        self.next_id += 1;
        if self.queue.len() >= self.max {
            self.queue.pop_front();
        }
        self.queue.push_back(Toast {
            id,
            kind,
            title,
            body,
            ttl,
            created: now,
        });
        id
    }

    /// Drop expired toasts.
    pub fn retain_visible(&mut self, now: Instant) {
        self.queue
            .retain(|t| now.saturating_duration_since(t.created) < t.ttl);
    }

    /// Render-ready toasts with progress ratios, oldest first.
    pub fn visible(&self, now: Instant) -> Vec<ToastRender> {
        self.queue
            .iter()
            .filter_map(|t| {
                let age = now.saturating_duration_since(t.created);
                (age < t.ttl).then(|| ToastRender {
                    id: t.id,
                    kind: t.kind,
                    title: t.title.clone(),
                    body: t.body.clone(),
                    progress: 1.0 - age.as_secs_f32() / t.ttl.as_secs_f32(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(4);

    #[test]
    fn identical_toasts_dedupe_within_window() {
        let mut svc = ToastService::new(8);
        let t0 = Instant::now();
        let a = svc.push(ToastKind::Error, "Load failed", None, TTL, t0);
        let b = svc.push(
            ToastKind::Error,
            "Load failed",
            None,
            TTL,
            t0 + Duration::from_millis(100),
        );
        assert_eq!(a, b);
        assert_eq!(svc.visible(t0 + Duration::from_millis(200)).len(), 1);

        let c = svc.push(ToastKind::Error, "Load failed", None, TTL, t0 + TTL);
        assert_ne!(a, c);
    }

    #[test]
    fn oldest_evicted_when_full() {
        let mut svc = ToastService::new(2);
        let now = Instant::now();
        svc.push(ToastKind::Info, "one", None, TTL, now);
        svc.push(ToastKind::Info, "two", None, TTL, now);
        svc.push(ToastKind::Info, "three", None, TTL, now);
        let titles: Vec<_> = svc.visible(now).into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["two", "three"]);
    }

    #[test]
    fn expired_toasts_are_dropped() {
        let mut svc = ToastService::new(4);
        let now = Instant::now();
        svc.push(ToastKind::Warn, "framing", Some("fallback".into()), TTL, now);
        svc.retain_visible(now + TTL);
        assert!(svc.visible(now + TTL).is_empty());
    }
}
