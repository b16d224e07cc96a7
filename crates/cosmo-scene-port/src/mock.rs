// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Mock renderer for headless testing of frame composition.

use crate::{AuxGeometry, FrameBundle, ScenePort, Subject, Viewport};

/// Mock scene port.
///
/// Records presented frames without any GPU work.
#[derive(Debug, Default)]
pub struct MockScenePort {
    /// Every frame presented, oldest first.
    pub frames: Vec<FrameBundle>,
    /// Last viewport passed to `resize`.
    pub viewport: Option<Viewport>,
    /// Number of `dispose` calls.
    pub dispose_count: u32,
}

impl MockScenePort {
    /// Create a new mock port.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last frame presented, if any.
    pub fn last(&self) -> Option<&FrameBundle> {
        self.frames.last()
    }

    /// True if any presented frame carried a placeholder subject.
    pub fn saw_placeholder(&self) -> bool {
        self.frames
            .iter()
            .any(|f| matches!(f.subject, Subject::Placeholder(_)))
    }

    /// Number of aux entries of the same kind as `probe` in the last frame.
    pub fn aux_count_like(&self, probe: &AuxGeometry) -> usize {
        self.last().map_or(0, |f| {
            f.aux
                .iter()
                .filter(|a| core::mem::discriminant(*a) == core::mem::discriminant(probe))
                .count()
        })
    }
}

impl ScenePort for MockScenePort {
    fn present(&mut self, frame: &FrameBundle) {
        self.frames.push(frame.clone());
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    fn dispose(&mut self) {
        self.dispose_count += 1;
        self.frames.clear();
    }
}
