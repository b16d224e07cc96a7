// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The session's single asset slot and its load state machine.

use std::sync::Arc;

use cosmo_asset::RequestToken;
use cosmo_geom::{frame_optional, CameraPose, FramingError};
use cosmo_scene_port::{LoadError, NodeGraph, SCENE_FOV_Y_DEGREES};

use crate::AssetRef;

/// Load state of the active asset.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum LoadState {
    /// No asset selected yet.
    #[default]
    Idle,
    /// A load is in flight under `token`.
    Loading {
        /// Token the in-flight request carries.
        token: RequestToken,
    },
    /// The graph is committed.
    Ready,
    /// The latest load failed; stays here until a new asset is set.
    Error(LoadError),
}

/// What [`AssetSlot::resolve`] did with an outcome.
#[derive(Debug, PartialEq)]
pub enum Resolution {
    /// Token did not match the pending request; nothing changed.
    Stale,
    /// Graph committed; carries the framing result used for the camera.
    Committed(Result<CameraPose, FramingError>),
    /// Load failed; slot moved to `Error`.
    Failed(LoadError),
}

/// At most one active asset, with its load state, graph, and framed pose.
#[derive(Debug, Default)]
pub struct AssetSlot {
    asset: Option<AssetRef>,
    state: LoadState,
    graph: Option<Arc<NodeGraph>>,
    framed: Option<CameraPose>,
}

/// Vertical field of view shared by every mode, in radians.
pub fn scene_fov_y() -> f32 {
    SCENE_FOV_Y_DEGREES.to_radians()
}

impl AssetSlot {
    /// The selected asset.
    pub fn asset(&self) -> Option<&AssetRef> {
        self.asset.as_ref()
    }

    /// Current load state.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Committed graph, present only while `Ready`.
    pub fn graph(&self) -> Option<&Arc<NodeGraph>> {
        self.graph.as_ref()
    }

    /// Pose from the last successful framing, if any.
    pub fn framed_pose(&self) -> Option<CameraPose> {
        self.framed
    }

    /// Token of the in-flight load.
    pub fn pending_token(&self) -> Option<RequestToken> {
        match self.state {
            LoadState::Loading { token } => Some(token),
            _ => None,
        }
    }

    /// Select `asset` and enter `Loading` under `token`. The previous graph
    /// is dropped; the last framed pose is kept until the next commit.
    pub(crate) fn begin(&mut self, asset: AssetRef, token: RequestToken) {
        self.asset = Some(asset);
        self.graph = None;
        self.state = LoadState::Loading { token };
    }

    /// Apply a load outcome if `token` matches the pending request.
    pub(crate) fn resolve(
        &mut self,
        token: RequestToken,
        result: Result<NodeGraph, LoadError>,
    ) -> Resolution {
        if self.pending_token() != Some(token) {
            return Resolution::Stale;
        }
        match result {
            Ok(graph) => {
                let framing = self.reframe_graph(&graph);
                self.graph = Some(Arc::new(graph));
                self.state = LoadState::Ready;
                Resolution::Committed(framing)
            }
            Err(err) => {
                self.state = LoadState::Error(err.clone());
                Resolution::Failed(err)
            }
        }
    }

    /// Recompute framing for the committed graph. `None` when nothing is committed.
    pub(crate) fn reframe(&mut self) -> Option<Result<CameraPose, FramingError>> {
        let graph = Arc::clone(self.graph.as_ref()?);
        Some(self.reframe_graph(&graph))
    }

    fn reframe_graph(&mut self, graph: &NodeGraph) -> Result<CameraPose, FramingError> {
        let result = frame_optional(graph.bounding_box().as_ref(), scene_fov_y());
        self.framed = result.ok();
        result
    }

    /// Drop the graph and forget the selection.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use cosmo_asset::TokenCounter;
    use cosmo_geom::{Aabb, Vec3};
    use cosmo_scene_port::MeshInstance;

    use super::*;

    fn graph(url: &str, size: f32) -> NodeGraph {
        NodeGraph::new(
            url,
            vec![MeshInstance {
                name: None,
                bounds: Aabb::from_center_size(Vec3::ZERO, Vec3::splat(size)),
            }],
            [0; 32],
        )
    }

    #[test]
    fn stale_token_is_ignored() {
        let mut tokens = TokenCounter::new();
        let mut slot = AssetSlot::default();
        let a = tokens.issue();
        slot.begin(AssetRef::from_url("a.glb"), a);
        let b = tokens.issue();
        slot.begin(AssetRef::from_url("b.glb"), b);

        assert_eq!(slot.resolve(a, Ok(graph("a.glb", 1.0))), Resolution::Stale);
        assert_eq!(slot.state(), &LoadState::Loading { token: b });
        assert!(matches!(
            slot.resolve(b, Ok(graph("b.glb", 1.0))),
            Resolution::Committed(Ok(_))
        ));
        assert_eq!(slot.graph().unwrap().source(), "b.glb");
        // A second delivery for the same token finds no pending request.
        assert_eq!(slot.resolve(b, Ok(graph("b.glb", 1.0))), Resolution::Stale);
    }

    #[test]
    fn degenerate_graph_commits_without_pose() {
        let mut tokens = TokenCounter::new();
        let mut slot = AssetSlot::default();
        let t = tokens.issue();
        slot.begin(AssetRef::from_url("flat.glb"), t);
        let r = slot.resolve(t, Ok(graph("flat.glb", 0.0)));
        assert!(matches!(r, Resolution::Committed(Err(FramingError::Degenerate { .. }))));
        assert_eq!(slot.state(), &LoadState::Ready);
        assert_eq!(slot.framed_pose(), None);
    }

    #[test]
    fn graph_without_meshes_is_empty_for_framing() {
        let mut tokens = TokenCounter::new();
        let mut slot = AssetSlot::default();
        let t = tokens.issue();
        slot.begin(AssetRef::from_url("empty.glb"), t);
        let r = slot.resolve(t, Ok(NodeGraph::new("empty.glb", Vec::new(), [0; 32])));
        assert_eq!(r, Resolution::Committed(Err(FramingError::Empty)));
        assert_eq!(slot.reframe(), Some(Err(FramingError::Empty)));
    }
}
