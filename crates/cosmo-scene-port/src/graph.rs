// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory representation of a loaded asset.

use cosmo_geom::Aabb;

/// One mesh placed in the scene, with bounds already in world space.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshInstance {
    /// Node or mesh name from the asset, if any.
    pub name: Option<String>,
    /// World-space bounds of the mesh.
    pub bounds: Aabb,
}

/// Renderable node graph produced by the asset loader.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeGraph {
    source: String,
    meshes: Vec<MeshInstance>,
    digest: [u8; 32],
}

impl NodeGraph {
    /// Wraps decoded meshes for `source` with the content digest of its bytes.
    pub fn new(source: impl Into<String>, meshes: Vec<MeshInstance>, digest: [u8; 32]) -> Self {
        Self {
            source: source.into(),
            meshes,
            digest,
        }
    }

    /// URL or path the graph was loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Mesh instances in traversal order.
    pub fn meshes(&self) -> &[MeshInstance] {
        &self.meshes
    }

    /// Content digest of the source bytes.
    pub fn digest(&self) -> &[u8; 32] {
        &self.digest
    }

    /// Union of every mesh's bounds; `None` when the graph has no meshes.
    pub fn bounding_box(&self) -> Option<Aabb> {
        let mut it = self.meshes.iter().map(|m| m.bounds);
        let first = it.next()?;
        Some(it.fold(first, |acc, b| acc.union(&b)))
    }
}
