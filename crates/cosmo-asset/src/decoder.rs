// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! glTF 2.0 bounds decoder on top of the `gltf` crate.
//!
//! Only placement is read: the scene's node hierarchy with its transforms and
//! the `POSITION` bounds of every mesh primitive. Buffers are never loaded.

use std::collections::HashSet;

use cosmo_geom::{Aabb, Mat4, Vec3};
use cosmo_scene_port::{LoadError, MeshInstance, NodeGraph};
use gltf::json::validation;
use gltf::{Gltf, Node, Semantic};

fn malformed(msg: impl Into<String>) -> LoadError {
    LoadError::Malformed(msg.into())
}

fn map_gltf_error(err: gltf::Error) -> LoadError {
    match err {
        gltf::Error::Validation(ref errors)
            if errors
                .iter()
                .any(|(_, e)| matches!(e, validation::Error::Unsupported)) =>
        {
            LoadError::Unsupported(err.to_string())
        }
        gltf::Error::Binary(gltf::binary::Error::Version(v)) => {
            LoadError::Unsupported(format!("GLB container version {v}"))
        }
        other => malformed(other.to_string()),
    }
}

/// Union of the primitive `POSITION` bounds of `mesh`, in mesh space.
fn mesh_bounds(mesh: &gltf::Mesh<'_>) -> Result<Option<Aabb>, LoadError> {
    let mut bounds: Option<Aabb> = None;
    for prim in mesh.primitives() {
        let Some(positions) = prim.get(&Semantic::Positions) else {
            continue;
        };
        if positions.min().is_none() || positions.max().is_none() {
            return Err(malformed(format!(
                "POSITION accessor {} lacks min/max",
                positions.index()
            )));
        }
        let bb = prim.bounding_box();
        let prim_box = Aabb::from_corners(Vec3::from_array(bb.min), Vec3::from_array(bb.max));
        bounds = Some(bounds.map_or(prim_box, |b| b.union(&prim_box)));
    }
    Ok(bounds)
}

/// Default scene, else the first scene, else every node nobody parents.
fn root_nodes(doc: &gltf::Document) -> Vec<Node<'_>> {
    if let Some(scene) = doc.default_scene().or_else(|| doc.scenes().next()) {
        return scene.nodes().collect();
    }
    let children: HashSet<usize> = doc
        .nodes()
        .flat_map(|n| n.children().map(|c| c.index()).collect::<Vec<_>>())
        .collect();
    doc.nodes().filter(|n| !children.contains(&n.index())).collect()
}

fn build_graph(source: &str, gltf: &Gltf, digest: [u8; 32]) -> Result<NodeGraph, LoadError> {
    let version = &gltf.as_json().asset.version;
    if !version.starts_with("2.") {
        return Err(LoadError::Unsupported(format!("glTF version {version}")));
    }

    let node_count = gltf.nodes().len();
    let mut meshes = Vec::new();
    let mut stack: Vec<(Node<'_>, Mat4)> = root_nodes(gltf)
        .into_iter()
        .rev()
        .map(|n| (n, Mat4::IDENTITY))
        .collect();
    let mut visits = 0usize;

    while let Some((node, parent)) = stack.pop() {
        visits += 1;
        if visits > node_count {
            return Err(malformed("node hierarchy is not a tree"));
        }
        let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

        if let Some(mesh) = node.mesh() {
            if let Some(local) = mesh_bounds(&mesh)? {
                let name = node.name().or_else(|| mesh.name()).map(str::to_owned);
                meshes.push(MeshInstance {
                    name,
                    bounds: local.transformed(&world),
                });
            }
        }
        let children: Vec<_> = node.children().collect();
        for child in children.into_iter().rev() {
            stack.push((child, world));
        }
    }

    Ok(NodeGraph::new(source, meshes, digest))
}

/// Decode `bytes` fetched from `source` into a [`NodeGraph`].
///
/// Accepts a GLB container or a bare glTF JSON document. Mesh bounds are the
/// `POSITION` min/max carried through each node's world transform.
pub fn decode(source: &str, bytes: &[u8]) -> Result<NodeGraph, LoadError> {
    let is_glb = bytes.starts_with(b"glTF");
    let is_json = bytes.iter().find(|b| !b.is_ascii_whitespace()) == Some(&b'{');
    if !is_glb && !is_json {
        return Err(LoadError::Unsupported("not a glTF or GLB asset".into()));
    }
    let digest = *blake3::hash(bytes).as_bytes();
    let gltf = Gltf::from_slice(bytes).map_err(map_gltf_error)?;
    build_graph(source, &gltf, digest)
}
