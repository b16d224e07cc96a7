// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]
//! End-to-end loads through the channel loader.

use std::collections::HashMap;
use std::time::Duration;

use cosmo_asset::{
    decode, load_with, AssetSource, ChannelLoader, FileSource, LoadOutcome, LoaderPort,
    TokenCounter,
};
use cosmo_geom::Vec3;
use cosmo_scene_port::LoadError;

const BOX_JSON: &str = r#"{
    "asset": {"version": "2.0"},
    "scene": 0,
    "scenes": [{"nodes": [0]}],
    "nodes": [{"name": "rover", "mesh": 0, "translation": [0, 1, 0]}],
    "meshes": [{"primitives": [{"attributes": {"POSITION": 0}}]}],
    "accessors": [{"componentType": 5126, "count": 8, "type": "VEC3",
        "min": [-1, -1, -1], "max": [1, 1, 1]}]
}"#;

fn glb(json: &str) -> Vec<u8> {
    let mut chunk = json.as_bytes().to_vec();
    while chunk.len() % 4 != 0 {
        chunk.push(b' ');
    }
    let total = 12 + 8 + chunk.len();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&u32::try_from(total).unwrap().to_le_bytes());
    out.extend_from_slice(&u32::try_from(chunk.len()).unwrap().to_le_bytes());
    out.extend_from_slice(b"JSON");
    out.extend_from_slice(&chunk);
    out
}

struct MemorySource(HashMap<&'static str, Vec<u8>>);

impl AssetSource for MemorySource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        self.0
            .get(url)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(url.to_owned()))
    }
}

async fn drain_until(loader: &mut impl LoaderPort, want: usize) -> Vec<LoadOutcome> {
    let mut got = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), async {
        while got.len() < want {
            got.extend(loader.drain(16));
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("loads did not complete");
    got
}

#[test]
fn glb_and_gltf_decode_to_the_same_bounds() {
    let from_glb = decode("rover.glb", &glb(BOX_JSON)).unwrap();
    let from_json = decode("rover.gltf", BOX_JSON.as_bytes()).unwrap();
    assert_eq!(from_glb.bounding_box(), from_json.bounding_box());
    let b = from_glb.bounding_box().unwrap();
    assert_eq!(b.center(), Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(b.size(), Vec3::splat(2.0));
    assert_ne!(from_glb.digest(), from_json.digest());
}

#[test]
fn truncated_glb_is_malformed() {
    let mut bytes = glb(BOX_JSON);
    bytes.truncate(24);
    assert!(matches!(
        decode("rover.glb", &bytes),
        Err(LoadError::Malformed(_))
    ));
}

#[tokio::test]
async fn load_with_reports_not_found() {
    let source = MemorySource(HashMap::new());
    let err = load_with(&source, "missing.glb").await.unwrap_err();
    assert_eq!(err, LoadError::NotFound("missing.glb".into()));
}

#[tokio::test]
async fn channel_loader_delivers_tagged_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rover.glb");
    std::fs::write(&path, glb(BOX_JSON)).unwrap();
    let url = path.to_str().unwrap().to_owned();

    let mut tokens = TokenCounter::new();
    let mut loader = ChannelLoader::new(FileSource, tokio::runtime::Handle::current());
    let first = tokens.issue();
    let second = tokens.issue();
    loader.request(first, &url);
    loader.request(second, "/definitely/not/here.glb");

    let mut outcomes = drain_until(&mut loader, 2).await;
    outcomes.sort_by_key(|o| o.token);
    assert_eq!(outcomes[0].token, first);
    assert_eq!(outcomes[0].url, url);
    let graph = outcomes[0].result.as_ref().unwrap();
    assert_eq!(graph.meshes()[0].name.as_deref(), Some("rover"));
    assert!(matches!(outcomes[1].result, Err(LoadError::NotFound(_))));
    assert!(loader.drain(16).is_empty());
}
