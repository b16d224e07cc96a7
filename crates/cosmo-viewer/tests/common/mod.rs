// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]
//! Shared fixtures for session tests.

use cosmo_asset::{LoaderPort, ScriptedLoader};
use cosmo_geom::{Aabb, Vec3};
use cosmo_scene_port::{MeshInstance, NodeGraph};
use cosmo_viewer::{AssetRef, HeadlessHost, SessionConfig, ViewerSession};

pub type Session = ViewerSession<HeadlessHost, ScriptedLoader>;

/// Graph with one mesh spanning `min..max`.
pub fn graph(url: &str, min: Vec3, max: Vec3) -> NodeGraph {
    NodeGraph::new(
        url,
        vec![MeshInstance {
            name: Some("body".to_owned()),
            bounds: Aabb::from_corners(min, max),
        }],
        [7; 32],
    )
}

/// 2×2×2 box resting on the floor, centered at `(0, 1, 0)`.
pub fn floor_box(url: &str) -> NodeGraph {
    graph(url, Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0))
}

pub fn mount(host: &HeadlessHost, url: Option<&str>) -> Session {
    ViewerSession::mount(
        host.clone(),
        ScriptedLoader::new(),
        url.map(AssetRef::from_url),
        SessionConfig::default(),
    )
    .unwrap()
}

/// Mount and commit `url` with [`floor_box`].
pub fn mount_ready(host: &HeadlessHost, url: &str) -> Session {
    let mut session = mount(host, Some(url));
    assert!(session.loader_mut().resolve(url, Ok(floor_box(url))));
    assert_eq!(session.poll_loads(), 1);
    session.drain_notices();
    session
}

/// Deliver queued host notifications to the session.
pub fn pump<L: LoaderPort>(host: &HeadlessHost, session: &mut ViewerSession<HeadlessHost, L>) {
    for event in host.take_events() {
        session.handle_host_event(event);
    }
}

