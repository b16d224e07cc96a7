// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Round trips through the filesystem config store.

use cosmo_app_core::config::{ConfigError, ConfigService, ConfigStore};
use cosmo_app_core::config_port::ConfigPort;
use cosmo_app_core::prefs::ViewerPrefs;
use cosmo_config_fs::FsConfigStore;

#[test]
fn missing_key_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsConfigStore::at(dir.path()).unwrap();
    assert!(matches!(store.load_raw("viewer_prefs"), Err(ConfigError::NotFound)));
}

#[test]
fn prefs_persist_as_pretty_json() {
    let dir = tempfile::tempdir().unwrap();
    let svc = ConfigService::new(FsConfigStore::at(dir.path().join("nested")).unwrap());

    let mut prefs = ViewerPrefs::default();
    prefs.environment.preset = Some("galaxy".into());
    prefs.camera.auto_rotate = true;
    svc.save_prefs(&prefs);

    let file = dir.path().join("nested").join("viewer_prefs.json");
    let text = std::fs::read_to_string(&file).unwrap();
    assert!(text.contains("\"preset\": \"galaxy\""));
    assert!(!file.with_extension("json.tmp").exists());

    let reopened = ConfigService::new(FsConfigStore::at(dir.path().join("nested")).unwrap());
    assert_eq!(reopened.load_prefs(), Some(prefs));
}

#[test]
fn path_like_keys_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsConfigStore::at(dir.path()).unwrap();
    assert!(matches!(
        store.save_raw("../escape", b"{}"),
        Err(ConfigError::Unavailable(_))
    ));
}
