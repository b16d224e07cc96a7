// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Object-safe config port consumed by the viewer session and app shell.

use crate::prefs::ViewerPrefs;

/// Loads and saves viewer preferences.
pub trait ConfigPort {
    /// Load viewer preferences (None if missing or unreadable).
    fn load_prefs(&self) -> Option<ViewerPrefs>;
    /// Persist viewer preferences (best-effort; failures are logged, not returned).
    fn save_prefs(&self, prefs: &ViewerPrefs);
}

/// Port for sessions that have no backing store.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoConfig;

impl ConfigPort for NoConfig {
    fn load_prefs(&self) -> Option<ViewerPrefs> {
        None
    }

    fn save_prefs(&self, _prefs: &ViewerPrefs) {}
}
