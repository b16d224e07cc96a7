// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for the Cosmo viewer (config, prefs, toasts).
//! Keeps the session and UI adapters free of storage and banner bookkeeping.

pub mod config;
pub mod config_port;
pub mod prefs;
pub mod toast;
