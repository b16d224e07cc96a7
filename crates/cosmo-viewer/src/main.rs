// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! cosmo-viewer: headless demo. Loads a model, frames it, and logs each frame.
//!
//! Usage: `cosmo-viewer [MODEL_URL]` (http(s) URL or path to a `.glb`/`.gltf`).

use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod app;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_target(false)
        .without_time()
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;
    let model_url = std::env::args().nth(1);

    let mut app = app::App::new(runtime.handle().clone(), model_url)?;
    app.run(Duration::from_secs(30));
    app.shutdown();
    Ok(())
}
