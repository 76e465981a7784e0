//! Comms subsystem: external I/O channels.
//!
//! Each channel implements [`Component`] and is spawned by [`start`] via
//! [`spawn_components`]. Channels capture their shared [`AppState`] at
//! construction time; the generic `Component::run` signature only needs the
//! shutdown token.

#[cfg(feature = "channel-axum")]
pub mod axum_channel;

#[cfg(feature = "channel-axum")]
pub use axum_channel::{AppState, AxumChannel, build_router};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::Config;
use crate::pipeline::Pipeline;
use crate::subsystems::runtime::{Component, ComponentsHandle, spawn_components};

/// Spawn the configured channels and return a handle that resolves when
/// they have all exited.
///
/// Synchronous: returns as soon as the tasks are spawned. If a channel
/// fails, `shutdown` is cancelled so siblings stop too.
pub fn start(config: &Config, pipeline: Arc<Pipeline>, shutdown: CancellationToken) -> ComponentsHandle {
    let mut components: Vec<Box<dyn Component>> = Vec::new();

    #[cfg(feature = "channel-axum")]
    {
        info!(bind = %config.server.bind, "loading axum channel");
        let state = AppState::new(config.server.name.as_str(), pipeline, config.server.index_file.clone());
        components.push(Box::new(AxumChannel::new("axum0", config.server.bind.clone(), state)));
    }
    #[cfg(not(feature = "channel-axum"))]
    {
        let _ = (config, pipeline);
        tracing::warn!(
            "this binary was compiled without the `channel-axum` feature — \
             no HTTP channel will start. Rebuild with `--features channel-axum`."
        );
    }

    if components.is_empty() {
        info!("no comms channels configured — waiting for shutdown");
    }

    spawn_components(components, shutdown)
}
