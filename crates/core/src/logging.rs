//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::KitsyConfig;

/// Install the global fmt subscriber
///
/// `RUST_LOG` wins over the config's filter. Returns `false` if a subscriber
/// was already installed (for example by the host or another hack).
pub fn init(config: &KitsyConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.filter_directive()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("Logging initialized");
    }
    installed
}
