//! Kitsy Core - Game Modding Toolkit
//!
//! Lets independently written hacks patch a running game engine:
//! - Rewrite the page's script text before it runs ([`inject`])
//! - Wrap engine functions with before/after callbacks ([`hooks`])
//! - Add custom dialogue tags ([`dialog`])
//!
//! Everything is queued on a [`Kitsy`] registry and applied in one pass when
//! the game starts.
//!
//! # Re-exports
//!
//! - [`sdk`] - Engine function paths and subsystem names
//! - [`engine`] - The host engine model

// Allow the crate to refer to itself as `kitsy_core` for proc macro compatibility
extern crate self as kitsy_core;

use std::sync::Arc;

use tracing::info;

pub use kitsy_engine as engine;
pub use kitsy_sdk as sdk;

mod bootstrap;
pub mod config;
pub mod dialog;
pub mod error;
pub mod hooks;
pub mod inject;
pub mod logging;
pub mod registry;
pub mod reinit;

pub use config::{ConfigError, ConfigResult, EnginePaths, KitsyConfig};
pub use dialog::{convert_tag_syntax, DialogTagEntry, TagCall, TagMode};
pub use error::{KitsyError, KitsyResult};
pub use hooks::{Hook, HookError, HookPosition, Resume};
pub use inject::{Fragment, InjectError, Replacement, SearchPattern};
pub use registry::{configure_global, global, ApplyReport, Kitsy};
pub use reinit::{Reinitializer, SubsystemReinitializer};

pub use kitsy_engine::{Engine, Value};

// Re-export macros
pub use kitsy_macros::{dialog_tag, hook};

/// Load the config, set up logging and wire the shared registry into `engine`
///
/// Everything hacks register on [`global()`] is applied when the engine's
/// start function is first called.
pub fn init(engine: &Arc<Engine>) -> KitsyResult<Arc<Kitsy>> {
    let config = KitsyConfig::load()?;
    logging::init(&config);

    if !configure_global(&config) {
        tracing::warn!("Shared registry already created, configured engine paths ignored");
    }

    let kitsy = global();
    kitsy.install_bootstrap(engine)?;

    info!(
        "Kitsy {} ready for engine {}",
        env!("CARGO_PKG_VERSION"),
        sdk::ENGINE_VERSION
    );
    Ok(kitsy)
}
