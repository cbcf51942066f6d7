//! Top-level error type

use kitsy_engine::EngineError;

use crate::config::ConfigError;
use crate::hooks::HookError;
use crate::inject::InjectError;

/// Errors surfaced by the toolkit
#[derive(Debug, thiserror::Error)]
pub enum KitsyError {
    /// An injection could not be applied; later injections did not run
    #[error("Injection failed: {0}")]
    Inject(#[from] InjectError),

    /// Hook registration or composition failed
    #[error(transparent)]
    Hook(#[from] HookError),

    /// Engine state could not be accessed
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for toolkit operations
pub type KitsyResult<T> = Result<T, KitsyError>;
