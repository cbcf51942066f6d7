//! Hook callback types

use std::fmt;
use std::sync::Arc;

use kitsy_engine::{EngineError, Value};

use super::chain::Resume;

/// Synchronous hook: runs in line with the chain
///
/// A non-empty array return replaces the arguments seen by the next step.
/// Any other non-null return becomes the chain's return value.
pub type SyncHookFn = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// Asynchronous hook: suspends the chain until `Resume` is consumed
pub type AsyncHookFn = Arc<dyn Fn(Vec<Value>, Resume) + Send + Sync>;

/// A registered before/after callback
///
/// The variant decides how the chain advances past this hook. There is no
/// inference from parameter counts.
#[derive(Clone)]
pub enum Hook {
    Sync(SyncHookFn),
    Async(AsyncHookFn),
}

impl Hook {
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Hook::Sync(Arc::new(f))
    }

    pub fn asynchronous<F>(f: F) -> Self
    where
        F: Fn(Vec<Value>, Resume) + Send + Sync + 'static,
    {
        Hook::Async(Arc::new(f))
    }

    pub fn is_async(&self) -> bool {
        matches!(self, Hook::Async(_))
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hook::Sync(_) => f.write_str("Hook::Sync"),
            Hook::Async(_) => f.write_str("Hook::Async"),
        }
    }
}

/// Which side of the original a hook runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPosition {
    Before,
    After,
}

/// Error type for hook registration and composition
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    #[error("Invalid hook path: {0:?}")]
    InvalidPath(String),

    /// Tag names must be non-empty and free of whitespace, quotes,
    /// backslashes, parentheses and braces
    #[error("Invalid dialog tag name: {0:?}")]
    InvalidTag(String),

    #[error("Cannot hook '{path}': {source}")]
    Engine {
        path: String,
        #[source]
        source: EngineError,
    },
}
