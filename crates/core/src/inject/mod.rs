//! Source injection
//!
//! Rewrites the text of the page's script elements before the engine runs
//! them. Each queued [`InjectionRequest`] searches the document as it stands
//! when the request is applied, so a request may target text inserted by an
//! earlier one.
//!
//! Injected text is not validated. A bad splice only shows up when the
//! patched script is executed.

mod injector;
mod pattern;

use kitsy_engine::EngineError;

pub use injector::apply_injection;
pub use pattern::{replace_fn, Fragment, ReplaceFn, Replacement, SearchPattern};

/// Error type for applying injections
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InjectError {
    /// No script element other than the current one matches
    #[error("Couldn't find {pattern} in script tags")]
    TargetNotFound { pattern: String },

    #[error("Bad pattern {pattern}: {message}")]
    Pattern { pattern: String, message: String },

    #[error("Document error: {0}")]
    Document(#[from] EngineError),
}

/// A queued text substitution
#[derive(Debug, Clone, PartialEq)]
pub struct InjectionRequest {
    pub pattern: SearchPattern,
    pub replacement: Replacement,
}

impl InjectionRequest {
    pub fn new(pattern: SearchPattern, replacement: Replacement) -> Self {
        Self {
            pattern,
            replacement,
        }
    }
}
