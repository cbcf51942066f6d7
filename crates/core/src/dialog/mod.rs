//! Dialogue tags
//!
//! Lets hacks add their own tags to the engine's dialogue scripting, either
//! run immediately when reached or deferred until the dialogue box closes.
//!
//! # Example
//!
//! ```ignore
//! use kitsy_core::Kitsy;
//!
//! let kitsy = Kitsy::new();
//! kitsy.add_deferred_dialog_tag("exit", |_env, params| {
//!     tracing::info!("leaving for {:?}", params);
//!     kitsy_core::Value::Null
//! })?;
//! // Dialogue may now contain `(exit "room")` or `{exit "room"}`.
//! ```

mod bridge;
mod queue;
mod syntax;

pub(crate) use bridge::DialogTags;
pub use bridge::{DialogTagEntry, TagMode, IMMEDIATE_SUFFIX};
pub use queue::TagCall;
pub use syntax::convert_tag_syntax;
