//! Hook system
//!
//! Intercepts calls to engine functions by composing ordered callbacks
//! around the original:
//! - Before hooks (may rewrite the original's arguments)
//! - The original function
//! - After hooks (may override the return value)
//!
//! Hooks are declared synchronous or asynchronous up front. An asynchronous
//! hook receives a [`Resume`] and the chain only advances once it is consumed.
//!
//! # Example
//!
//! ```ignore
//! use kitsy_core::{Kitsy, Value};
//!
//! let kitsy = Kitsy::new();
//! kitsy.before("load_game", |args: &[Value]| {
//!     let data = args[0].as_str().unwrap_or_default();
//!     serde_json::json!([data.to_uppercase()])
//! })?;
//! kitsy.after_async("onExitDialog", |_args, resume| {
//!     // wait for something, then:
//!     resume.resume();
//! })?;
//! ```

mod chain;
mod table;
mod types;

pub use chain::Resume;
pub use table::{HookList, HookTable};
pub use types::{AsyncHookFn, Hook, HookError, HookPosition, SyncHookFn};
