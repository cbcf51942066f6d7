//! Kitsy Engine - Host Model
//!
//! This crate models the running game engine the toolkit patches:
//! - The object graph of engine functions, addressed by dotted [`FnPath`]s
//! - The page's `<script>` elements as a [`ScriptDocument`]
//! - The dialogue [`TagTable`] consulted by the interpreter
//! - Subsystem factories used to rebuild engine objects after patching
//!
//! # Architecture
//!
//! A page is loaded into a document via [`loader::load_document`] and handed
//! to an [`Engine`]. The engine is optionally stored globally via
//! [`init_engine`] so independently built hacks can reach the same instance.
//!
//! # Thread Safety
//!
//! The engine is `Send + Sync`; all state sits behind `parking_lot` locks or
//! a `DashMap`. Locks are never held while engine functions run.

pub mod document;
pub mod error;
pub mod globals;
pub mod loader;
pub mod object;
pub mod path;
pub mod tags;

pub use document::{ScriptDocument, ScriptElement, ScriptKey};
pub use error::EngineError;
pub use globals::{
    init_engine, is_engine_initialized, try_engine, Engine, ScriptExecutor, SubsystemFactory,
};
pub use loader::load_document;
pub use object::{host_fn, HostFn, Member, Object};
pub use path::FnPath;
pub use serde_json::Value;
pub use tags::{scan_tags, TagFn, TagInvocation, TagTable};
