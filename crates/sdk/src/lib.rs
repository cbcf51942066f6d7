//! Kitsy SDK - Host Engine Definitions
//!
//! This crate describes the host engine the toolkit patches: the dotted paths
//! of the functions the toolkit hooks for its own wiring and the subsystems that must be rebuilt after source patching.
//! It has no dependencies and compiles quickly, allowing parallel compilation
//! of dependent crates.
//!
//! # Modules
//!
//! - [`paths`] - Well-known function paths
//! - [`versions`] - Engine version and subsystem rebuild order

pub mod paths;
pub mod versions;

pub use paths::*;
pub use versions::{ENGINE_VERSION, REINIT_ORDER};
