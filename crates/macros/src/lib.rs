//! Kitsy Proc Macros
//!
//! This crate provides proc macros for the Kitsy toolkit:
//!
//! - `#[hook]` - Declare a before/after hook on an engine function
//! - `#[dialog_tag]` - Declare a custom dialogue tag handler
//!
//! # Hook Example
//!
//! ```ignore
//! use kitsy_core::{hook, Resume, Value};
//!
//! #[hook(before = "load_game")]
//! fn shout(args: &[Value]) -> Value {
//!     let data = args[0].as_str().unwrap_or_default().to_uppercase();
//!     Value::Array(vec![Value::String(data)])
//! }
//!
//! #[hook(after = "onExitDialog", asynchronous)]
//! fn wait_a_bit(_args: Vec<Value>, resume: Resume) {
//!     resume.resume();
//! }
//!
//! // Generated:
//! // - shout_register(&kitsy) -> Result<(), HookError>
//! // - wait_a_bit_register(&kitsy) -> Result<(), HookError>
//! ```
//!
//! # Dialogue Tag Example
//!
//! ```ignore
//! use kitsy_core::{dialog_tag, Value};
//!
//! #[dialog_tag("exit", deferred)]
//! fn exit_room(_env: &Value, params: &[Value]) -> Value {
//!     Value::Null
//! }
//!
//! // Generated:
//! // - exit_room_register(&kitsy) -> Result<bool, HookError>
//! ```

mod dialog_tag;
mod hook;

use proc_macro::TokenStream;
use syn::{parse_macro_input, ItemFn};

/// Attribute macro for engine function hooks
///
/// # Arguments
///
/// - `before = "path"` or `after = "path"` - **Required**, exactly one.
/// - `asynchronous` - Optional. The function takes `(Vec<Value>, Resume)`
///   and the chain continues once the `Resume` is consumed.
///
/// Synchronous hooks take `&[Value]` and return a `Value`. A before hook
/// returning a non-empty array replaces the arguments; an after hook
/// returning anything but `Null` replaces the return value.
///
/// # Generated Code
///
/// - The original function, unchanged
/// - `{name}_register(&Kitsy)` - Queue the hook on a registry
#[proc_macro_attribute]
pub fn hook(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = match hook::parse_hook_args(attr.into()) {
        Ok(args) => args,
        Err(e) => return e.write_errors().into(),
    };
    let func = parse_macro_input!(item as ItemFn);
    hook::generate_hook(args, func).into()
}

/// Attribute macro for dialogue tags
///
/// # Arguments
///
/// - First argument: Tag name (e.g., `"exit"`)
/// - Optional: `immediate` (default), `deferred` or `dual`
///
/// The handler takes the dialogue environment and the tag's parameters.
/// A `dual` tag registers `{name}Now` as immediate and `{name}` as deferred.
///
/// # Generated Code
///
/// - The original function, unchanged
/// - `{name}_register(&Kitsy)` - Queue the tag on a registry
#[proc_macro_attribute]
pub fn dialog_tag(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as dialog_tag::DialogTagArgs);
    let func = parse_macro_input!(item as ItemFn);
    dialog_tag::generate_dialog_tag(args, func).into()
}
