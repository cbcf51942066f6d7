//! Hook attribute macro implementation
//!
//! Provides the `#[hook]` attribute for declaring engine function hooks.

use darling::ast::NestedMeta;
use darling::FromMeta;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, ItemFn};

/// Arguments to the hook attribute
///
/// Usage:
/// - `#[hook(before = "load_game")]`
/// - `#[hook(after = "onExitDialog", asynchronous)]`
#[derive(Debug, FromMeta)]
pub struct HookArgs {
    /// Path hooked before the original runs
    pub before: Option<String>,

    /// Path hooked after the original runs
    pub after: Option<String>,

    /// Hook receives a `Resume` instead of returning a value
    #[darling(default)]
    pub asynchronous: bool,
}

/// Parse the attribute token stream into HookArgs
pub fn parse_hook_args(attr: TokenStream) -> darling::Result<HookArgs> {
    let list = NestedMeta::parse_meta_list(attr)?;
    HookArgs::from_list(&list)
}

/// Generate the hook implementation
pub fn generate_hook(args: HookArgs, func: ItemFn) -> TokenStream {
    let (path, before) = match (&args.before, &args.after) {
        (Some(path), None) => (path, true),
        (None, Some(path)) => (path, false),
        _ => {
            return syn::Error::new_spanned(
                &func.sig.ident,
                "#[hook] needs exactly one of `before = \"...\"` or `after = \"...\"`",
            )
            .to_compile_error();
        }
    };

    let fn_name = &func.sig.ident;
    let fn_vis = &func.vis;

    let method = match (before, args.asynchronous) {
        (true, false) => "before",
        (false, false) => "after",
        (true, true) => "before_async",
        (false, true) => "after_async",
    };
    let method = Ident::new(method, fn_name.span());

    let register_fn_name = Ident::new(&format!("{}_register", fn_name), fn_name.span());

    quote! {
        #func

        /// Register this hook on a Kitsy registry
        #fn_vis fn #register_fn_name(
            kitsy: &::kitsy_core::Kitsy,
        ) -> ::core::result::Result<(), ::kitsy_core::HookError> {
            kitsy.#method(#path, #fn_name)
        }
    }
}
