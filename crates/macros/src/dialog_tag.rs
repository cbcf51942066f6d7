//! Dialogue tag attribute macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse::Parse, parse::ParseStream, Ident, ItemFn, LitStr, Token};

/// When the tag handler runs
pub enum TagKind {
    Immediate,
    Deferred,
    Dual,
}

/// Arguments to the dialog_tag attribute
///
/// Usage:
/// - `#[dialog_tag("shake")]`
/// - `#[dialog_tag("exit", deferred)]`
/// - `#[dialog_tag("give", dual)]`
pub struct DialogTagArgs {
    /// Tag name as written in dialogue
    pub name: LitStr,
    pub kind: TagKind,
}

impl Parse for DialogTagArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: LitStr = input.parse()?;
        if name.value().is_empty() {
            return Err(syn::Error::new(name.span(), "tag name cannot be empty"));
        }

        let kind = if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            let ident: Ident = input.parse()?;
            match ident.to_string().as_str() {
                "immediate" => TagKind::Immediate,
                "deferred" => TagKind::Deferred,
                "dual" => TagKind::Dual,
                _ => {
                    return Err(syn::Error::new(
                        ident.span(),
                        "expected `immediate`, `deferred` or `dual`",
                    ))
                }
            }
        } else {
            TagKind::Immediate
        };

        Ok(Self { name, kind })
    }
}

/// Generate the dialog_tag implementation
pub fn generate_dialog_tag(args: DialogTagArgs, func: ItemFn) -> TokenStream {
    let fn_name = &func.sig.ident;
    let fn_vis = &func.vis;
    let tag_name = &args.name;

    let mode = match args.kind {
        TagKind::Immediate => quote! { ::kitsy_core::TagMode::IMMEDIATE },
        TagKind::Deferred => quote! { ::kitsy_core::TagMode::DEFERRED },
        TagKind::Dual => {
            quote! { ::kitsy_core::TagMode::IMMEDIATE | ::kitsy_core::TagMode::DEFERRED }
        }
    };

    let register_fn_name = Ident::new(&format!("{}_register", fn_name), fn_name.span());

    quote! {
        #func

        /// Register this tag on a Kitsy registry
        ///
        /// Returns `Ok(false)` if the tag name was already taken.
        #fn_vis fn #register_fn_name(
            kitsy: &::kitsy_core::Kitsy,
        ) -> ::core::result::Result<bool, ::kitsy_core::HookError> {
            kitsy.add_tag(#tag_name, #mode, #fn_name)
        }
    }
}
