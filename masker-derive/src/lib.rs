//! Derive macro for `masker`.
//!
//! This crate generates the copier behind `#[derive(Mask)]`. It:
//! - reads `#[mask(...)]` container and field attributes
//! - emits a `Mask` implementation that hands every field to the `Masker`
//! - emits `StringLeaf` for `#[mask(leaf)]` newtypes
//!
//! It does **not** define the masking engine or any policy. Those live in the
//! main `masker` crate and run at call time.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

#[cfg(feature = "slog")]
use proc_macro2::Span;
use proc_macro2::{Ident, TokenStream};
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
#[cfg(feature = "slog")]
use syn::parse_quote;
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod derive_enum;
mod derive_leaf;
mod derive_struct;
mod generics;
mod strategy;
mod transform;
mod types;

use container::{parse_container_options, ContainerOptions};
use derive_enum::derive_enum;
use derive_leaf::derive_leaf;
use derive_struct::derive_struct;
use generics::{add_clone_bounds, add_mask_bounds};

/// Derives `masker::Mask` for structs and enums.
///
/// The generated impl reports `Kind::Struct`, treats the value as zero when
/// every walked field is zero, and builds the masked clone by passing each
/// field to `Masker::resolve`. The type must also implement `Clone`.
///
/// # Container Attributes
///
/// - `#[mask(leaf)]` - The type is a newtype over a string (`String`,
///   `Box<str>`, `Cow<'static, str>`, ...) and masks itself. The derive emits
///   `StringLeaf` and a `Mask` impl of kind `Kind::String`; the type must also
///   implement `MaskedString` and `Default`.
///
/// # Field Attributes
///
/// - **No annotation**: The field is walked. Its type must implement `Mask`.
/// - `#[mask(skip)]`: The field is cloned verbatim and ignored by the zero
///   check. Use this for types that do not implement `Mask`.
///
/// Unions are rejected at compile time.
///
/// # Additional Generated Impls
///
/// - `slog::Value` (behind `cfg(feature = "slog")`): logs the masked clone as
///   JSON through `masker::slog::IntoMaskedJson`, so the type must implement
///   `serde::Serialize`. The derive first looks for a top-level `slog` crate;
///   if not found, it checks the `MASKER_SLOG_CRATE` env var for an alternate
///   path (e.g., `my_log::slog`). If neither is available, compilation fails
///   with a clear error.
#[proc_macro_derive(Mask, attributes(mask))]
pub fn derive_mask(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the masker crate root.
///
/// Handles crate renaming (e.g., `my_masker = { package = "masker", ... }`).
/// Inside `masker` itself the crate is reachable as `::masker` through its
/// `extern crate self` alias, which also holds for its tests and doctests.
fn crate_root() -> TokenStream {
    match crate_name("masker") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::masker },
    }
}

/// Returns the token stream to reference the slog crate root.
///
/// Handles crate renaming (e.g., `my_slog = { package = "slog", ... }`).
/// If the top-level `slog` crate is not available, falls back to the
/// `MASKER_SLOG_CRATE` env var, which should be a path like `my_log::slog`.
#[cfg(feature = "slog")]
fn slog_crate() -> Result<TokenStream> {
    match crate_name("slog") {
        Ok(FoundCrate::Itself) => Ok(quote! { crate }),
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            Ok(quote! { ::#ident })
        }
        Err(_) => {
            let env_value = std::env::var("MASKER_SLOG_CRATE").map_err(|_| {
                syn::Error::new(
                    Span::call_site(),
                    "slog support is enabled, but no top-level `slog` crate was found. \
Set the MASKER_SLOG_CRATE env var to a path (e.g., `my_log::slog`) or add \
`slog` as a direct dependency.",
                )
            })?;
            let path = syn::parse_str::<syn::Path>(&env_value).map_err(|_| {
                syn::Error::new(
                    Span::call_site(),
                    format!("MASKER_SLOG_CRATE must be a valid Rust path (got `{env_value}`)"),
                )
            })?;
            Ok(quote! { #path })
        }
    }
}

fn crate_path(item: &str) -> TokenStream {
    let root = crate_root();
    let item = format_ident!("{}", item);
    quote! { #root::#item }
}

struct DeriveOutput {
    zero_body: TokenStream,
    mask_body: TokenStream,
    kind: TokenStream,
    leaf_impl_body: Option<TokenStream>,
    resolved_generics: Vec<Ident>,
    skipped_generics: Vec<Ident>,
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { leaf } = parse_container_options(&attrs)?;

    let crate_root = crate_root();

    let derive_output = match &data {
        Data::Struct(data) if leaf => {
            let output = derive_leaf(data, ident.span())?;
            DeriveOutput {
                zero_body: output.zero_body,
                mask_body: output.mask_body,
                kind: quote! { #crate_root::Kind::String },
                leaf_impl_body: Some(output.leaf_impl_body),
                resolved_generics: Vec::new(),
                skipped_generics: Vec::new(),
            }
        }
        Data::Struct(data) => {
            let output = derive_struct(data.clone(), &generics)?;
            DeriveOutput {
                zero_body: output.zero_body,
                mask_body: output.mask_body,
                kind: quote! { #crate_root::Kind::Struct },
                leaf_impl_body: None,
                resolved_generics: output.resolved_generics,
                skipped_generics: output.skipped_generics,
            }
        }
        Data::Enum(data) if leaf => {
            return Err(syn::Error::new(
                data.enum_token.span(),
                "#[mask(leaf)] can only be used on structs",
            ));
        }
        Data::Enum(data) => {
            let output = derive_enum(data.clone(), &generics)?;
            DeriveOutput {
                zero_body: output.zero_body,
                mask_body: output.mask_body,
                kind: quote! { #crate_root::Kind::Struct },
                leaf_impl_body: None,
                resolved_generics: output.resolved_generics,
                skipped_generics: output.skipped_generics,
            }
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Mask` cannot be derived for unions",
            ));
        }
    };

    let mask_generics = add_mask_bounds(generics.clone(), &derive_output.resolved_generics);
    let mask_generics = add_clone_bounds(mask_generics, &derive_output.skipped_generics);
    let (impl_generics, ty_generics, where_clause) = mask_generics.split_for_impl();
    let DeriveOutput {
        zero_body,
        mask_body,
        kind,
        leaf_impl_body,
        ..
    } = derive_output;

    let leaf_impl = leaf_impl_body.map(|body| {
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
        quote! {
            impl #impl_generics #crate_root::StringLeaf for #ident #ty_generics #where_clause {
                #body
            }
        }
    });

    // Only generate slog impl when the slog feature is enabled on masker-derive.
    #[cfg(feature = "slog")]
    let slog_impl = {
        let slog_crate = slog_crate()?;
        let mut slog_generics = generics.clone();
        let slog_where_clause = slog_generics.make_where_clause();
        let self_ty: syn::Type = parse_quote!(#ident #ty_generics);
        slog_where_clause
            .predicates
            .push(parse_quote!(#self_ty: ::serde::Serialize));
        slog_where_clause
            .predicates
            .push(parse_quote!(#self_ty: #crate_root::slog::IntoMaskedJson));
        let (slog_impl_generics, slog_ty_generics, slog_where_clause) =
            slog_generics.split_for_impl();
        quote! {
            impl #slog_impl_generics #slog_crate::Value for #ident #slog_ty_generics #slog_where_clause {
                fn serialize(
                    &self,
                    record: &#slog_crate::Record<'_>,
                    key: #slog_crate::Key,
                    serializer: &mut dyn #slog_crate::Serializer,
                ) -> #slog_crate::Result {
                    let masked = #crate_root::slog::IntoMaskedJson::into_masked_json(self);
                    #slog_crate::Value::serialize(&masked, record, key, serializer)
                }
            }
        }
    };

    #[cfg(not(feature = "slog"))]
    let slog_impl = quote! {};

    Ok(quote! {
        #leaf_impl

        impl #impl_generics #crate_root::Mask for #ident #ty_generics #where_clause {
            fn kind(&self) -> #crate_root::Kind {
                #kind
            }

            fn is_zero(&self) -> bool {
                #zero_body
            }

            fn mask_with(&self, __masker: &mut #crate_root::Masker) -> Self {
                #mask_body
            }
        }

        #slog_impl

        // `slog` already provides `impl<V: Value> Value for &V`, so a reference
        // impl here would conflict with the blanket impl.
    })
}
