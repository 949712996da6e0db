//! Per-field code generation shared by struct and enum derivation.

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote_spanned;

use crate::{crate_path, generics::collect_generics_from_type, strategy::Strategy};

/// Generic parameters collected while walking the fields of one container.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    /// Used by resolved fields: need `Mask`.
    pub(crate) resolved_generics: &'a mut Vec<Ident>,
    /// Used by skipped fields: need `Clone`.
    pub(crate) skipped_generics: &'a mut Vec<Ident>,
}

/// Tokens generated for one field, which is bound by reference to `binding`.
pub(crate) struct FieldTransform {
    /// Expression building the field's value in the masked clone.
    pub(crate) masked: TokenStream,
    /// Zero check, or `None` when the field does not take part in it.
    pub(crate) zero: Option<TokenStream>,
}

/// Generates the copy and zero-check expressions for a single field.
///
/// | Annotation | Copy | Zero check |
/// |------------|------|------------|
/// | None | `Masker::resolve` | `Mask::is_zero` |
/// | `#[mask(skip)]` | `Clone::clone` | ignored |
pub(crate) fn generate_field_transform(
    ctx: &mut DeriveContext<'_>,
    ty: &syn::Type,
    binding: &Ident,
    span: Span,
    strategy: &Strategy,
) -> FieldTransform {
    match strategy {
        Strategy::Resolve => {
            collect_generics_from_type(ty, ctx.generics, ctx.resolved_generics);
            let masker_path = crate_path("Masker");
            let mask_path = crate_path("Mask");
            FieldTransform {
                masked: quote_spanned! { span =>
                    #masker_path::resolve(__masker, #binding)
                },
                zero: Some(quote_spanned! { span =>
                    #mask_path::is_zero(#binding)
                }),
            }
        }
        Strategy::Skip => {
            collect_generics_from_type(ty, ctx.generics, ctx.skipped_generics);
            FieldTransform {
                masked: quote_spanned! { span =>
                    ::core::clone::Clone::clone(#binding)
                },
                zero: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use quote::{format_ident, quote};

    use super::*;

    #[test]
    fn resolved_field_collects_its_generics() {
        let generics: syn::Generics = syn::parse2(quote! { <T, U> }).unwrap();
        let ty: syn::Type = syn::parse2(quote! { Vec<T> }).unwrap();
        let mut resolved = Vec::new();
        let mut skipped = Vec::new();
        let mut ctx = DeriveContext {
            generics: &generics,
            resolved_generics: &mut resolved,
            skipped_generics: &mut skipped,
        };

        let transform = generate_field_transform(
            &mut ctx,
            &ty,
            &format_ident!("items"),
            Span::call_site(),
            &Strategy::Resolve,
        );

        assert!(transform.zero.is_some());
        assert!(transform.masked.to_string().contains("resolve"));
        assert_eq!(resolved, [format_ident!("T")]);
        assert!(skipped.is_empty());
    }

    #[test]
    fn skipped_field_is_cloned_and_left_out_of_the_zero_check() {
        let generics: syn::Generics = syn::parse2(quote! { <T> }).unwrap();
        let ty: syn::Type = syn::parse2(quote! { Option<T> }).unwrap();
        let mut resolved = Vec::new();
        let mut skipped = Vec::new();
        let mut ctx = DeriveContext {
            generics: &generics,
            resolved_generics: &mut resolved,
            skipped_generics: &mut skipped,
        };

        let transform = generate_field_transform(
            &mut ctx,
            &ty,
            &format_ident!("raw"),
            Span::call_site(),
            &Strategy::Skip,
        );

        assert!(transform.zero.is_none());
        assert!(transform.masked.to_string().contains("clone"));
        assert!(resolved.is_empty());
        assert_eq!(skipped, [format_ident!("T")]);
    }
}
