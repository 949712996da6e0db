//! Enum-specific `Mask` derivation.
//!
//! This module generates match arms for each variant and collects generic
//! parameters that require trait bounds. A variant is copied like a struct; a
//! value is zero when every non-skipped field of its variant is zero, so
//! fieldless variants are always zero.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{spanned::Spanned, DataEnum, Fields, Result};

use crate::{
    strategy::parse_field_strategy,
    transform::{generate_field_transform, DeriveContext, FieldTransform},
};

pub(crate) struct EnumDeriveOutput {
    pub(crate) zero_body: TokenStream,
    pub(crate) mask_body: TokenStream,
    pub(crate) resolved_generics: Vec<Ident>,
    pub(crate) skipped_generics: Vec<Ident>,
}

/// Match arms collected for the whole enum.
#[derive(Default)]
struct Arms {
    zero: Vec<TokenStream>,
    mask: Vec<TokenStream>,
}

pub(crate) fn derive_enum(data: DataEnum, generics: &syn::Generics) -> Result<EnumDeriveOutput> {
    let mut resolved_generics = Vec::new();
    let mut skipped_generics = Vec::new();
    let mut arms = Arms::default();

    if data.variants.is_empty() {
        return Ok(EnumDeriveOutput {
            zero_body: quote! { match *self {} },
            mask_body: quote! { match *self {} },
            resolved_generics,
            skipped_generics,
        });
    }

    for variant in data.variants {
        let mut ctx = DeriveContext {
            generics,
            resolved_generics: &mut resolved_generics,
            skipped_generics: &mut skipped_generics,
        };
        let variant_ident = &variant.ident;

        match variant.fields {
            Fields::Unit => {
                arms.zero.push(quote! { Self::#variant_ident => true });
                arms.mask.push(quote! { Self::#variant_ident => Self::#variant_ident });
            }
            Fields::Named(fields) => {
                derive_named_variant(&mut arms, &mut ctx, variant_ident, fields)?;
            }
            Fields::Unnamed(fields) => {
                derive_unnamed_variant(&mut arms, &mut ctx, variant_ident, fields)?;
            }
        }
    }

    let Arms { zero, mask } = arms;
    Ok(EnumDeriveOutput {
        zero_body: quote! {
            match self {
                #(#zero),*
            }
        },
        mask_body: quote! {
            match self {
                #(#mask),*
            }
        },
        resolved_generics,
        skipped_generics,
    })
}

fn derive_named_variant(
    arms: &mut Arms,
    ctx: &mut DeriveContext<'_>,
    variant_ident: &Ident,
    fields: syn::FieldsNamed,
) -> Result<()> {
    let mut bindings = Vec::new();
    let mut zero_patterns = Vec::new();
    let mut zero_checks = Vec::new();
    let mut masked_fields = Vec::new();

    for field in fields.named {
        let span = field.span();
        let strategy = parse_field_strategy(&field.attrs)?;
        let Some(ident) = field.ident else {
            return Err(syn::Error::new(span, "named field without an identifier"));
        };
        let FieldTransform { masked, zero } =
            generate_field_transform(ctx, &field.ty, &ident, span, &strategy);

        match zero {
            Some(check) => {
                zero_patterns.push(quote! { #ident });
                zero_checks.push(check);
            }
            None => zero_patterns.push(quote! { #ident: _ }),
        }
        masked_fields.push(quote! { #ident: #masked });
        bindings.push(ident);
    }

    arms.zero.push(quote! {
        Self::#variant_ident { #(#zero_patterns),* } => true #(&& #zero_checks)*
    });
    arms.mask.push(quote! {
        Self::#variant_ident { #(#bindings),* } => Self::#variant_ident { #(#masked_fields),* }
    });
    Ok(())
}

fn derive_unnamed_variant(
    arms: &mut Arms,
    ctx: &mut DeriveContext<'_>,
    variant_ident: &Ident,
    fields: syn::FieldsUnnamed,
) -> Result<()> {
    let mut bindings = Vec::new();
    let mut zero_patterns = Vec::new();
    let mut zero_checks = Vec::new();
    let mut masked_fields = Vec::new();

    for (index, field) in fields.unnamed.into_iter().enumerate() {
        let ident = format_ident!("field_{index}");
        let span = field.span();
        let strategy = parse_field_strategy(&field.attrs)?;
        let FieldTransform { masked, zero } =
            generate_field_transform(ctx, &field.ty, &ident, span, &strategy);

        match zero {
            Some(check) => {
                zero_patterns.push(quote! { #ident });
                zero_checks.push(check);
            }
            None => zero_patterns.push(quote! { _ }),
        }
        masked_fields.push(masked);
        bindings.push(ident);
    }

    arms.zero.push(quote! {
        Self::#variant_ident ( #(#zero_patterns),* ) => true #(&& #zero_checks)*
    });
    arms.mask.push(quote! {
        Self::#variant_ident ( #(#bindings),* ) => Self::#variant_ident ( #(#masked_fields),* )
    });
    Ok(())
}
