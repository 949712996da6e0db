//! Struct-specific `Mask` derivation.
//!
//! This module generates the struct copier (every field rebuilt through the
//! masker) and the zero check, and collects generic parameters that require
//! trait bounds.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{spanned::Spanned, DataStruct, Fields, Result};

use crate::{
    strategy::parse_field_strategy,
    transform::{generate_field_transform, DeriveContext, FieldTransform},
};

pub(crate) struct StructDeriveOutput {
    pub(crate) zero_body: TokenStream,
    pub(crate) mask_body: TokenStream,
    pub(crate) resolved_generics: Vec<Ident>,
    pub(crate) skipped_generics: Vec<Ident>,
}

pub(crate) fn derive_struct(
    data: DataStruct,
    generics: &syn::Generics,
) -> Result<StructDeriveOutput> {
    let mut resolved_generics = Vec::new();
    let mut skipped_generics = Vec::new();
    let mut ctx = DeriveContext {
        generics,
        resolved_generics: &mut resolved_generics,
        skipped_generics: &mut skipped_generics,
    };

    let (zero_body, mask_body) = match data.fields {
        Fields::Named(fields) => derive_named_struct(&mut ctx, fields)?,
        Fields::Unnamed(fields) => derive_unnamed_struct(&mut ctx, fields)?,
        Fields::Unit => (quote! { true }, quote! { ::core::clone::Clone::clone(self) }),
    };

    Ok(StructDeriveOutput {
        zero_body,
        mask_body,
        resolved_generics,
        skipped_generics,
    })
}

fn derive_named_struct(
    ctx: &mut DeriveContext<'_>,
    fields: syn::FieldsNamed,
) -> Result<(TokenStream, TokenStream)> {
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

    Ok((
        quote! {
            let Self { #(#zero_patterns),* } = self;
            true #(&& #zero_checks)*
        },
        quote! {
            let Self { #(#bindings),* } = self;
            Self { #(#masked_fields),* }
        },
    ))
}

fn derive_unnamed_struct(
    ctx: &mut DeriveContext<'_>,
    fields: syn::FieldsUnnamed,
) -> Result<(TokenStream, TokenStream)> {
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

    Ok((
        quote! {
            let Self ( #(#zero_patterns),* ) = self;
            true #(&& #zero_checks)*
        },
        quote! {
            let Self ( #(#bindings),* ) = self;
            Self ( #(#masked_fields),* )
        },
    ))
}
