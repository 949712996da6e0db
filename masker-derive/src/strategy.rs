//! Parsing of `#[mask(...)]` field attributes.
//!
//! This module maps attribute syntax to traversal decisions and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, Meta, Result};

/// What the generated copier does with one field.
///
/// | Attribute | Strategy | Behavior |
/// |-----------|----------|----------|
/// | None | `Resolve` | Field goes through `Masker::resolve` |
/// | `#[mask(skip)]` | `Skip` | Field is cloned verbatim |
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Strategy {
    /// No annotation: the field is resolved and takes part in the zero check.
    Resolve,
    /// `#[mask(skip)]`: the field is cloned and ignored by the zero check.
    ///
    /// Lets a struct hold types that do not implement `Mask`.
    Skip,
}

fn set_strategy(target: &mut Option<Strategy>, next: Strategy, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple #[mask] attributes specified on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_strategy(attrs: &[Attribute]) -> Result<Strategy> {
    let mut strategy: Option<Strategy> = None;
    for attr in attrs {
        if !attr.path().is_ident("mask") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected a field option, e.g. #[mask(skip)]",
                ));
            }
            Meta::List(list) => {
                let mut parsed = None;
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip") {
                        set_strategy(&mut parsed, Strategy::Skip, meta.path.span())
                    } else {
                        Err(meta.error(format!(
                            "unknown field option `{}`; expected `skip`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
                if let Some(next) = parsed {
                    set_strategy(&mut strategy, next, attr.span())?;
                }
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[mask]",
                ));
            }
        }
    }

    Ok(strategy.unwrap_or(Strategy::Resolve))
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::DeriveInput;

    use super::*;

    fn strategy(tokens: proc_macro2::TokenStream) -> Result<Strategy> {
        let input: DeriveInput = syn::parse2(quote! {
            struct Login {
                #tokens
                phone: String,
            }
        })
        .unwrap();
        let syn::Data::Struct(data) = input.data else {
            unreachable!();
        };
        let field = data.fields.iter().next().unwrap();
        parse_field_strategy(&field.attrs)
    }

    fn error(tokens: proc_macro2::TokenStream) -> String {
        match strategy(tokens) {
            Ok(strategy) => panic!("expected an error, got {strategy:?}"),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn fields_are_resolved_by_default() {
        assert_eq!(strategy(quote! {}).unwrap(), Strategy::Resolve);
        assert_eq!(
            strategy(quote! { #[serde(skip)] #[doc = "field"] }).unwrap(),
            Strategy::Resolve
        );
    }

    #[test]
    fn skip_is_parsed() {
        assert_eq!(strategy(quote! { #[mask(skip)] }).unwrap(), Strategy::Skip);
    }

    #[test]
    fn repeated_attributes_are_rejected() {
        let message = error(quote! { #[mask(skip)] #[mask(skip)] });
        assert!(message.contains("multiple #[mask] attributes"));
        let message = error(quote! { #[mask(skip, skip)] });
        assert!(message.contains("multiple #[mask] attributes"));
    }

    #[test]
    fn malformed_attributes_are_rejected() {
        assert!(error(quote! { #[mask(hide)] }).contains("unknown field option `hide`"));
        assert!(error(quote! { #[mask] }).contains("expected a field option"));
        assert!(error(quote! { #[mask = "skip"] }).contains("name-value syntax is not supported"));
    }
}
