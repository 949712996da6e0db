//! `#[mask(leaf)]`: string newtypes that mask themselves.
//!
//! The wrapped field must be a string type: readable as `&str` through
//! `AsRef<str>` and buildable from a `String` through `From<String>`. The
//! generated `StringLeaf` always accepts the masked string, so only hand-written
//! leaves can reject it.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{spanned::Spanned, DataStruct, Fields, Index, Member, Result};

use crate::{
    crate_path,
    strategy::{parse_field_strategy, Strategy},
    types::is_scalar_type,
};

pub(crate) struct LeafDeriveOutput {
    pub(crate) leaf_impl_body: TokenStream,
    pub(crate) zero_body: TokenStream,
    pub(crate) mask_body: TokenStream,
}

pub(crate) fn derive_leaf(data: &DataStruct, span: Span) -> Result<LeafDeriveOutput> {
    let (member, field) = match &data.fields {
        Fields::Named(fields) if fields.named.len() == 1 => {
            let field = &fields.named[0];
            let Some(ident) = field.ident.clone() else {
                return Err(syn::Error::new(field.span(), "named field without an identifier"));
            };
            (Member::Named(ident), field)
        }
        Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
            (Member::Unnamed(Index::from(0_usize)), &fields.unnamed[0])
        }
        _ => {
            return Err(syn::Error::new(
                span,
                "#[mask(leaf)] requires a struct with exactly one field",
            ));
        }
    };

    if parse_field_strategy(&field.attrs)? == Strategy::Skip {
        return Err(syn::Error::new(
            field.span(),
            "the field of a #[mask(leaf)] type cannot be skipped",
        ));
    }
    if is_scalar_type(&field.ty) {
        return Err(syn::Error::new(
            field.ty.span(),
            "#[mask(leaf)] wraps a string; scalar fields are never masked",
        ));
    }

    let string_leaf = crate_path("StringLeaf");
    let masker_path = crate_path("Masker");

    Ok(LeafDeriveOutput {
        leaf_impl_body: quote! {
            fn as_text(&self) -> &str {
                ::core::convert::AsRef::<str>::as_ref(&self.#member)
            }

            fn from_masked(
                masked: ::std::string::String,
            ) -> ::core::result::Result<Self, ::std::string::String> {
                ::core::result::Result::Ok(Self {
                    #member: ::core::convert::From::from(masked),
                })
            }
        },
        zero_body: quote! {
            #string_leaf::as_text(self).is_empty()
        },
        mask_body: quote! {
            #masker_path::resolve_leaf(__masker, self)
        },
    })
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::{Data, DeriveInput};

    use super::*;

    fn derive(tokens: TokenStream) -> Result<LeafDeriveOutput> {
        let input: DeriveInput = syn::parse2(tokens).unwrap();
        let Data::Struct(data) = &input.data else {
            panic!("expected a struct");
        };
        derive_leaf(data, input.ident.span())
    }

    fn error(tokens: TokenStream) -> String {
        match derive(tokens) {
            Ok(_) => panic!("expected an error"),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn tuple_newtype_reads_field_zero() {
        let output = derive(quote! { struct Phone(String); }).unwrap();
        let body = output.leaf_impl_body.to_string();
        assert!(body.contains("as_ref (& self . 0)"));
        assert!(body.contains("0 : :: core :: convert :: From :: from (masked)"));
    }

    #[test]
    fn named_newtype_reads_its_field() {
        let output = derive(quote! { struct Email { address: String } }).unwrap();
        assert!(output
            .leaf_impl_body
            .to_string()
            .contains("as_ref (& self . address)"));
        assert!(output.mask_body.to_string().contains("resolve_leaf"));
    }

    #[test]
    fn more_than_one_field_is_rejected() {
        let message = error(quote! { struct Pair(String, String); });
        assert!(message.contains("exactly one field"));
        let message = error(quote! { struct Marker; });
        assert!(message.contains("exactly one field"));
    }

    #[test]
    fn scalar_field_is_rejected() {
        let message = error(quote! { struct Pin(u32); });
        assert!(message.contains("scalar fields are never masked"));
    }

    #[test]
    fn skipped_field_is_rejected() {
        let message = error(quote! { struct Token(#[mask(skip)] String); });
        assert!(message.contains("cannot be skipped"));
    }
}
