//! Type utilities for the derive macro.

/// Primitive names that can never hold text.
const SCALARS: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize", "f32",
    "f64", "bool", "char",
];

/// Whether `ty` is spelled as a bare primitive scalar (`u32`, `bool`, ...).
///
/// Aliases, qualified paths and generic parameters are not recognized; they
/// may still name a string type, so `#[mask(leaf)]` lets them through and
/// leaves the type check to the generated `AsRef<str>` call.
pub(crate) fn is_scalar_type(ty: &syn::Type) -> bool {
    let syn::Type::Path(path) = ty else {
        return false;
    };
    if path.qself.is_some() || path.path.leading_colon.is_some() {
        return false;
    }
    let Some(ident) = path.path.get_ident() else {
        return false;
    };
    SCALARS.iter().any(|scalar| ident == scalar)
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    fn parse_type(tokens: proc_macro2::TokenStream) -> syn::Type {
        syn::parse2(tokens).expect("should parse as Type")
    }

    #[test]
    fn bare_primitives_are_scalars() {
        for ty in [quote! { u32 }, quote! { bool }, quote! { char }, quote! { f64 }] {
            assert!(is_scalar_type(&parse_type(ty)));
        }
    }

    #[test]
    fn string_types_are_not_scalars() {
        for ty in [quote! { String }, quote! { Box<str> }, quote! { Cow<'static, str> }] {
            assert!(!is_scalar_type(&parse_type(ty)));
        }
    }

    #[test]
    fn spelled_out_paths_are_not_recognized() {
        assert!(!is_scalar_type(&parse_type(quote! { std::primitive::i32 })));
        assert!(!is_scalar_type(&parse_type(quote! { ::core::primitive::u8 })));
    }
}
