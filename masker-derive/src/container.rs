//! `#[mask(...)]` on the struct or enum itself.

use syn::{meta::ParseNestedMeta, Attribute, Meta, Result};

/// What the container attributes asked for.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// The type is a string newtype that masks itself through `MaskedString`.
    pub(crate) leaf: bool,
}

impl ContainerOptions {
    fn apply(&mut self, meta: &ParseNestedMeta<'_>) -> Result<()> {
        if !meta.path.is_ident("leaf") {
            let name = meta
                .path
                .get_ident()
                .map_or_else(|| "?".to_string(), ToString::to_string);
            return Err(meta.error(format!(
                "unknown container option `{name}`; expected `leaf`"
            )));
        }
        if self.leaf {
            return Err(meta.error("duplicate container option `leaf`"));
        }
        self.leaf = true;
        Ok(())
    }
}

pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("mask")) {
        let Meta::List(list) = &attr.meta else {
            return Err(syn::Error::new_spanned(
                &attr.meta,
                "expected a container option, e.g. #[mask(leaf)]",
            ));
        };
        list.parse_nested_meta(|meta| options.apply(&meta))?;
    }
    Ok(options)
}
