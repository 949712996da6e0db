//! Traits implemented by every value the engine can walk.

use super::masker::Masker;
use crate::kind::Kind;

/// A value that can be deep-copied with its capability-bearing leaves masked.
///
/// Implemented by `#[derive(Mask)]` for structs and enums, by this crate for
/// std containers, pointers and scalars, and by hand for custom leaves.
///
/// Implementations of [`mask_with`](Mask::mask_with) build a fresh value and
/// route every member through [`Masker::resolve`]; they never mutate `self`.
/// They are only called for non-zero values of aggregate or string kind, so
/// they do not need to repeat those checks.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Mask`",
    label = "this type cannot be walked by the masking engine",
    note = "use `#[derive(Mask)]` on the type definition",
    note = "or mark the field `#[mask(skip)]` to copy it verbatim"
)]
pub trait Mask: Clone {
    /// Shape of the concrete value behind any pointer or interface wrapper.
    fn kind(&self) -> Kind;

    /// Whether `self` is its type's zero value. Zero values are never rewritten.
    fn is_zero(&self) -> bool;

    /// Builds the masked clone of `self`.
    #[must_use]
    fn mask_with(&self, masker: &mut Masker) -> Self;
}

/// Masking for unsized values held behind a `Box`, typically trait objects.
///
/// Every sized [`Mask`] type gets this for free. For an interface-style field
/// such as `Option<Box<dyn Payload>>`, implement it for `dyn Payload` and
/// provide `Clone` for `Box<dyn Payload>`:
///
/// ```rust
/// use masker::{Kind, Mask, MaskBoxed, Masker};
///
/// trait Payload {
///     fn mask_payload(&self, masker: &mut Masker) -> Box<dyn Payload>;
///     fn clone_payload(&self) -> Box<dyn Payload>;
/// }
///
/// impl Clone for Box<dyn Payload> {
///     fn clone(&self) -> Self {
///         self.clone_payload()
///     }
/// }
///
/// impl MaskBoxed for dyn Payload {
///     fn boxed_kind(&self) -> Kind {
///         Kind::Struct
///     }
///
///     fn mask_boxed(&self, masker: &mut Masker) -> Box<Self> {
///         self.mask_payload(masker)
///     }
/// }
/// ```
pub trait MaskBoxed {
    /// Shape of the boxed value.
    fn boxed_kind(&self) -> Kind;

    /// Builds a freshly boxed masked clone.
    fn mask_boxed(&self, masker: &mut Masker) -> Box<Self>;
}

impl<T> MaskBoxed for T
where
    T: Mask,
{
    fn boxed_kind(&self) -> Kind {
        self.kind()
    }

    fn mask_boxed(&self, masker: &mut Masker) -> Box<Self> {
        Box::new(masker.resolve(self))
    }
}
