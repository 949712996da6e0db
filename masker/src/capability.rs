//! The opt-in contract that makes a leaf type maskable.
//!
//! Two traits cooperate here:
//!
//! - [`MaskedString`]: the capability itself. A type that implements it can
//!   produce a safe-to-log view of its value.
//! - [`StringLeaf`]: the string-kind glue. It exposes the raw text (for the
//!   zero check) and converts a masked string back into the leaf's own type.
//!
//! The engine only consults the capability at string-kind leaves. A numeric or
//! boolean type that happens to implement [`MaskedString`] is left alone.
//!
//! ## Newtypes
//!
//! The usual way to opt in is a newtype over `String`:
//!
//! ```rust
//! use masker::{Mask, MaskedString};
//!
//! #[derive(Clone, Default, Mask)]
//! # #[cfg_attr(feature = "slog", derive(serde::Serialize))]
//! #[mask(leaf)]
//! struct Phone(String);
//!
//! impl MaskedString for Phone {
//!     fn masked_string(&self) -> String {
//!         let digits: String = self.0.chars().rev().take(4).collect();
//!         format!("***{}", digits.chars().rev().collect::<String>())
//!     }
//! }
//!
//! let masked = masker::mask(&Phone("13800001234".into()));
//! assert_eq!(masked.0, "***1234");
//! ```
//!
//! `#[mask(leaf)]` generates [`StringLeaf`] and [`Mask`](crate::Mask) for the
//! newtype. Types that need to validate their contents implement both by hand
//! and return `Err` from [`StringLeaf::from_masked`] when the masked form is not
//! a valid value.

/// Produces a masked, safe-to-log string view of a value.
///
/// Implementations must be pure: no side effects, no blocking, no mutation of
/// the receiver. The output should never reveal more than the input.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `MaskedString`",
    label = "a `#[mask(leaf)]` type must say how it is masked",
    note = "implement `masker::MaskedString` for `{Self}`",
    note = "if `{Self}` holds no sensitive text, drop `#[mask(leaf)]` and keep it a plain string"
)]
pub trait MaskedString {
    /// Returns the masked form of `self`.
    fn masked_string(&self) -> String;
}

/// A string-kind leaf: a value whose content is text.
///
/// `from_masked` is not required to preserve the original representation; it
/// only needs to build a value that holds the masked string. Returning `Err`
/// hands the masked string back and tells the engine the conversion is not
/// possible.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a string leaf",
    label = "only string-kind values can carry a masked form",
    note = "`#[mask(leaf)]` expects a newtype over a string type such as `String`"
)]
pub trait StringLeaf: Sized {
    /// Returns the unmasked text.
    fn as_text(&self) -> &str;

    /// Converts a masked string into a value of this type.
    fn from_masked(masked: String) -> Result<Self, String>;
}
