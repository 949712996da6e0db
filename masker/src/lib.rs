//! Deep, type-directed masking of structured values.
//!
//! [`mask`] takes any value whose type implements [`Mask`] and returns a deep
//! copy in which every non-empty string leaf whose type implements
//! [`MaskedString`] has been replaced by its masked form. Everything else is
//! copied as is. The input is never mutated and the copy shares no storage
//! with it, so the result can be handed to a logger while the original keeps
//! being used.
//!
//! Key rules:
//! - Types opt in with `#[derive(Mask)]`, which walks every field.
//!   `#[mask(skip)]` copies a field verbatim.
//! - A string newtype becomes a maskable leaf with `#[mask(leaf)]` plus a
//!   [`MaskedString`] impl. Plain `String`s are never touched.
//! - Zero values (empty strings, `None`, empty collections) come back unchanged.
//! - Map keys are never masked.
//!
//! ```rust
//! use masker::{mask, Mask, MaskedString};
//!
//! #[derive(Clone, Debug, Default, PartialEq, Mask)]
//! # #[cfg_attr(feature = "slog", derive(serde::Serialize))]
//! #[mask(leaf)]
//! struct Phone(String);
//!
//! impl MaskedString for Phone {
//!     fn masked_string(&self) -> String {
//!         let head: String = self.0.chars().take(3).collect();
//!         let tail: String = self.0.chars().skip(7).collect();
//!         format!("{head}****{tail}")
//!     }
//! }
//!
//! #[derive(Clone, Debug, PartialEq, Mask)]
//! # #[cfg_attr(feature = "slog", derive(serde::Serialize))]
//! struct User {
//!     name: String,
//!     phone: Phone,
//! }
//!
//! let user = User { name: "Alice".into(), phone: Phone("13800001234".into()) };
//! let masked = mask(&user);
//!
//! assert_eq!(masked.name, "Alice");
//! assert_eq!(masked.phone.0, "138****1234");
//! assert_eq!(user.phone.0, "13800001234");
//! ```
//!
//! With the default `policy` feature, ready-made leaves such as `Phone` and
//! `Email` cover common personal data.
//!
//! Data whose shape is only known at runtime goes through [`Value`] and
//! [`Fields`], which implement [`Mask`] as well.
//!
//! What this crate does not do:
//! - perform I/O or logging (the `slog` feature adapts masked values for a
//!   logger the host configures)
//! - decide which data is sensitive

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
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else,
    clippy::return_self_not_must_use
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

// The derive and the trait share a name; one import brings in both.
pub use masker_derive::Mask;

// Lets generated code name `::masker` from inside this crate too.
#[allow(unused_extern_crates)]
extern crate self as masker;

// Module declarations
mod capability;
mod engine;
mod error;
mod fields;
mod kind;
#[cfg(feature = "policy")]
mod leaves;
#[cfg(feature = "policy")]
mod policy;
#[cfg(feature = "slog")]
pub mod slog;
mod value;

// Re-exports
pub use capability::{MaskedString, StringLeaf};
pub use engine::{
    mask, mask_with_options, Mask, MaskBoxed, MaskOptions, MaskOutcome, MaskReport, Maskable,
    Masker, DEFAULT_MAX_DEPTH,
};
pub use error::MaskError;
pub use fields::Fields;
pub use kind::Kind;
#[cfg(feature = "policy")]
pub use leaves::{Address, BankCard, Email, IdCard, Name, Password, Phone, Token};
#[cfg(feature = "policy")]
pub use policy::{MaskPolicy, DEFAULT_FILL, MASK_PLACEHOLDER};
pub use value::{Declared, Field, Record, Text, Value};
