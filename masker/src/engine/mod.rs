//! The masking engine: traversal, dispatch and entrypoints.
//!
//! - **`traits`**: what can be masked (`Mask`, `MaskBoxed`)
//! - **`impls`**: sequence/mapping copiers and pointer unwrapping for std types
//! - **`masker`**: the leaf resolver and the public entrypoints
//!
//! Struct copiers are generated by `#[derive(Mask)]`.

mod impls;
mod masker;
mod traits;

pub use masker::{
    mask, mask_with_options, MaskOptions, MaskOutcome, MaskReport, Maskable, Masker,
    DEFAULT_MAX_DEPTH,
};
pub use traits::{Mask, MaskBoxed};
