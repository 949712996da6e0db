//! Errors surfaced by [`mask_with_options`](crate::mask_with_options).
//!
//! The infallible [`mask`](crate::mask) entrypoint never produces these; it
//! degrades instead (see [`MaskReport`](crate::MaskReport)).

use thiserror::Error;

/// Reasons a bounded masking pass refused to hand back a value.
///
/// No partial output accompanies an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaskError {
    /// The value nests deeper than [`MaskOptions::max_depth`](crate::MaskOptions::max_depth).
    #[error("value nesting exceeds the configured depth limit of {limit}")]
    DepthExceeded {
        /// The limit that was configured for the pass.
        limit: usize,
    },
    /// Strict mode: some members were replaced by their zero value because the
    /// masked form did not fit the declared type.
    #[error("{count} member(s) were dropped because their masked form did not fit the declared type")]
    Dropped {
        /// Number of leaves or fields that were zeroed.
        count: usize,
    },
}
