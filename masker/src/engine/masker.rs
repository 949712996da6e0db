//! The leaf resolver and the public entrypoints.
//!
//! [`Masker`] carries the per-call state of one pass: the options, the current
//! depth and the [`MaskReport`]. It lives on the caller's stack and is dropped
//! when the pass ends, so concurrent calls share nothing.

use super::traits::Mask;
use crate::{
    capability::{MaskedString, StringLeaf},
    error::MaskError,
    kind::Kind,
};

/// Depth limit used by [`MaskOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Knobs for a bounded masking pass.
///
/// Hosts that load their settings from a file can deserialize this directly
/// (with the `serde` feature); missing keys fall back to the defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MaskOptions {
    max_depth: Option<usize>,
    strict: bool,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            strict: false,
        }
    }
}

impl MaskOptions {
    /// Options with the default depth limit and lenient drop handling.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the pass once a value nests deeper than `limit` levels.
    ///
    /// Every aggregate, string leaf and pointer counts as one level.
    #[must_use]
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// Removes the depth limit.
    #[must_use]
    pub fn unbounded(mut self) -> Self {
        self.max_depth = None;
        self
    }

    /// When `true`, a pass that had to zero any member fails with
    /// [`MaskError::Dropped`] instead of returning the degraded clone.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// The configured depth limit, if any.
    pub fn depth_limit(&self) -> Option<usize> {
        self.max_depth
    }

    /// Whether dropped members fail the pass.
    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

/// What a pass did, for callers that want to observe degradation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MaskReport {
    /// Leaves replaced by their masked form.
    pub masked: usize,
    /// Leaves or fields set to their zero value because the masked or resolved
    /// value did not fit the declared type.
    pub dropped: usize,
    /// Deepest nesting level visited.
    pub deepest: usize,
}

/// A masked clone together with the report of the pass that produced it.
#[derive(Clone, Debug)]
pub struct MaskOutcome<T> {
    /// The masked clone.
    pub value: T,
    /// Diagnostics of the pass.
    pub report: MaskReport,
}

impl<T> MaskOutcome<T> {
    /// Discards the report.
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Per-call traversal state.
///
/// `Mask` implementations receive a `&mut Masker` and hand every member back to
/// [`resolve`](Masker::resolve).
#[derive(Debug)]
pub struct Masker {
    options: MaskOptions,
    depth: usize,
    overflowed: bool,
    report: MaskReport,
}

impl Masker {
    pub(crate) fn new(options: MaskOptions) -> Self {
        Self {
            options,
            depth: 0,
            overflowed: false,
            report: MaskReport::default(),
        }
    }

    /// Resolves one value: the recursion point for every field, element and
    /// map value.
    ///
    /// Zero values and non-string leaves come back as plain clones. Aggregates
    /// and string leaves are rebuilt by their [`Mask::mask_with`].
    pub fn resolve<T: Mask>(&mut self, value: &T) -> T {
        if self.overflowed || value.is_zero() {
            return value.clone();
        }
        if value.kind() == Kind::Other {
            return value.clone();
        }

        self.depth += 1;
        if let Some(limit) = self.options.max_depth {
            if self.depth > limit {
                // The pass is already lost; the clone is never handed out.
                self.overflowed = true;
                self.depth -= 1;
                return value.clone();
            }
        }
        self.report.deepest = self.report.deepest.max(self.depth);

        let masked = value.mask_with(self);
        self.depth -= 1;
        masked
    }

    /// Applies the capability to a string leaf.
    ///
    /// The masked string is converted back with [`StringLeaf::from_masked`].
    /// A typed slot cannot hold a widened string, so when the conversion fails
    /// the leaf's zero value is returned and counted as dropped.
    pub fn resolve_leaf<T>(&mut self, value: &T) -> T
    where
        T: MaskedString + StringLeaf + Default,
    {
        match T::from_masked(value.masked_string()) {
            Ok(masked) => {
                self.note_masked();
                masked
            }
            Err(_) => {
                self.note_dropped();
                T::default()
            }
        }
    }

    /// Records a leaf replaced by its masked form.
    pub fn note_masked(&mut self) {
        self.report.masked += 1;
    }

    /// Records a member that was zeroed instead of copied.
    pub fn note_dropped(&mut self) {
        self.report.dropped += 1;
    }

    /// Diagnostics gathered so far.
    pub fn report(&self) -> &MaskReport {
        &self.report
    }

    fn finish<T>(self, value: T) -> Result<MaskOutcome<T>, MaskError> {
        if self.overflowed {
            return Err(MaskError::DepthExceeded {
                limit: self.options.max_depth.unwrap_or_default(),
            });
        }
        if self.options.strict && self.report.dropped > 0 {
            return Err(MaskError::Dropped {
                count: self.report.dropped,
            });
        }
        Ok(MaskOutcome {
            value,
            report: self.report,
        })
    }
}

/// Returns a masked clone of `value`.
///
/// This is the engine's single operation: one synchronous, depth-first pass
/// that copies `value` and replaces every non-zero string leaf whose type
/// implements [`MaskedString`] by its masked form. `value` is never mutated
/// and the clone shares no storage with it.
///
/// The pass is unbounded. Masking is not idempotent: masking the output again
/// re-applies each leaf's capability to the already masked text.
#[must_use]
pub fn mask<T: Mask>(value: &T) -> T {
    Masker::new(MaskOptions::default().unbounded()).resolve(value)
}

/// Like [`mask`], with a depth limit, optional strictness and a report.
pub fn mask_with_options<T: Mask>(
    value: &T,
    options: MaskOptions,
) -> Result<MaskOutcome<T>, MaskError> {
    let mut masker = Masker::new(options);
    let masked = masker.resolve(value);
    masker.finish(masked)
}

/// Method form of [`mask`], available on every [`Mask`] type.
pub trait Maskable: Mask {
    /// Returns a masked clone of `self`.
    #[must_use]
    fn masked(&self) -> Self {
        mask(self)
    }
}

impl<T> Maskable for T where T: Mask {}
