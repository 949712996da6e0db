//! Shape buckets used to route a value through the engine.
//!
//! Every [`Mask`](crate::Mask) value reports exactly one [`Kind`] for the
//! concrete value behind any pointer or interface wrapper. Aggregates are walked;
//! leaves terminate the recursion.

/// Shape of a concrete value, after pointer and interface indirection is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Kind {
    /// A record of named or positional fields (structs, enums, tuples).
    Struct,
    /// A run of elements (vectors, arrays, slices, sets).
    ///
    /// Ordered sequences keep their length. Sets are the exception: members
    /// that mask to the same value collapse, so a masked set may be shorter.
    Sequence,
    /// Key/value entries. Keys are never masked.
    Mapping,
    /// A character-string leaf. The only kind the capability is applied to.
    String,
    /// Any other leaf: numbers, booleans, chars, unit.
    Other,
}

impl Kind {
    /// Returns `true` for kinds that are walked member by member.
    #[must_use]
    pub const fn is_aggregate(self) -> bool {
        matches!(self, Self::Struct | Self::Sequence | Self::Mapping)
    }

    /// Returns `true` for kinds that terminate the recursion.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        !self.is_aggregate()
    }
}
