//! String masking policies.
//!
//! Policies are pure string transformations over Unicode scalar values. They do
//! not traverse structures and do not decide what is sensitive; capability
//! implementations pick one and apply it to their own text.

use std::borrow::Cow;

/// Placeholder used by [`MaskPolicy::full`].
pub const MASK_PLACEHOLDER: &str = "******";

/// Character used to fill masked positions unless overridden.
pub const DEFAULT_FILL: char = '*';

/// How a piece of text is turned into its masked form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaskPolicy {
    /// Replace the whole value with a fixed placeholder, hiding its length.
    Full {
        /// The replacement text.
        placeholder: Cow<'static, str>,
    },
    /// Keep `head` leading and `tail` trailing characters, fill the middle.
    ///
    /// When `head + tail` covers the whole value nothing is hidden.
    Keep {
        /// Leading characters left visible.
        head: usize,
        /// Trailing characters left visible.
        tail: usize,
        /// Fill character.
        fill: char,
    },
    /// Fill `head` leading and `tail` trailing characters, keep the middle.
    ///
    /// When `head + tail` covers the whole value everything is filled.
    Cover {
        /// Leading characters filled.
        head: usize,
        /// Trailing characters filled.
        tail: usize,
        /// Fill character.
        fill: char,
    },
}

impl MaskPolicy {
    /// Replaces the value with [`MASK_PLACEHOLDER`].
    #[must_use]
    pub fn full() -> Self {
        Self::Full {
            placeholder: Cow::Borrowed(MASK_PLACEHOLDER),
        }
    }

    /// Replaces the value with a custom placeholder.
    #[must_use]
    pub fn full_with<P>(placeholder: P) -> Self
    where
        P: Into<Cow<'static, str>>,
    {
        Self::Full {
            placeholder: placeholder.into(),
        }
    }

    /// Keeps `head` leading and `tail` trailing characters visible.
    #[must_use]
    pub fn keep(head: usize, tail: usize) -> Self {
        Self::Keep {
            head,
            tail,
            fill: DEFAULT_FILL,
        }
    }

    /// Keeps only the first `head` characters visible.
    #[must_use]
    pub fn keep_head(head: usize) -> Self {
        Self::keep(head, 0)
    }

    /// Keeps only the last `tail` characters visible.
    #[must_use]
    pub fn keep_tail(tail: usize) -> Self {
        Self::keep(0, tail)
    }

    /// Fills `head` leading and `tail` trailing characters.
    #[must_use]
    pub fn cover(head: usize, tail: usize) -> Self {
        Self::Cover {
            head,
            tail,
            fill: DEFAULT_FILL,
        }
    }

    /// Fills only the first `head` characters.
    #[must_use]
    pub fn cover_head(head: usize) -> Self {
        Self::cover(head, 0)
    }

    /// Fills only the last `tail` characters.
    #[must_use]
    pub fn cover_tail(tail: usize) -> Self {
        Self::cover(0, tail)
    }

    /// Uses `fill` for masked positions. No effect on [`MaskPolicy::Full`].
    #[must_use]
    pub fn with_fill(mut self, fill: char) -> Self {
        match &mut self {
            Self::Full { .. } => {}
            Self::Keep { fill: current, .. } | Self::Cover { fill: current, .. } => {
                *current = fill;
            }
        }
        self
    }

    /// Applies the policy to `value`.
    ///
    /// Total: never fails. Empty input stays empty for `Keep` and `Cover`.
    #[must_use]
    pub fn apply(&self, value: &str) -> String {
        match self {
            Self::Full { placeholder } => placeholder.clone().into_owned(),
            Self::Keep { head, tail, fill } => {
                let total = value.chars().count();
                if head.saturating_add(*tail) >= total {
                    return value.to_string();
                }
                let visible_until = *head;
                let visible_from = total - tail;
                value
                    .chars()
                    .enumerate()
                    .map(|(index, ch)| {
                        if index < visible_until || index >= visible_from {
                            ch
                        } else {
                            *fill
                        }
                    })
                    .collect()
            }
            Self::Cover { head, tail, fill } => {
                let total = value.chars().count();
                if head.saturating_add(*tail) >= total {
                    return std::iter::repeat(*fill).take(total).collect();
                }
                let hidden_until = *head;
                let hidden_from = total - tail;
                value
                    .chars()
                    .enumerate()
                    .map(|(index, ch)| {
                        if index < hidden_until || index >= hidden_from {
                            *fill
                        } else {
                            ch
                        }
                    })
                    .collect()
            }
        }
    }
}

impl Default for MaskPolicy {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::{MaskPolicy, MASK_PLACEHOLDER};

    #[test]
    fn keep_hides_the_middle_of_a_phone_number() {
        let policy = MaskPolicy::keep(3, 4);
        assert_eq!(policy.apply("13800001234"), "138****1234");
    }

    #[test]
    fn keep_leaves_short_values_visible() {
        let policy = MaskPolicy::keep(3, 4);
        assert_eq!(policy.apply("123456"), "123456");
        assert_eq!(policy.apply("1234567"), "1234567");
        assert_eq!(policy.apply("12345678"), "123*5678");
    }

    #[test]
    fn keep_head_and_tail_shortcuts() {
        assert_eq!(MaskPolicy::keep_head(2).apply("abcdef"), "ab****");
        assert_eq!(MaskPolicy::keep_tail(2).apply("abcdef"), "****ef");
    }

    #[test]
    fn cover_fills_the_edges() {
        assert_eq!(MaskPolicy::cover_head(2).apply("abcdef"), "**cdef");
        assert_eq!(MaskPolicy::cover_tail(3).apply("abcdef"), "abc***");
        assert_eq!(MaskPolicy::cover(2, 2).apply("abcdef"), "**cd**");
    }

    #[test]
    fn cover_overlap_fills_everything() {
        assert_eq!(MaskPolicy::cover(2, 2).apply("abc"), "***");
        assert_eq!(MaskPolicy::cover(2, 2).apply("abcd"), "****");
    }

    #[test]
    fn full_hides_content_and_length() {
        assert_eq!(MaskPolicy::full().apply("a"), MASK_PLACEHOLDER);
        assert_eq!(MaskPolicy::full().apply("a much longer secret"), MASK_PLACEHOLDER);
        assert_eq!(MaskPolicy::full_with("<hidden>").apply("x"), "<hidden>");
        assert_eq!(MaskPolicy::default(), MaskPolicy::full());
    }

    #[test]
    fn fill_character_is_configurable() {
        let policy = MaskPolicy::keep(1, 1).with_fill('#');
        assert_eq!(policy.apply("abcd"), "a##d");

        let policy = MaskPolicy::full().with_fill('#');
        assert_eq!(policy.apply("abcd"), MASK_PLACEHOLDER);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(MaskPolicy::keep(3, 4).apply(""), "");
        assert_eq!(MaskPolicy::cover_head(2).apply(""), "");
        assert_eq!(MaskPolicy::full().apply(""), MASK_PLACEHOLDER);
    }

    #[test]
    fn huge_spans_do_not_overflow() {
        let policy = MaskPolicy::keep(usize::MAX, usize::MAX);
        assert_eq!(policy.apply("abc"), "abc");
        let policy = MaskPolicy::cover(usize::MAX, 1);
        assert_eq!(policy.apply("abc"), "***");
    }
}
