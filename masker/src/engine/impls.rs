//! `Mask` for standard library types.
//!
//! ## Leaves
//!
//! Numbers, booleans, chars and `()` are `Kind::Other` and always pass through.
//! `String` and `Cow<str>` are string leaves without the capability, so they
//! pass through as well; wrap them in a newtype to opt in.
//!
//! ## Pointers
//!
//! `Option` plays the nullable pointer: `None` is zero and is never looked
//! into. `Box`, `Rc` and `Arc` are never zero and are always re-allocated, so
//! the clone never shares a pointee with the input. All of them report the kind
//! of the value they point at.
//!
//! ## Sequences and mappings
//!
//! Sequences keep their length and order. Maps keep their key set; keys are
//! cloned verbatim and only values are resolved. Sets are walked like
//! sequences, so two members that mask to the same text collapse into one.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    hash::{BuildHasher, Hash},
    marker::PhantomData,
    rc::Rc,
    sync::Arc,
};

use super::{
    masker::Masker,
    traits::{Mask, MaskBoxed},
};
use crate::kind::Kind;

macro_rules! impl_mask_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Mask for $ty {
                fn kind(&self) -> Kind {
                    Kind::Other
                }

                fn is_zero(&self) -> bool {
                    *self == <$ty>::default()
                }

                fn mask_with(&self, _masker: &mut Masker) -> Self {
                    *self
                }
            }
        )*
    };
}

impl_mask_scalar!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);

macro_rules! impl_mask_float {
    ($($ty:ty),*) => {
        $(
            impl Mask for $ty {
                fn kind(&self) -> Kind {
                    Kind::Other
                }

                // Bit pattern, so `-0.0` is not zero.
                fn is_zero(&self) -> bool {
                    self.to_bits() == 0
                }

                fn mask_with(&self, _masker: &mut Masker) -> Self {
                    *self
                }
            }
        )*
    };
}

impl_mask_float!(f32, f64);

impl Mask for () {
    fn kind(&self) -> Kind {
        Kind::Other
    }

    fn is_zero(&self) -> bool {
        true
    }

    fn mask_with(&self, _masker: &mut Masker) -> Self {}
}

impl<T: ?Sized> Mask for PhantomData<T> {
    fn kind(&self) -> Kind {
        Kind::Other
    }

    fn is_zero(&self) -> bool {
        true
    }

    fn mask_with(&self, _masker: &mut Masker) -> Self {
        PhantomData
    }
}

impl Mask for String {
    fn kind(&self) -> Kind {
        Kind::String
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn mask_with(&self, _masker: &mut Masker) -> Self {
        self.clone()
    }
}

impl Mask for Cow<'_, str> {
    fn kind(&self) -> Kind {
        Kind::String
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn mask_with(&self, _masker: &mut Masker) -> Self {
        self.clone()
    }
}

// =============================================================================
// Pointers
// =============================================================================

impl<T> Mask for Option<T>
where
    T: Mask,
{
    fn kind(&self) -> Kind {
        self.as_ref().map_or(Kind::Other, Mask::kind)
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn mask_with(&self, masker: &mut Masker) -> Self {
        self.as_ref().map(|value| masker.resolve(value))
    }
}

impl<T> Mask for Box<T>
where
    T: ?Sized + MaskBoxed,
    Box<T>: Clone,
{
    fn kind(&self) -> Kind {
        (**self).boxed_kind()
    }

    fn is_zero(&self) -> bool {
        false
    }

    fn mask_with(&self, masker: &mut Masker) -> Self {
        (**self).mask_boxed(masker)
    }
}

impl<T> Mask for Rc<T>
where
    T: Mask,
{
    fn kind(&self) -> Kind {
        (**self).kind()
    }

    fn is_zero(&self) -> bool {
        false
    }

    fn mask_with(&self, masker: &mut Masker) -> Self {
        Rc::new(masker.resolve(&**self))
    }
}

impl<T> Mask for Arc<T>
where
    T: Mask,
{
    fn kind(&self) -> Kind {
        (**self).kind()
    }

    fn is_zero(&self) -> bool {
        false
    }

    fn mask_with(&self, masker: &mut Masker) -> Self {
        Arc::new(masker.resolve(&**self))
    }
}

impl<T, E> Mask for Result<T, E>
where
    T: Mask,
    E: Mask,
{
    fn kind(&self) -> Kind {
        Kind::Struct
    }

    fn is_zero(&self) -> bool {
        false
    }

    fn mask_with(&self, masker: &mut Masker) -> Self {
        match self {
            Ok(value) => Ok(masker.resolve(value)),
            Err(err) => Err(masker.resolve(err)),
        }
    }
}

// =============================================================================
// Sequences
// =============================================================================

impl<T> Mask for Vec<T>
where
    T: Mask,
{
    fn kind(&self) -> Kind {
        Kind::Sequence
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn mask_with(&self, masker: &mut Masker) -> Self {
        let mut clone = Vec::with_capacity(self.len());
        for element in self {
            clone.push(masker.resolve(element));
        }
        clone
    }
}

impl<T> Mask for VecDeque<T>
where
    T: Mask,
{
    fn kind(&self) -> Kind {
        Kind::Sequence
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn mask_with(&self, masker: &mut Masker) -> Self {
        self.iter().map(|element| masker.resolve(element)).collect()
    }
}

// Boxed slices go through the `Box` impl above.
impl<T> MaskBoxed for [T]
where
    T: Mask,
{
    fn boxed_kind(&self) -> Kind {
        Kind::Sequence
    }

    fn mask_boxed(&self, masker: &mut Masker) -> Box<Self> {
        self.iter().map(|element| masker.resolve(element)).collect()
    }
}

impl<T, const N: usize> Mask for [T; N]
where
    T: Mask,
{
    fn kind(&self) -> Kind {
        Kind::Sequence
    }

    // An array is zero when every element is.
    fn is_zero(&self) -> bool {
        self.iter().all(Mask::is_zero)
    }

    fn mask_with(&self, masker: &mut Masker) -> Self {
        std::array::from_fn(|index| masker.resolve(&self[index]))
    }
}

// Sets may shrink: distinct members can mask to equal values.
impl<T, S> Mask for HashSet<T, S>
where
    T: Mask + Hash + Eq,
    S: BuildHasher + Clone,
{
    fn kind(&self) -> Kind {
        Kind::Sequence
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn mask_with(&self, masker: &mut Masker) -> Self {
        let mut clone = HashSet::with_capacity_and_hasher(self.len(), self.hasher().clone());
        clone.extend(self.iter().map(|element| masker.resolve(element)));
        clone
    }
}

impl<T> Mask for BTreeSet<T>
where
    T: Mask + Ord,
{
    fn kind(&self) -> Kind {
        Kind::Sequence
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn mask_with(&self, masker: &mut Masker) -> Self {
        self.iter().map(|element| masker.resolve(element)).collect()
    }
}

// =============================================================================
// Mappings
// =============================================================================

impl<K, V, S> Mask for HashMap<K, V, S>
where
    K: Clone + Hash + Eq,
    V: Mask,
    S: BuildHasher + Clone,
{
    fn kind(&self) -> Kind {
        Kind::Mapping
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn mask_with(&self, masker: &mut Masker) -> Self {
        let mut clone = HashMap::with_capacity_and_hasher(self.len(), self.hasher().clone());
        for (key, value) in self {
            clone.insert(key.clone(), masker.resolve(value));
        }
        clone
    }
}

impl<K, V> Mask for BTreeMap<K, V>
where
    K: Clone + Ord,
    V: Mask,
{
    fn kind(&self) -> Kind {
        Kind::Mapping
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn mask_with(&self, masker: &mut Masker) -> Self {
        self.iter()
            .map(|(key, value)| (key.clone(), masker.resolve(value)))
            .collect()
    }
}

// =============================================================================
// Tuples
// =============================================================================

macro_rules! impl_mask_tuple {
    ($($name:ident : $index:tt),+) => {
        impl<$($name),+> Mask for ($($name,)+)
        where
            $($name: Mask),+
        {
            fn kind(&self) -> Kind {
                Kind::Struct
            }

            fn is_zero(&self) -> bool {
                true $(&& self.$index.is_zero())+
            }

            fn mask_with(&self, masker: &mut Masker) -> Self {
                ($(masker.resolve(&self.$index),)+)
            }
        }
    };
}

impl_mask_tuple!(A: 0);
impl_mask_tuple!(A: 0, B: 1);
impl_mask_tuple!(A: 0, B: 1, C: 2);
impl_mask_tuple!(A: 0, B: 1, C: 2, D: 3);
