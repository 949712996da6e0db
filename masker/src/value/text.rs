//! Type-erased capability leaves.

use std::{any::Any, fmt};

use crate::capability::{MaskedString, StringLeaf};

trait ErasedLeaf: Send + Sync {
    fn text(&self) -> &str;
    fn masked(&self) -> String;
    fn convert(&self, masked: String) -> Result<Box<dyn ErasedLeaf>, String>;
    fn clone_leaf(&self) -> Box<dyn ErasedLeaf>;
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
}

impl<T> ErasedLeaf for T
where
    T: MaskedString + StringLeaf + Clone + Send + Sync + 'static,
{
    fn text(&self) -> &str {
        self.as_text()
    }

    fn masked(&self) -> String {
        self.masked_string()
    }

    fn convert(&self, masked: String) -> Result<Box<dyn ErasedLeaf>, String> {
        T::from_masked(masked).map(|leaf| Box::new(leaf) as Box<dyn ErasedLeaf>)
    }

    fn clone_leaf(&self) -> Box<dyn ErasedLeaf> {
        Box::new(self.clone())
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A capability leaf held behind an interface: the concrete type is erased,
/// its masking behavior is kept.
pub struct Text {
    leaf: Box<dyn ErasedLeaf>,
}

impl Text {
    /// Boxes a capability leaf.
    pub fn new<T>(leaf: T) -> Self
    where
        T: MaskedString + StringLeaf + Clone + Send + Sync + 'static,
    {
        Self {
            leaf: Box::new(leaf),
        }
    }

    /// The unmasked text.
    pub fn as_str(&self) -> &str {
        self.leaf.text()
    }

    /// The masked form, as produced by the leaf's capability.
    pub fn masked_string(&self) -> String {
        self.leaf.masked()
    }

    /// Name of the concrete leaf type.
    pub fn type_name(&self) -> &'static str {
        self.leaf.type_name()
    }

    /// Returns the concrete leaf if it is a `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.leaf.as_any().downcast_ref::<T>()
    }

    /// Converts a masked string back into the same concrete leaf type.
    pub(crate) fn convert(&self, masked: String) -> Result<Self, String> {
        self.leaf.convert(masked).map(|leaf| Self { leaf })
    }
}

impl Clone for Text {
    fn clone(&self) -> Self {
        Self {
            leaf: self.leaf.clone_leaf(),
        }
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name() && self.as_str() == other.as_str()
    }
}

// Debug output goes to logs, so it carries the masked form only.
impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Text")
            .field("type", &self.type_name())
            .field("masked", &self.masked_string())
            .finish()
    }
}
