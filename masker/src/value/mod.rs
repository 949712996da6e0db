//! A dynamic value model for data whose shape is only known at runtime.
//!
//! [`Value`] plays the role of an interface slot: it can hold a scalar, a
//! string, a type-erased capability leaf ([`Text`]), a sequence, a string-keyed
//! map, a named [`Record`] or a pointer to another value. It implements
//! [`Mask`] like any other type, with one difference from the static path: a
//! leaf whose masked string does not convert back to its own type is widened
//! to a plain [`Value::String`] instead of being zeroed.

mod record;
mod text;

use std::collections::BTreeMap;

pub use self::{
    record::{Declared, Field, Record},
    text::Text,
};
use crate::{
    capability::{MaskedString, StringLeaf},
    engine::{Mask, Masker},
    kind::Kind,
};

/// A dynamically typed value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// The nil interface.
    #[default]
    Nil,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// A floating point number.
    Float(f64),
    /// A plain string without masking behavior.
    String(String),
    /// A capability leaf.
    Text(Text),
    /// An ordered sequence.
    Seq(Vec<Value>),
    /// A string-keyed map.
    Map(BTreeMap<String, Value>),
    /// A named record.
    Record(Record),
    /// A non-nil pointer.
    Ptr(Box<Value>),
}

impl Value {
    /// Wraps a capability leaf.
    pub fn text<T>(leaf: T) -> Self
    where
        T: MaskedString + StringLeaf + Clone + Send + Sync + 'static,
    {
        Self::Text(Text::new(leaf))
    }

    /// Points at `target`.
    pub fn ptr(target: Value) -> Self {
        Self::Ptr(Box::new(target))
    }

    /// The text of a string or capability leaf, looking through pointers.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            Self::Text(text) => Some(text.as_str()),
            Self::Ptr(target) => target.as_str(),
            _ => None,
        }
    }

    /// Looks up `key` in a map or a record, looking through pointers.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Map(entries) => entries.get(key),
            Self::Record(record) => record.get(key),
            Self::Ptr(target) => target.get(key),
            _ => None,
        }
    }

    /// Whether this is the nil interface.
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    fn mask_text(text: &Text, masker: &mut Masker) -> Self {
        let masked = text.masked_string();
        masker.note_masked();
        match text.convert(masked) {
            Ok(converted) => Self::Text(converted),
            Err(widened) => Self::String(widened),
        }
    }
}

impl Mask for Value {
    fn kind(&self) -> Kind {
        match self {
            Self::Nil | Self::Bool(_) | Self::Int(_) | Self::Uint(_) | Self::Float(_) => {
                Kind::Other
            }
            Self::String(_) | Self::Text(_) => Kind::String,
            Self::Seq(_) => Kind::Sequence,
            Self::Map(_) => Kind::Mapping,
            Self::Record(_) => Kind::Struct,
            Self::Ptr(target) => target.kind(),
        }
    }

    fn is_zero(&self) -> bool {
        match self {
            Self::Nil => true,
            Self::Bool(flag) => !flag,
            Self::Int(number) => *number == 0,
            Self::Uint(number) => *number == 0,
            Self::Float(number) => number.to_bits() == 0,
            Self::String(text) => text.is_empty(),
            Self::Text(text) => text.as_str().is_empty(),
            Self::Seq(values) => values.is_empty(),
            Self::Map(entries) => entries.is_empty(),
            Self::Record(record) => record.is_zero(),
            Self::Ptr(_) => false,
        }
    }

    fn mask_with(&self, masker: &mut Masker) -> Self {
        match self {
            Self::Text(text) => Self::mask_text(text, masker),
            Self::Seq(values) => Self::Seq(values.iter().map(|v| masker.resolve(v)).collect()),
            Self::Map(entries) => Self::Map(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), masker.resolve(value)))
                    .collect(),
            ),
            Self::Record(record) => Self::Record(record.mask_with(masker)),
            Self::Ptr(target) => Self::ptr(masker.resolve(target.as_ref())),
            other => other.clone(),
        }
    }
}

macro_rules! impl_from_number {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

impl_from_number!(Int as i64: i8, i16, i32, i64);
impl_from_number!(Uint as u64: u8, u16, u32, u64);
impl_from_number!(Float as f64: f32, f64);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Text> for Value {
    fn from(value: Text) -> Self {
        Self::Text(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(values: Vec<T>) -> Self {
        Self::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl<T> From<BTreeMap<String, T>> for Value
where
    T: Into<Value>,
{
    fn from(entries: BTreeMap<String, T>) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key, value.into()))
                .collect(),
        )
    }
}

/// `None` is nil, `Some` is a pointer to the value.
impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::ptr(value.into()),
            None => Self::Nil,
        }
    }
}

#[cfg(feature = "serde")]
mod serialize {
    use serde::ser::{Serialize, SerializeMap, Serializer};

    use super::{Record, Text, Value};

    impl Serialize for Value {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Value::Nil => serializer.serialize_none(),
                Value::Bool(flag) => serializer.serialize_bool(*flag),
                Value::Int(number) => serializer.serialize_i64(*number),
                Value::Uint(number) => serializer.serialize_u64(*number),
                Value::Float(number) => serializer.serialize_f64(*number),
                Value::String(text) => serializer.serialize_str(text),
                Value::Text(text) => text.serialize(serializer),
                Value::Seq(values) => serializer.collect_seq(values),
                Value::Map(entries) => serializer.collect_map(entries),
                Value::Record(record) => record.serialize(serializer),
                Value::Ptr(target) => target.serialize(serializer),
            }
        }
    }

    /// Serializes the text as held; mask first to serialize the masked form.
    impl Serialize for Text {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.as_str())
        }
    }

    impl Serialize for Record {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for field in self.fields() {
                map.serialize_entry(field.name(), field.value())?;
            }
            map.end()
        }
    }
}
