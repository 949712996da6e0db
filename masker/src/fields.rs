//! String-keyed payloads attached to log records.

use std::collections::{btree_map, BTreeMap};

use crate::{
    engine::{Mask, Masker},
    kind::Kind,
    value::Value,
};

/// A log payload: a map from field name to dynamic [`Value`].
///
/// ```rust
/// use masker::{mask, Fields, Mask, MaskedString, Value};
///
/// #[derive(Clone, Default, Mask)]
/// # #[cfg_attr(feature = "slog", derive(serde::Serialize))]
/// #[mask(leaf)]
/// struct Secret(String);
///
/// impl MaskedString for Secret {
///     fn masked_string(&self) -> String {
///         "******".to_string()
///     }
/// }
///
/// let fields = Fields::new()
///     .with("user", "alice")
///     .with("secret", Value::text(Secret("hunter2".into())));
///
/// let masked = mask(&fields);
/// assert_eq!(masked.get("user"), Some(&Value::from("alice")));
/// assert_eq!(masked.get("secret").and_then(Value::as_str), Some("******"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Fields(BTreeMap<String, Value>);

impl Fields {
    /// An empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field and returns the payload.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// The value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The value stored under `key`, or `default` when it is missing.
    pub fn input(&self, key: &str, default: impl Into<Value>) -> Value {
        match self.0.get(key) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Removes the value stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fields in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl Mask for Fields {
    fn kind(&self) -> Kind {
        Kind::Mapping
    }

    fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    fn mask_with(&self, masker: &mut Masker) -> Self {
        Self(self.0.mask_with(masker))
    }
}

impl From<BTreeMap<String, Value>> for Fields {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self(entries)
    }
}

impl From<Fields> for Value {
    fn from(fields: Fields) -> Self {
        Value::Map(fields.0)
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Fields;
    use crate::{value::Value, Kind, Mask};

    #[test]
    fn input_falls_back_to_the_default() {
        let fields = Fields::new().with("page", 2_u32);
        assert_eq!(fields.input("page", 1_u32), Value::Uint(2));
        assert_eq!(fields.input("size", 20_u32), Value::Uint(20));
    }

    #[test]
    fn insert_replaces_and_returns_the_previous_value() {
        let mut fields = Fields::new();
        assert_eq!(fields.insert("a", "x"), None);
        assert_eq!(fields.insert("a", "y"), Some(Value::from("x")));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn payload_is_a_mapping() {
        let fields: Fields = [("a", 1_i32), ("b", 2_i32)].into_iter().collect();
        assert_eq!(fields.kind(), Kind::Mapping);
        assert!(!fields.is_zero());
        assert!(Fields::new().is_zero());
        let keys: Vec<_> = fields.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
    }
}
