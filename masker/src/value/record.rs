//! Dynamic records: ordered fields with a declared type each.
//!
//! A record is the dynamic counterpart of a struct. Because the value stored in
//! a field may change type during masking (a capability leaf can widen to a
//! plain string), the copier re-checks every resolved value against the
//! field's declared type before storing it:
//!
//! 1. the value converts to the declared type: store the converted value;
//! 2. otherwise, same aggregate or string kind: store it as is;
//! 3. otherwise, the field declares a record and the value points at a record
//!    of that name: store the record itself;
//! 4. otherwise store the declared type's zero value and count a drop.

use std::borrow::Cow;

use super::Value;
use crate::{
    engine::{Mask, Masker},
    kind::Kind,
};

/// The declared type of a record field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Declared {
    /// An interface slot: accepts anything.
    Any,
    /// `bool`.
    Bool,
    /// Signed integer.
    Int,
    /// Unsigned integer.
    Uint,
    /// Floating point number.
    Float,
    /// Plain string. Also accepts capability leaves of any type.
    String,
    /// A capability leaf of the named concrete type.
    Text(Cow<'static, str>),
    /// A sequence of values.
    Seq,
    /// A string-keyed map.
    Map,
    /// A record with the given name.
    Record(Cow<'static, str>),
    /// A nullable pointer to the inner declared type.
    Ptr(Box<Declared>),
}

impl Declared {
    /// Declares a capability leaf slot for the concrete type `T`.
    pub fn text<T: 'static>() -> Self {
        Self::Text(Cow::Borrowed(std::any::type_name::<T>()))
    }

    /// Declares a record slot.
    pub fn record(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Record(name.into())
    }

    /// Declares a nullable pointer slot.
    pub fn ptr(inner: Declared) -> Self {
        Self::Ptr(Box::new(inner))
    }

    /// The kind values of this type have, or `None` for [`Declared::Any`].
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Self::Any => None,
            Self::Bool | Self::Int | Self::Uint | Self::Float => Some(Kind::Other),
            Self::String | Self::Text(_) => Some(Kind::String),
            Self::Seq => Some(Kind::Sequence),
            Self::Map => Some(Kind::Mapping),
            Self::Record(_) => Some(Kind::Struct),
            Self::Ptr(inner) => inner.kind(),
        }
    }

    /// The zero value of this type.
    pub fn zero(&self) -> Value {
        match self {
            Self::Any | Self::Ptr(_) => Value::Nil,
            Self::Bool => Value::Bool(false),
            Self::Int => Value::Int(0),
            Self::Uint => Value::Uint(0),
            Self::Float => Value::Float(0.0),
            Self::String | Self::Text(_) => Value::String(String::new()),
            Self::Seq => Value::Seq(Vec::new()),
            Self::Map => Value::Map(std::collections::BTreeMap::new()),
            Self::Record(name) => Value::Record(Record::new(name.clone())),
        }
    }

    /// Converts `value` to this type, handing it back when that is not possible.
    ///
    /// Numbers convert between each other with `as` semantics. Nil converts to
    /// pointers, sequences and maps.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn convert(&self, value: Value) -> Result<Value, Value> {
        match (self, value) {
            (Self::Any, value) => Ok(value),
            (Self::Ptr(_) | Self::Seq | Self::Map, Value::Nil) => Ok(Value::Nil),
            (Self::Bool, Value::Bool(flag)) => Ok(Value::Bool(flag)),
            (Self::Int, Value::Int(number)) => Ok(Value::Int(number)),
            (Self::Int, Value::Uint(number)) => Ok(Value::Int(number as i64)),
            (Self::Int, Value::Float(number)) => Ok(Value::Int(number as i64)),
            (Self::Uint, Value::Uint(number)) => Ok(Value::Uint(number)),
            (Self::Uint, Value::Int(number)) => Ok(Value::Uint(number as u64)),
            (Self::Uint, Value::Float(number)) => Ok(Value::Uint(number as u64)),
            (Self::Float, Value::Float(number)) => Ok(Value::Float(number)),
            (Self::Float, Value::Int(number)) => Ok(Value::Float(number as f64)),
            (Self::Float, Value::Uint(number)) => Ok(Value::Float(number as f64)),
            (Self::String, Value::String(text)) => Ok(Value::String(text)),
            (Self::String, Value::Text(text)) => Ok(Value::Text(text)),
            (Self::Text(name), Value::Text(text)) if text.type_name() == name.as_ref() => {
                Ok(Value::Text(text))
            }
            (Self::Seq, Value::Seq(values)) => Ok(Value::Seq(values)),
            (Self::Map, Value::Map(entries)) => Ok(Value::Map(entries)),
            (Self::Record(name), Value::Record(record)) if record.name() == name.as_ref() => {
                Ok(Value::Record(record))
            }
            (Self::Ptr(inner), Value::Ptr(target)) => inner
                .convert(*target)
                .map(Value::ptr)
                .map_err(Value::ptr),
            (_, value) => Err(value),
        }
    }

    /// Stores a resolved value into a slot of this type.
    fn assign(&self, resolved: Value, masker: &mut Masker) -> Value {
        let resolved = match self.convert(resolved) {
            Ok(converted) => return converted,
            Err(resolved) => resolved,
        };

        let direct = !matches!(self, Self::Any | Self::Ptr(_))
            && !matches!(resolved, Value::Ptr(_) | Value::Nil)
            && resolved.kind() != Kind::Other
            && self.kind() == Some(resolved.kind());
        if direct {
            return resolved;
        }

        if let (Self::Record(name), Value::Ptr(target)) = (self, &resolved) {
            if let Value::Record(record) = target.as_ref() {
                if record.name() == name.as_ref() {
                    return Value::Record(record.clone());
                }
            }
        }

        masker.note_dropped();
        self.zero()
    }
}

/// One named, typed member of a [`Record`].
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    name: Cow<'static, str>,
    declared: Declared,
    value: Value,
}

impl Field {
    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    pub fn declared(&self) -> &Declared {
        &self.declared
    }

    /// Current value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// A named record with ordered, typed fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    name: Cow<'static, str>,
    fields: Vec<Field>,
}

impl Record {
    /// An empty record.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field and returns the record.
    #[must_use]
    pub fn field(
        mut self,
        name: impl Into<Cow<'static, str>>,
        declared: Declared,
        value: impl Into<Value>,
    ) -> Self {
        self.push(name, declared, value);
        self
    }

    /// Appends a field.
    pub fn push(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        declared: Declared,
        value: impl Into<Value>,
    ) {
        self.fields.push(Field {
            name: name.into(),
            declared,
            value: value.into(),
        });
    }

    /// Record name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Value of the first field called `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Mask for Record {
    fn kind(&self) -> Kind {
        Kind::Struct
    }

    fn is_zero(&self) -> bool {
        self.fields.iter().all(|field| field.value.is_zero())
    }

    fn mask_with(&self, masker: &mut Masker) -> Self {
        let mut clone = Self {
            name: self.name.clone(),
            fields: Vec::with_capacity(self.fields.len()),
        };
        for field in &self.fields {
            // Zero values are stored back as they are, whatever the declaration.
            let value = if field.value.is_zero() {
                field.value.clone()
            } else {
                let resolved = masker.resolve(&field.value);
                field.declared.assign(resolved, masker)
            };
            clone.fields.push(Field {
                name: field.name.clone(),
                declared: field.declared.clone(),
                value,
            });
        }
        clone
    }
}

#[cfg(all(test, feature = "policy"))]
mod tests {
    use super::{Declared, Record};
    use crate::{mask_with_options, value::Value, MaskOptions, Phone};

    #[test]
    fn numbers_convert_between_declarations() {
        assert_eq!(Declared::Int.convert(Value::Uint(7)), Ok(Value::Int(7)));
        assert_eq!(Declared::Float.convert(Value::Int(2)), Ok(Value::Float(2.0)));
        assert_eq!(Declared::Uint.convert(Value::Float(3.9)), Ok(Value::Uint(3)));
        assert_eq!(Declared::Bool.convert(Value::Int(1)), Err(Value::Int(1)));
    }

    #[test]
    fn nil_converts_to_nullable_declarations() {
        assert_eq!(Declared::ptr(Declared::Int).convert(Value::Nil), Ok(Value::Nil));
        assert_eq!(Declared::Seq.convert(Value::Nil), Ok(Value::Nil));
        assert_eq!(Declared::Int.convert(Value::Nil), Err(Value::Nil));
    }

    #[test]
    fn text_declarations_match_the_concrete_leaf() {
        let phone = Value::text(Phone::from("13800001234"));
        assert!(Declared::text::<Phone>().convert(phone.clone()).is_ok());
        assert!(Declared::String.convert(phone.clone()).is_ok());
        assert!(Declared::text::<String>().convert(phone).is_err());
    }

    #[test]
    fn mismatched_field_is_zeroed_and_counted() {
        let record = Record::new("User")
            .field("name", Declared::String, "alice")
            .field("age", Declared::Int, "thirty");

        let outcome = mask_with_options(&Value::Record(record), MaskOptions::new()).unwrap();
        let Value::Record(masked) = outcome.value else {
            panic!("expected a record");
        };
        assert_eq!(masked.get("name"), Some(&Value::from("alice")));
        assert_eq!(masked.get("age"), Some(&Value::Int(0)));
        assert_eq!(outcome.report.dropped, 1);
    }

    #[test]
    fn pointer_to_record_is_dereferenced_into_a_record_slot() {
        let inner = Record::new("Contact").field(
            "phone",
            Declared::text::<Phone>(),
            Phone::from("13800001234"),
        );
        let record = Record::new("User").field(
            "contact",
            Declared::record("Contact"),
            Value::ptr(Value::Record(inner)),
        );

        let masked = crate::mask(&Value::Record(record));
        let Value::Record(masked) = masked else {
            panic!("expected a record");
        };
        let Some(Value::Record(contact)) = masked.get("contact") else {
            panic!("expected the pointer to be dereferenced");
        };
        assert_eq!(
            contact.get("phone").and_then(Value::as_str),
            Some("138****1234")
        );
    }

    #[test]
    fn zero_values_in_mismatched_slots_are_kept() {
        let record = Record::new("Ticket")
            .field("note", Declared::String, Value::Nil)
            .field("owner", Declared::record("User"), Value::Nil)
            .field("priority", Declared::Int, 0_u32)
            .field("phone", Declared::text::<Phone>(), Phone::from("13800001234"));

        let outcome = mask_with_options(
            &Value::Record(record),
            MaskOptions::new().strict(true),
        )
        .unwrap();
        assert_eq!(outcome.report.dropped, 0);
        let Value::Record(masked) = outcome.value else {
            panic!("expected a record");
        };
        assert_eq!(masked.get("note"), Some(&Value::Nil));
        assert_eq!(masked.get("owner"), Some(&Value::Nil));
        assert_eq!(masked.get("priority"), Some(&Value::Uint(0)));
        assert_eq!(
            masked.get("phone").and_then(Value::as_str),
            Some("138****1234")
        );
    }

    #[test]
    fn same_kind_records_are_stored_directly() {
        let admin = Record::new("Admin").field("token", Declared::String, "x");
        let record =
            Record::new("Session").field("owner", Declared::record("User"), admin.clone());

        let outcome = mask_with_options(&Value::Record(record), MaskOptions::new()).unwrap();
        let Value::Record(masked) = outcome.value else {
            panic!("expected a record");
        };
        assert_eq!(masked.get("owner"), Some(&Value::Record(admin)));
        assert_eq!(outcome.report.dropped, 0);
    }
}
