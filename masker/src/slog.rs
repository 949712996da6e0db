//! Adapters for emitting masked values through `slog`.
//!
//! Everything in this module masks before it serializes: the logged
//! representation is always derived from [`mask`](crate::mask), never from the
//! original value. Logging is infallible from the caller's point of view, so
//! serialization failures become placeholder strings rather than errors.
//!
//! This module does not configure `slog` and does not decide which data is
//! sensitive.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{engine::mask, fields::Fields, value::Value, Mask};

const SERIALIZE_FAILED: &str = "Failed to serialize masked value";

/// A `slog::Value` that emits an owned masked payload as structured JSON.
///
/// The payload is stored as a `serde_json::Value` and emitted via `slog`'s
/// nested-value support.
#[derive(Clone, Debug)]
pub struct MaskedJson {
    value: JsonValue,
}

impl MaskedJson {
    fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// The JSON that will be logged.
    pub fn as_json(&self) -> &JsonValue {
        &self.value
    }
}

impl SlogValue for MaskedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Converts values into a `slog::Value` that logs their masked form as JSON.
///
/// ```ignore
/// use masker::slog::IntoMaskedJson;
///
/// info!(logger, "signup"; "user" => user.into_masked_json());
/// ```
pub trait IntoMaskedJson: Mask + Serialize {
    /// Masks `self` and returns a `slog::Value` that serializes as structured
    /// JSON.
    ///
    /// If the masked clone cannot be turned into a `serde_json::Value`, the
    /// returned value holds the string `"Failed to serialize masked value"`.
    fn into_masked_json(&self) -> MaskedJson {
        let masked = mask(self);
        let json = serde_json::to_value(&masked)
            .unwrap_or_else(|_| JsonValue::String(SERIALIZE_FAILED.to_string()));
        MaskedJson::new(json)
    }
}

impl<T> IntoMaskedJson for T where T: Mask + Serialize {}

impl SlogValue for Value {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        SlogValue::serialize(&self.into_masked_json(), record, key, serializer)
    }
}

impl SlogValue for Fields {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        SlogValue::serialize(&self.into_masked_json(), record, key, serializer)
    }
}
