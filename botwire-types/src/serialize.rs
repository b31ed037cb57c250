//! The [`Serializable`] and [`Record`] traits and their implementations for
//! primitive Bot API types.
//!
//! Values encode to [`serde_json::Value`]. An absent optional field encodes
//! as an explicit `null` marker inside its record's map; callers that must
//! not send markers over the wire use [`strip_absent`].

use serde_json::{Map, Value};

/// Encode `self` as an untyped JSON value.
pub trait Serializable {
    /// Builds the JSON representation of `self`.
    fn serialize(&self) -> Value;

    /// Convenience: encode straight to a JSON string.
    fn to_json_string(&self) -> String {
        self.serialize().to_string()
    }
}

/// A value whose encoding is a JSON object: records, tagged unions and
/// method requests.
pub trait Record: Serializable {
    /// Encode `self` as a string-keyed map, one entry per field. Tagged
    /// members also carry their discriminator entry.
    fn to_map(&self) -> Map<String, Value>;
}

// ─── scalars ─────────────────────────────────────────────────────────────────

impl Serializable for bool {
    fn serialize(&self) -> Value { Value::Bool(*self) }
}

impl Serializable for i32 {
    fn serialize(&self) -> Value { Value::from(*self) }
}

impl Serializable for i64 {
    fn serialize(&self) -> Value { Value::from(*self) }
}

/// JSON has no NaN or infinity, so a non-finite value encodes as `null`.
///
/// Every `double` field must therefore hold a finite value: a `null` in a
/// required field fails to decode, and is dropped from request payloads along
/// with the other absent fields.
impl Serializable for f64 {
    fn serialize(&self) -> Value { Value::from(*self) }
}

impl Serializable for String {
    fn serialize(&self) -> Value { Value::String(self.clone()) }
}

impl Serializable for crate::ChatId {
    fn serialize(&self) -> Value {
        match self {
            Self::Id(id) => Value::from(*id),
            Self::Username(name) => Value::String(name.clone()),
        }
    }
}

// ─── containers ──────────────────────────────────────────────────────────────

impl<T: Serializable> Serializable for Vec<T> {
    fn serialize(&self) -> Value {
        Value::Array(self.iter().map(Serializable::serialize).collect())
    }
}

/// `None` is the absent marker: an explicit `null`.
impl<T: Serializable> Serializable for Option<T> {
    fn serialize(&self) -> Value {
        match self {
            Some(v) => v.serialize(),
            None => Value::Null,
        }
    }
}

impl<T: Serializable> Serializable for Box<T> {
    fn serialize(&self) -> Value {
        (**self).serialize()
    }
}

// ─── absent markers ──────────────────────────────────────────────────────────

/// Drop every `null` entry from `map`, recursing into nested objects and
/// arrays. Array elements themselves are kept in place.
pub fn strip_absent(map: &mut Map<String, Value>) {
    map.retain(|_, v| !v.is_null());
    for value in map.values_mut() {
        strip_value(value);
    }
}

fn strip_value(value: &mut Value) {
    match value {
        Value::Object(map) => strip_absent(map),
        Value::Array(items) => items.iter_mut().for_each(strip_value),
        _ => {}
    }
}
