//! The [`Deserializable`] trait, the [`Fields`] reader, and primitive impls.

use std::fmt;

use serde_json::{Map, Value};

// ─── Error ───────────────────────────────────────────────────────────────────

/// Errors that can occur during deserialization.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A required key is missing (or `null`).
    MissingField { ty: &'static str, field: &'static str },
    /// A value has the wrong JSON shape.
    UnexpectedValue { expected: &'static str, found: &'static str },
    /// A present field failed to decode.
    InvalidField { ty: &'static str, field: &'static str, source: Box<Error> },
    /// An element of a sequence failed to decode. The whole sequence is
    /// rejected.
    InvalidElement { index: usize, source: Box<Error> },
    /// A tagged union received a tag none of its members carries.
    UnrecognizedVariant { family: &'static str, tag: String },
    /// A presence-discriminated union received a map that none of its
    /// members' identifying keys appear in.
    UnrecognizedShape { family: &'static str },
    /// The input was not valid JSON.
    Malformed(String),
}

impl Error {
    /// The root cause of a chain of [`Error::InvalidField`] /
    /// [`Error::InvalidElement`] wrappers.
    pub fn innermost(&self) -> &Error {
        match self {
            Self::InvalidField { source, .. } | Self::InvalidElement { source, .. } => {
                source.innermost()
            }
            other => other,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { ty, field } => write!(f, "{ty}: missing required field `{field}`"),
            Self::UnexpectedValue { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::InvalidField { ty, field, source } => write!(f, "{ty}.{field}: {source}"),
            Self::InvalidElement { index, source } => write!(f, "[{index}]: {source}"),
            Self::UnrecognizedVariant { family, tag } => {
                write!(f, "{family}: unrecognized variant `{tag}`")
            }
            Self::UnrecognizedShape { family } => {
                write!(f, "{family}: object matches no known variant")
            }
            Self::Malformed(msg) => write!(f, "malformed JSON: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidField { source, .. } | Self::InvalidElement { source, .. } => {
                Some(source.as_ref())
            }
            _ => None,
        }
    }
}

/// Specialized `Result` for deserialization.
pub type Result<T> = std::result::Result<T, Error>;

/// Short name of the JSON kind of `value`, used in error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null      => "null",
        Value::Bool(_)   => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_)  => "array",
        Value::Object(_) => "object",
    }
}

fn unexpected(expected: &'static str, found: &Value) -> Error {
    Error::UnexpectedValue { expected, found: kind_of(found) }
}

// ─── Deserializable ──────────────────────────────────────────────────────────

/// Build a value from its untyped JSON representation.
pub trait Deserializable: Sized {
    /// Validate `value` and build `Self` from it.
    fn deserialize(value: &Value) -> Result<Self>;

    /// Convenience: parse JSON text, then deserialize.
    fn from_json(text: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| Error::Malformed(e.to_string()))?;
        Self::deserialize(&value)
    }
}

// ─── Fields ──────────────────────────────────────────────────────────────────

/// Keyed access to the fields of a JSON object on behalf of the record type
/// `ty`. Every key lookup made by generated code goes through here, so all
/// field errors carry the record and key they concern.
pub struct Fields<'a> {
    ty: &'static str,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// Fails unless `value` is a JSON object.
    pub fn new(ty: &'static str, value: &'a Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self { ty, map }),
            other => Err(unexpected("object", other)),
        }
    }

    /// The value under `key`, treating `null` as absent.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    /// Whether `key` holds a non-`null` value.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Decode a required field.
    pub fn required<T: Deserializable>(&self, key: &'static str) -> Result<T> {
        let value = self
            .get(key)
            .ok_or(Error::MissingField { ty: self.ty, field: key })?;
        T::deserialize(value).map_err(|e| self.invalid(key, e))
    }

    /// Decode an optional field; missing and `null` both yield `None`.
    pub fn optional<T: Deserializable>(&self, key: &'static str) -> Result<Option<T>> {
        self.get(key)
            .map(|value| T::deserialize(value).map_err(|e| self.invalid(key, e)))
            .transpose()
    }

    /// Check that the discriminator `key` holds `tag`.
    pub fn expect_tag(&self, family: &'static str, key: &'static str, tag: &'static str) -> Result<()> {
        let found: String = self.required(key)?;
        if found == tag {
            Ok(())
        } else {
            Err(Error::UnrecognizedVariant { family, tag: found })
        }
    }

    fn invalid(&self, field: &'static str, source: Error) -> Error {
        Error::InvalidField { ty: self.ty, field, source: Box::new(source) }
    }
}

// ─── Primitives ───────────────────────────────────────────────────────────────

impl Deserializable for bool {
    fn deserialize(value: &Value) -> Result<Self> {
        value.as_bool().ok_or_else(|| unexpected("boolean", value))
    }
}

impl Deserializable for i32 {
    fn deserialize(value: &Value) -> Result<Self> {
        value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| unexpected("32-bit integer", value))
    }
}

impl Deserializable for i64 {
    fn deserialize(value: &Value) -> Result<Self> {
        value.as_i64().ok_or_else(|| unexpected("integer", value))
    }
}

impl Deserializable for f64 {
    fn deserialize(value: &Value) -> Result<Self> {
        value.as_f64().ok_or_else(|| unexpected("number", value))
    }
}

impl Deserializable for String {
    fn deserialize(value: &Value) -> Result<Self> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| unexpected("string", value))
    }
}

impl Deserializable for crate::ChatId {
    fn deserialize(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(Self::Username(s.clone())),
            other => other
                .as_i64()
                .map(Self::Id)
                .ok_or_else(|| unexpected("integer or string", other)),
        }
    }
}

// ─── Containers ──────────────────────────────────────────────────────────────

/// Element-wise, order preserving. One bad element rejects the sequence.
impl<T: Deserializable> Deserializable for Vec<T> {
    fn deserialize(value: &Value) -> Result<Self> {
        let items = value.as_array().ok_or_else(|| unexpected("array", value))?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                T::deserialize(item)
                    .map_err(|e| Error::InvalidElement { index, source: Box::new(e) })
            })
            .collect()
    }
}

impl<T: Deserializable> Deserializable for Option<T> {
    fn deserialize(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::deserialize(other).map(Some),
        }
    }
}

impl<T: Deserializable> Deserializable for Box<T> {
    fn deserialize(value: &Value) -> Result<Self> {
        T::deserialize(value).map(Box::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_distinguishes_missing_from_invalid() {
        let value = json!({"a": 1, "b": "x", "c": null});
        let fields = Fields::new("T", &value).unwrap();

        assert_eq!(fields.required::<i32>("a"), Ok(1));
        assert_eq!(
            fields.required::<i32>("c"),
            Err(Error::MissingField { ty: "T", field: "c" })
        );
        assert_eq!(
            fields.required::<i32>("b"),
            Err(Error::InvalidField {
                ty: "T",
                field: "b",
                source: Box::new(Error::UnexpectedValue { expected: "32-bit integer", found: "string" }),
            })
        );
    }

    #[test]
    fn optional_treats_null_as_absent() {
        let value = json!({"a": null});
        let fields = Fields::new("T", &value).unwrap();
        assert_eq!(fields.optional::<String>("a"), Ok(None));
        assert_eq!(fields.optional::<String>("z"), Ok(None));
    }

    #[test]
    fn fields_require_an_object() {
        assert!(matches!(
            Fields::new("T", &json!([1])),
            Err(Error::UnexpectedValue { expected: "object", found: "array" })
        ));
    }

    #[test]
    fn expect_tag_reports_found_tag() {
        let value = json!({"type": "photo"});
        let fields = Fields::new("T", &value).unwrap();
        assert_eq!(fields.expect_tag("F", "type", "photo"), Ok(()));
        assert_eq!(
            fields.expect_tag("F", "type", "video"),
            Err(Error::UnrecognizedVariant { family: "F", tag: "photo".into() })
        );
    }

    #[test]
    fn innermost_unwraps_nesting() {
        let err = Error::InvalidField {
            ty: "A",
            field: "b",
            source: Box::new(Error::InvalidElement {
                index: 2,
                source: Box::new(Error::MissingField { ty: "C", field: "d" }),
            }),
        };
        assert_eq!(err.innermost(), &Error::MissingField { ty: "C", field: "d" });
        assert_eq!(err.to_string(), "A.b: [2]: C: missing required field `d`");
    }
}
