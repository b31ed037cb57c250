use std::fmt;

/// How a member of a "one of N shapes" family is recognised on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `#value` or `#key=value` — the `key` field (default `type`) carries
    /// `value`.
    Field {
        /// The discriminator key, e.g. `"type"` or `"status"`.
        key: String,
        /// The kind tag, e.g. `"contact"`.
        value: String,
    },
    /// `@key` — the member is the one whose `key` field is present.
    Presence {
        /// The probed key, e.g. `"message_text"`.
        key: String,
    },
}

impl Tag {
    /// The key the family is dispatched on (`type`, `status`, or the probed key).
    pub fn key(&self) -> &str {
        match self {
            Self::Field { key, .. } | Self::Presence { key } => key,
        }
    }

    /// The member's kind tag. Presence members use their probed key.
    pub fn value(&self) -> &str {
        match self {
            Self::Field { value, .. } => value,
            Self::Presence { key } => key,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field { key, value } if key == "type" => write!(f, "#{value}"),
            Self::Field { key, value } => write!(f, "#{key}={value}"),
            Self::Presence { key } => write!(f, "@{key}"),
        }
    }
}
