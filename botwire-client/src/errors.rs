//! Error types for botwire-client.

use std::{fmt, io};

use botwire_types::deserialize::{self, Fields};
use botwire_types::{Deserializable, types};

// ─── ApiError ─────────────────────────────────────────────────────────────────

/// An error returned by the Bot API in an `{"ok": false, …}` response.
///
/// # Example
/// `{"ok":false,"error_code":429,"description":"Too Many Requests: retry after 5","parameters":{"retry_after":5}}`
/// → `ApiError { code: 429, description: "Too Many Requests: retry after 5", parameters: Some(..) }`
#[derive(Clone, Debug, PartialEq)]
pub struct ApiError {
    /// HTTP-like status code.
    pub code: i32,
    /// Human-readable description, e.g. `"Bad Request: chat not found"`.
    pub description: String,
    /// Hints on how the request can be retried, if the API sent any.
    pub parameters: Option<types::ResponseParameters>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bot API {}: {}", self.code, self.description)
    }
}

impl std::error::Error for ApiError {}

impl Deserializable for ApiError {
    fn deserialize(value: &serde_json::Value) -> deserialize::Result<Self> {
        let fields = Fields::new("ApiError", value)?;
        Ok(Self {
            code: fields.optional("error_code")?.unwrap_or_default(),
            description: fields.optional("description")?.unwrap_or_default(),
            parameters: fields.optional("parameters")?,
        })
    }
}

impl ApiError {
    /// Match on the description, with optional wildcard prefix/suffix `'*'`.
    ///
    /// # Examples
    /// - `err.is("Forbidden: bot was blocked by the user")` — exact match
    /// - `err.is("Bad Request: *")` — starts-with match
    /// - `err.is("*not found")` — ends-with match
    pub fn is(&self, pattern: &str) -> bool {
        if let Some(prefix) = pattern.strip_suffix('*') {
            self.description.starts_with(prefix)
        } else if let Some(suffix) = pattern.strip_prefix('*') {
            self.description.ends_with(suffix)
        } else {
            self.description == pattern
        }
    }

    /// Seconds to wait before repeating the request, for flood-control errors.
    pub fn retry_after(&self) -> Option<i32> {
        self.parameters.as_ref().and_then(|p| p.retry_after)
    }

    /// The supergroup a migrated group now lives in.
    pub fn migrate_to_chat_id(&self) -> Option<i64> {
        self.parameters.as_ref().and_then(|p| p.migrate_to_chat_id)
    }
}

// ─── TransportError ───────────────────────────────────────────────────────────

/// Failure reported by a [`crate::Transport`] after it has used up the
/// attempts it was given.
#[derive(Debug)]
pub enum TransportError {
    /// The API answered with an error envelope.
    Api(ApiError),
    /// Network / I/O failure.
    Io(io::Error),
    /// Anything else the transport wants to surface (malformed envelopes,
    /// HTTP client errors, …).
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e)   => write!(f, "{e}"),
            Self::Io(e)    => write!(f, "I/O error: {e}"),
            Self::Other(e) => write!(f, "transport error: {e}"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e)   => Some(e),
            Self::Io(e)    => Some(e),
            Self::Other(e) => Some(e.as_ref()),
        }
    }
}

impl From<ApiError> for TransportError {
    fn from(e: ApiError) -> Self { Self::Api(e) }
}

impl From<io::Error> for TransportError {
    fn from(e: io::Error) -> Self { Self::Io(e) }
}

// ─── InvocationError ──────────────────────────────────────────────────────────

/// The error type returned from any request sent through this crate.
#[derive(Debug)]
pub enum InvocationError {
    /// The transport failed, or the API rejected the request.
    Transport(TransportError),
    /// The response did not match the method's declared return type.
    Deserialize(deserialize::Error),
    /// The request was dropped (e.g. the blocking task panicked or was
    /// cancelled at runtime shutdown).
    Dropped,
}

impl fmt::Display for InvocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e)   => write!(f, "{e}"),
            Self::Deserialize(e) => write!(f, "deserialize error: {e}"),
            Self::Dropped        => write!(f, "request dropped"),
        }
    }
}

impl std::error::Error for InvocationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e)   => Some(e),
            Self::Deserialize(e) => Some(e),
            Self::Dropped        => None,
        }
    }
}

impl From<TransportError> for InvocationError {
    fn from(e: TransportError) -> Self { Self::Transport(e) }
}

impl From<deserialize::Error> for InvocationError {
    fn from(e: deserialize::Error) -> Self { Self::Deserialize(e) }
}

impl InvocationError {
    /// The API error behind this failure, if the API answered at all.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Self::Transport(TransportError::Api(e)) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` if this is the described API error (supports `'*'` wildcards).
    pub fn is(&self, pattern: &str) -> bool {
        self.api().is_some_and(|e| e.is(pattern))
    }

    /// If this is a flood-control error, returns how many seconds to wait.
    pub fn retry_after(&self) -> Option<i32> {
        self.api().and_then(ApiError::retry_after)
    }
}
