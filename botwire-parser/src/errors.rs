use std::fmt;

/// Errors produced while parsing a single parameter token.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamParseError {
    /// An empty string was encountered where a name/type was expected.
    Empty,
    /// The parameter name is not a valid wire key (`[a-z0-9_]+`).
    InvalidName {
        /// The offending name.
        name: String,
    },
    /// A `?` appeared anywhere but directly after the `:`.
    InvalidOptional,
    /// A generic `<…>` argument was malformed (missing closing `>`).
    InvalidGeneric,
    /// A bare `name` with no `:type`.
    NotImplemented,
}

impl fmt::Display for ParamParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty token"),
            Self::InvalidName { name } => write!(f, "invalid parameter name: {name:?}"),
            Self::InvalidOptional => write!(f, "`?` must directly follow the `:`"),
            Self::InvalidGeneric => write!(f, "invalid generic argument (unclosed `<`)"),
            Self::NotImplemented => write!(f, "parameter without `:type` is not supported"),
        }
    }
}

impl std::error::Error for ParamParseError {}

/// Errors produced while parsing a complete schema definition.
#[derive(Debug, PartialEq)]
pub enum ParseError {
    /// The input was blank.
    Empty,
    /// No `= Type` was found.
    MissingType,
    /// The name (before `=`) was missing or malformed.
    MissingName,
    /// The `#tag`, `#key=tag` or `@key` discriminator was malformed.
    InvalidTag(String),
    /// A parameter was invalid.
    InvalidParam(ParamParseError),
    /// Two parameters share the same wire key.
    DuplicateParam(String),
    /// The input ended, or a section marker appeared, before the closing `;`.
    Unterminated,
    /// A `---name---` marker other than `types` or `functions`.
    UnknownSection(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty definition"),
            Self::MissingType => write!(f, "missing `= Type`"),
            Self::MissingName => write!(f, "missing or malformed name"),
            Self::InvalidTag(t) => write!(f, "invalid discriminator: {t:?}"),
            Self::InvalidParam(e) => write!(f, "invalid parameter: {e}"),
            Self::DuplicateParam(name) => write!(f, "duplicate parameter: {name}"),
            Self::Unterminated => write!(f, "definition is missing its closing `;`"),
            Self::UnknownSection(name) => write!(f, "unknown section marker: ---{name}---"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidParam(e) => Some(e),
            _ => None,
        }
    }
}

/// A [`ParseError`] together with the schema line it was found on.
#[derive(Debug, PartialEq)]
pub struct SchemaError {
    /// 1-based line on which the offending definition starts.
    pub line: usize,
    /// What was wrong with it.
    pub error: ParseError,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
