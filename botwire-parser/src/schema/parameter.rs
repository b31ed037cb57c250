use std::fmt;
use std::str::FromStr;

use crate::errors::ParamParseError;
use crate::schema::Type;
use crate::utils::is_wire_ident;

/// A single `name:Type` or `name:?Type` parameter inside a definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// The parameter name; doubles as the JSON key on the wire.
    pub name: String,
    /// The declared type.
    pub ty: Type,
    /// `true` when the key may be absent from the wire object.
    pub optional: bool,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let q = if self.optional { "?" } else { "" };
        write!(f, "{}:{q}{}", self.name, self.ty)
    }
}

impl FromStr for Parameter {
    type Err = ParamParseError;

    /// Parses a single parameter token such as `id:string`,
    /// `thumb:?PhotoSize` or `caption_entities:?Vector<MessageEntity>`.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (name, ty_str) = token.split_once(':').ok_or(ParamParseError::NotImplemented)?;

        if name.is_empty() || ty_str.is_empty() {
            return Err(ParamParseError::Empty);
        }
        if !is_wire_ident(name) {
            return Err(ParamParseError::InvalidName { name: name.to_owned() });
        }

        let (ty_str, optional) = match ty_str.strip_prefix('?') {
            Some(rest) => (rest, true),
            None => (ty_str, false),
        };
        if ty_str.contains('?') {
            return Err(ParamParseError::InvalidOptional);
        }

        Ok(Self {
            name: name.to_owned(),
            ty: ty_str.parse()?,
            optional,
        })
    }
}
