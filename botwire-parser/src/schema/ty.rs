use std::fmt;
use std::str::FromStr;

use crate::errors::ParamParseError;

/// The type of a definition or a parameter, e.g. `Vector<MessageEntity>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Type {
    /// The type name, e.g. `"Vector"`, `"string"` or `"PhotoSize"`.
    pub name: String,

    /// The generic argument, e.g. `MessageEntity` in `Vector<MessageEntity>`.
    pub generic_arg: Option<Box<Type>>,
}

impl Type {
    /// `true` for `Vector<…>`.
    pub fn is_vector(&self) -> bool {
        self.name == "Vector" && self.generic_arg.is_some()
    }

    /// The innermost non-`Vector` type, e.g. `InlineKeyboardButton` for
    /// `Vector<Vector<InlineKeyboardButton>>`.
    pub fn element(&self) -> &Type {
        match &self.generic_arg {
            Some(arg) => arg.element(),
            None => self,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(arg) = &self.generic_arg {
            write!(f, "<{arg}>")?;
        }
        Ok(())
    }
}

impl FromStr for Type {
    type Err = ParamParseError;

    /// Parses a type expression such as `Vector<Vector<KeyboardButton>>`.
    ///
    /// # Examples
    /// ```
    /// use botwire_parser::schema::Type;
    /// assert!("Vector<long>".parse::<Type>().is_ok());
    /// assert!("Vector<long".parse::<Type>().is_err());
    /// ```
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        // Split off `<generic_arg>`
        let (name, generic_arg) = match raw.split_once('<') {
            Some((name, rest)) => match rest.strip_suffix('>') {
                Some(arg) => (name, Some(Box::new(Type::from_str(arg)?))),
                None => return Err(ParamParseError::InvalidGeneric),
            },
            None => (raw, None),
        };

        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ParamParseError::Empty);
        }

        Ok(Self {
            name: name.to_owned(),
            generic_arg,
        })
    }
}
