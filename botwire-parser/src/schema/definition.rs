use std::fmt;
use std::str::FromStr;

use crate::errors::{ParamParseError, ParseError};
use crate::schema::{Category, Parameter, Tag, Type};
use crate::utils::is_wire_ident;

/// A single schema definition — either a data type or a method.
///
/// For example:
/// ```text
/// inlineQueryResultContact#contact id:string last_name:?string = InlineQueryResult;
/// ```
/// becomes a `Definition` with `name = "inlineQueryResultContact"`,
/// `tag = #contact`, `params = [id:string, last_name:?string]` and
/// `ty = InlineQueryResult`.
#[derive(Clone, Debug, PartialEq)]
pub struct Definition {
    /// The type/method name (e.g. `"photoSize"`, `"getCustomEmojiStickers"`).
    pub name: String,

    /// How this member is recognised inside its family, if it belongs to one.
    pub tag: Option<Tag>,

    /// Ordered list of parameters.
    pub params: Vec<Parameter>,

    /// The type this definition produces (e.g. `InlineQueryResult`).
    pub ty: Type,

    /// Whether this is a data type or a method.
    pub category: Category,
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(tag) = &self.tag {
            write!(f, "{tag}")?;
        }
        for p in &self.params {
            write!(f, " {p}")?;
        }
        write!(f, " = {}", self.ty)
    }
}

fn parse_head(head: &str) -> Result<(&str, Option<Tag>), ParseError> {
    let invalid = || ParseError::InvalidTag(head.to_owned());

    if head.contains('#') && head.contains('@') {
        return Err(invalid());
    }

    if let Some((name, spec)) = head.split_once('#') {
        let (key, value) = spec.split_once('=').unwrap_or(("type", spec));
        if !is_wire_ident(key) || !is_wire_ident(value) {
            return Err(invalid());
        }
        return Ok((name, Some(Tag::Field { key: key.to_owned(), value: value.to_owned() })));
    }

    if let Some((name, key)) = head.split_once('@') {
        if !is_wire_ident(key) {
            return Err(invalid());
        }
        return Ok((name, Some(Tag::Presence { key: key.to_owned() })));
    }

    Ok((head, None))
}

impl FromStr for Definition {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ParseError::Empty);
        }

        // Split at the last `=`; a keyed discriminator (`#status=creator`)
        // also contains one.
        let (lhs, ty_str) = raw.rsplit_once('=').ok_or(ParseError::MissingType)?;
        let lhs = lhs.trim();
        let ty_str = ty_str.trim().trim_end_matches(';').trim();

        if ty_str.is_empty() {
            return Err(ParseError::MissingType);
        }

        let ty = Type::from_str(ty_str).map_err(|_| ParseError::MissingType)?;

        // Split head (name + optional discriminator) from parameter tokens
        let (head, rest) = match lhs.split_once(|c: char| c.is_whitespace()) {
            Some((h, r)) => (h.trim_end(), r.trim_start()),
            None => (lhs, ""),
        };

        let (name, tag) = parse_head(head)?;

        let mut chars = name.chars();
        let well_formed = chars.next().is_some_and(|c| c.is_ascii_lowercase())
            && chars.all(|c| c.is_ascii_alphanumeric());
        if !well_formed {
            return Err(ParseError::MissingName);
        }

        let params = rest
            .split_whitespace()
            .map(|token| Parameter::from_str(token).map_err(ParseError::InvalidParam))
            .collect::<Result<Vec<_>, ParseError>>()?;

        // Wire keys must be unique, including the implicit discriminator key.
        let mut seen: Vec<&str> = Vec::with_capacity(params.len() + 1);
        if let Some(Tag::Field { key, .. }) = &tag {
            seen.push(key);
        }
        for p in &params {
            if seen.contains(&p.name.as_str()) {
                return Err(ParseError::DuplicateParam(p.name.clone()));
            }
            seen.push(&p.name);
        }

        // A presence member must declare the key it is recognised by.
        if let Some(Tag::Presence { key }) = &tag {
            let declared = params.iter().any(|p| &p.name == key && !p.optional);
            if !declared {
                return Err(ParseError::InvalidParam(ParamParseError::InvalidName { name: key.clone() }));
            }
        }

        Ok(Definition {
            name: name.to_owned(),
            tag,
            params,
            ty,
            category: Category::Types, // caller sets the real category
        })
    }
}
