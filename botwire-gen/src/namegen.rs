//! Functions that convert schema names to idiomatic Rust identifiers.

use botwire_parser::schema::{Definition, Parameter, Type};

use crate::metadata::Metadata;

// ─── primitive → Rust type ───────────────────────────────────────────────────

/// Map a schema primitive name to a Rust type string, if applicable.
pub(crate) fn builtin_type(name: &str) -> Option<&'static str> {
    Some(match name {
        "Bool"   => "bool",
        "true"   => "bool",
        "int"    => "i32",
        "long"   => "i64",
        "double" => "f64",
        "string" => "String",
        "ChatId" => "crate::ChatId",
        "Vector" => "Vec",
        _ => return None,
    })
}

// ─── PascalCase conversion ────────────────────────────────────────────────────

/// Converts `some_ok_name` or `someOKName` into `SomeOkName` (PascalCase).
pub(crate) fn to_pascal(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut next_upper = true;
    let mut prev_upper = false;

    for ch in name.chars() {
        if ch == '_' {
            next_upper = true;
            prev_upper = false;
            continue;
        }
        if next_upper {
            out.push(ch.to_ascii_uppercase());
            next_upper = false;
            prev_upper = ch.is_ascii_uppercase();
        } else if ch.is_ascii_uppercase() {
            if prev_upper {
                // Continuation of a cap-run ("OK" in "someOKName") → lowercase.
                out.push(ch.to_ascii_lowercase());
            } else {
                out.push(ch);
            }
            prev_upper = true;
        } else {
            out.push(ch);
            prev_upper = false;
        }
    }
    out
}

/// Splits a PascalCase identifier into its words: `InputTextMessageContent`
/// → `["Input", "Text", "Message", "Content"]`.
fn words(pascal: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, ch) in pascal.char_indices().skip(1) {
        if ch.is_ascii_uppercase() {
            out.push(&pascal[start..i]);
            start = i;
        }
    }
    if start < pascal.len() {
        out.push(&pascal[start..]);
    }
    out
}

// ─── Definition helpers ───────────────────────────────────────────────────────

/// `struct` name for a definition (PascalCase).
pub(crate) fn def_type_name(def: &Definition) -> String {
    to_pascal(&def.name)
}

/// Fully-qualified `crate::types::Name` path for a data definition.
pub(crate) fn def_qual_name(def: &Definition) -> String {
    format!("crate::types::{}", def_type_name(def))
}

/// Anchor of the definition in the official Bot API documentation.
pub(crate) fn doc_anchor(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Enum variant name: the words the member adds to its family name.
///
/// `InlineQueryResultContact` in `InlineQueryResult` → `Contact`,
/// `InputTextMessageContent` in `InputMessageContent` → `Text`.
pub(crate) fn def_variant_name(def: &Definition) -> String {
    let full = def_type_name(def);
    let family = type_name(&def.ty);

    let member_words = words(&full);
    let family_words = words(&family);

    let lead = member_words
        .iter()
        .zip(&family_words)
        .take_while(|(a, b)| a == b)
        .count();
    let rest = &member_words[lead..];
    let family_rest = &family_words[lead..];
    let trail = rest
        .iter()
        .rev()
        .zip(family_rest.iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let variant = rest[..rest.len() - trail].concat();

    match variant.as_str() {
        // `Self` is a reserved keyword; empty means the member is named like
        // its family.
        "" | "Self" => full,
        _ => variant,
    }
}

// ─── Type helpers ─────────────────────────────────────────────────────────────

/// PascalCase name for a schema type.
pub(crate) fn type_name(ty: &Type) -> String {
    to_pascal(&ty.name)
}

/// Fully-qualified Rust type path, e.g. `crate::enums::MenuButton`,
/// `crate::types::Sticker` or `Vec<Vec<crate::types::KeyboardButton>>`.
pub(crate) fn type_qual_name(ty: &Type, meta: &Metadata) -> String {
    let mut s = if let Some(b) = builtin_type(&ty.name) {
        b.to_owned()
    } else if meta.is_family(&ty.name) {
        format!("crate::enums::{}", type_name(ty))
    } else {
        let name = meta.record(&ty.name).map(def_type_name).unwrap_or_else(|| type_name(ty));
        format!("crate::types::{name}")
    };

    if let Some(arg) = &ty.generic_arg {
        s.push('<');
        s.push_str(&type_qual_name(arg, meta));
        s.push('>');
    }

    s
}

// ─── Parameter helpers ────────────────────────────────────────────────────────

/// The Rust attribute name for a parameter (handles reserved keywords).
pub(crate) fn param_attr_name(param: &Parameter) -> String {
    match param.name.as_str() {
        "final"  => "r#final".into(),
        "loop"   => "r#loop".into(),
        "self"   => "is_self".into(),
        "static" => "r#static".into(),
        "type"   => "r#type".into(),
        other    => other.to_owned(),
    }
}

/// The full Rust type expression for a parameter, e.g. `Option<i32>` or
/// `Option<Box<crate::types::Message>>`.
pub(crate) fn param_qual_name(def: &Definition, param: &Parameter, meta: &Metadata) -> String {
    let mut inner = type_qual_name(&param.ty, meta);
    if meta.needs_box(def, param) {
        inner = format!("Box<{inner}>");
    }
    if param.optional {
        format!("Option<{inner}>")
    } else {
        inner
    }
}
