//! Parser for the Telegram Bot API schema language.
//!
//! The schema borrows the shape of Telegram's [Type Language]: one
//! definition per line, parameters as `name:Type`, and a `= Type` result.
//! On top of that it describes the JSON-specific bits of the Bot API:
//! optional fields (`name:?Type`) and how the members of a "one of N
//! shapes" family are told apart on the wire (`#tag`, `#key=tag`, `@key`).
//!
//! This crate converts raw schema text into a structured [`Definition`] AST
//! which can then be used by code-generators (see `botwire-gen`).
//!
//! # Quick start
//!
//! ```rust
//! use botwire_parser::parse_schema_file;
//!
//! let src = "inlineQueryResultContact#contact id:string last_name:?string = InlineQueryResult;";
//! for def in parse_schema_file(src) {
//!     println!("{:#?}", def.unwrap());
//! }
//! ```
//!
//! [Type Language]: https://core.telegram.org/mtproto/TL

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Parse error types for schema parsing.
pub mod errors;
pub mod schema;
mod iterator;
mod utils;

use errors::SchemaError;
use schema::Definition;

pub use utils::schema_version;

/// Parses a complete schema file, yielding [`Definition`]s one by one.
///
/// Lines starting with `//` are treated as comments and skipped.
/// The special `---functions---` and `---types---` section markers switch
/// the [`schema::Category`] applied to the following definitions.
///
/// Each error carries the line its definition started on; iteration carries
/// on past it, so a caller can report every bad definition in one go.
pub fn parse_schema_file(contents: &str) -> impl Iterator<Item = Result<Definition, SchemaError>> + '_ {
    iterator::SchemaIterator::new(contents)
}

/// Parses a complete schema file, failing if any definition is malformed.
///
/// Unlike [`parse_schema_file`] nothing is skipped: the result is either
/// every definition in the file or every error found in it.
pub fn parse_schema(contents: &str) -> Result<Vec<Definition>, Vec<SchemaError>> {
    let (defs, errors): (Vec<_>, Vec<_>) = parse_schema_file(contents).partition(Result::is_ok);
    if errors.is_empty() {
        Ok(defs.into_iter().filter_map(Result::ok).collect())
    } else {
        Err(errors.into_iter().filter_map(Result::err).collect())
    }
}
