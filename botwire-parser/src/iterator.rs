//! Line scanner behind [`crate::parse_schema_file`].
//!
//! A definition may span several lines and ends at the first `;`. Every
//! error is reported against the line the failing definition started on.

use std::iter::Enumerate;
use std::str::{FromStr, Lines};

use crate::errors::{ParseError, SchemaError};
use crate::schema::{Category, Definition};

/// A definition whose terminating `;` has not been seen yet.
struct Pending {
    line: usize,
    text: String,
}

pub(crate) struct SchemaIterator<'a> {
    lines:    Enumerate<Lines<'a>>,
    category: Category,
    pending:  Option<Pending>,
    /// Error held back while an earlier one is reported.
    queued:   Option<SchemaError>,
}

impl<'a> SchemaIterator<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self { lines: src.lines().enumerate(), category: Category::Types, pending: None, queued: None }
    }

    /// Builds the definition collected so far, tagging it with the current section.
    fn finish(&self, pending: Pending) -> Result<Definition, SchemaError> {
        let raw = pending.text.trim().trim_end_matches(';');
        Definition::from_str(raw)
            .map(|mut def| {
                def.category = self.category;
                def
            })
            .map_err(|error| SchemaError { line: pending.line, error })
    }
}

/// `---name---` markers select the category of the definitions that follow.
fn section(line: &str) -> Option<Result<Category, ParseError>> {
    let name = line.strip_prefix("---")?.strip_suffix("---")?;
    Some(match name {
        "types" => Ok(Category::Types),
        "functions" => Ok(Category::Functions),
        other => Err(ParseError::UnknownSection(other.to_owned())),
    })
}

impl Iterator for SchemaIterator<'_> {
    type Item = Result<Definition, SchemaError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(error) = self.queued.take() {
            return Some(Err(error));
        }
        while let Some((index, line)) = self.lines.next() {
            let line_no = index + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }

            if let Some(marker) = section(line) {
                let error = match marker {
                    Ok(category) => {
                        self.category = category;
                        None
                    }
                    Err(error) => Some(SchemaError { line: line_no, error }),
                };
                // A marker inside an open definition means its `;` was forgotten.
                if let Some(open) = self.pending.take() {
                    self.queued = error;
                    return Some(Err(SchemaError { line: open.line, error: ParseError::Unterminated }));
                }
                if let Some(error) = error {
                    return Some(Err(error));
                }
                continue;
            }

            let pending = self.pending.get_or_insert_with(|| Pending { line: line_no, text: String::new() });
            pending.text.push(' ');
            pending.text.push_str(line);

            if line.ends_with(';') {
                if let Some(done) = self.pending.take() {
                    return Some(self.finish(done));
                }
            }
        }

        // Input ran out in the middle of a definition.
        self.pending
            .take()
            .map(|open| Err(SchemaError { line: open.line, error: ParseError::Unterminated }))
    }
}
