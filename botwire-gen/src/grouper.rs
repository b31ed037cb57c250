//! Orders definitions and family types for deterministic output.

use botwire_parser::schema::{Category, Definition, Type};

/// Definitions of `category`, sorted alphabetically by name.
pub(crate) fn sorted(defs: &[Definition], category: Category) -> Vec<&Definition> {
    let mut out: Vec<&Definition> = defs.iter().filter(|d| d.category == category).collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

/// The distinct result types of tagged definitions, i.e. the families that
/// become `enum`s. Sorted by name.
pub(crate) fn family_types(defs: &[Definition]) -> Vec<&Type> {
    let mut out: Vec<&Type> = defs
        .iter()
        .filter(|d| d.category == Category::Types && d.tag.is_some())
        .map(|d| &d.ty)
        .collect();

    out.sort_by(|a, b| a.name.cmp(&b.name));
    out.dedup_by(|a, b| a.name == b.name);
    out
}
