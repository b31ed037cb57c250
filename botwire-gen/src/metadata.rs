//! Pre-computed metadata used throughout the code generator.

use std::collections::{HashMap, HashSet};

use botwire_parser::schema::{Category, Definition, Parameter, Tag, Type};

use crate::namegen::builtin_type;

pub(crate) struct Metadata<'a> {
    /// Family type name → tagged members, in schema order.
    families: HashMap<&'a str, Vec<&'a Definition>>,
    /// Record type name → its single untagged definition.
    records: HashMap<&'a str, &'a Definition>,
    /// Definitions that contain themselves (directly or transitively).
    recursive: HashSet<&'a str>,
}

impl<'a> Metadata<'a> {
    /// Index `defs` and check that they describe a schema the generator can
    /// emit. Returns a human-readable message on the first violation.
    pub(crate) fn build(defs: &'a [Definition]) -> Result<Self, String> {
        let mut meta = Self {
            families: HashMap::new(),
            records: HashMap::new(),
            recursive: HashSet::new(),
        };

        for def in defs {
            match (def.category, &def.tag) {
                (Category::Functions, Some(tag)) => {
                    return Err(format!("method `{}` cannot carry a discriminator ({tag})", def.name));
                }
                (Category::Functions, None) => {}
                (Category::Types, Some(_)) => {
                    meta.families.entry(def.ty.name.as_str()).or_default().push(def);
                }
                (Category::Types, None) => {
                    if meta.records.insert(def.ty.name.as_str(), def).is_some() {
                        return Err(format!("type `{}` has more than one untagged definition", def.ty.name));
                    }
                }
            }
        }

        for (name, members) in &meta.families {
            if meta.records.contains_key(name) {
                return Err(format!("type `{name}` mixes tagged and untagged definitions"));
            }
            check_family(name, members)?;
        }

        for def in defs {
            for param in &def.params {
                meta.check_type(&param.ty)
                    .map_err(|ty| format!("`{}.{}` refers to unknown type `{ty}`", def.name, param.name))?;
            }
            if def.category == Category::Functions {
                meta.check_type(&def.ty)
                    .map_err(|ty| format!("method `{}` returns unknown type `{ty}`", def.name))?;
            }
        }

        // Detect recursion
        for def in defs.iter().filter(|d| d.category == Category::Types) {
            let self_ref = def.params.iter().any(|p| {
                let target = p.ty.element().name.as_str();
                target == def.ty.name || meta.reaches(target, &def.ty.name, &mut HashSet::new())
            });
            if self_ref {
                meta.recursive.insert(def.name.as_str());
            }
        }

        Ok(meta)
    }

    pub(crate) fn is_family(&self, name: &str) -> bool {
        self.families.contains_key(name)
    }

    pub(crate) fn defs_for_type(&self, ty: &Type) -> &[&'a Definition] {
        self.families
            .get(ty.name.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The record definition that produces the type named `name`, if any.
    pub(crate) fn record(&self, name: &str) -> Option<&'a Definition> {
        self.records.get(name).copied()
    }

    pub(crate) fn is_recursive(&self, def: &Definition) -> bool {
        self.recursive.contains(def.name.as_str())
    }

    /// `true` when storing `param` inline would give `def` an infinite size.
    /// Vectors already live on the heap and never need a box.
    pub(crate) fn needs_box(&self, def: &Definition, param: &Parameter) -> bool {
        if def.category != Category::Types || param.ty.is_vector() {
            return false;
        }
        param.ty.name == def.ty.name || self.reaches(&param.ty.name, &def.ty.name, &mut HashSet::new())
    }

    /// Whether any definition of type `from` refers (transitively) to `target`.
    fn reaches(&self, from: &str, target: &str, visited: &mut HashSet<String>) -> bool {
        if !visited.insert(from.to_owned()) {
            return false;
        }
        let defs: Vec<&Definition> = match (self.records.get(from), self.families.get(from)) {
            (Some(def), _) => vec![*def],
            (None, Some(members)) => members.clone(),
            (None, None) => return false,
        };
        defs.iter().any(|def| {
            def.params.iter().any(|p| {
                let next = p.ty.element().name.as_str();
                next == target || self.reaches(next, target, visited)
            })
        })
    }

    /// `Err(name)` with the first type name that is neither builtin nor defined.
    fn check_type(&self, ty: &Type) -> Result<(), String> {
        match (&ty.generic_arg, ty.name.as_str()) {
            (Some(arg), "Vector") => self.check_type(arg),
            (Some(_), _) | (None, "Vector") => Err(ty.to_string()),
            (None, name) => {
                let known = builtin_type(name).is_some()
                    || self.records.contains_key(name)
                    || self.families.contains_key(name);
                if known { Ok(()) } else { Err(name.to_owned()) }
            }
        }
    }
}

/// All members of a family must agree on how they are told apart, and their
/// tags must be unique.
fn check_family(name: &str, members: &[&Definition]) -> Result<(), String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let first = members.first().and_then(|d| d.tag.as_ref());

    for def in members {
        let Some(tag) = &def.tag else { continue };
        let same_style = match (first, tag) {
            (Some(Tag::Field { key: a, .. }), Tag::Field { key: b, .. }) => a == b,
            (Some(Tag::Presence { .. }), Tag::Presence { .. }) => true,
            _ => false,
        };
        if !same_style {
            return Err(format!("family `{name}` mixes discriminators (`{}` is {tag})", def.name));
        }
        if !seen.insert(tag.value()) {
            return Err(format!("family `{name}` uses tag `{}` twice", tag.value()));
        }
    }
    Ok(())
}
