//! The public code-generation API.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use botwire_parser::schema::{Category, Definition, Tag, Type};

use crate::grouper;
use crate::metadata::Metadata;
use crate::namegen as n;

// ─── Config ───────────────────────────────────────────────────────────────────

/// Generation configuration.
pub struct Config {
    /// Value of the generated `API_VERSION` constant.
    pub api_version: String,
    /// Also implement `Deserializable` for method types (useful for webhook
    /// servers and request proxies).
    pub deserializable_functions: bool,
    /// Derive `Debug` on all generated types.
    pub impl_debug: bool,
    /// Emit `From<types::Foo> for enums::Bar` impls.
    pub impl_from_type: bool,
    /// Emit `TryFrom<enums::Bar> for types::Foo` impls.
    pub impl_from_enum: bool,
    /// Implement `serde::{Serialize, Deserialize}` on all types, routed
    /// through the generated JSON codec.
    pub impl_serde: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_version: "0.0".to_owned(),
            deserializable_functions: false,
            impl_debug: true,
            impl_from_type: true,
            impl_from_enum: true,
            impl_serde: false,
        }
    }
}

// ─── Outputs ─────────────────────────────────────────────────────────────────

/// Writers for each generated Rust module.
pub struct Outputs<W: Write> {
    /// Receives the `API_VERSION` constant.
    pub common: W,
    /// Receives `pub mod types { … }` (records and family members as structs).
    pub types: W,
    /// Receives `pub mod functions { … }` (methods as structs).
    pub functions: W,
    /// Receives `pub mod enums { … }` (tagged-union families as enums).
    pub enums: W,
}

impl Outputs<File> {
    /// Convenience constructor that opens files inside `out_dir`.
    pub fn from_dir(out_dir: &str) -> io::Result<Self> {
        let p = Path::new(out_dir);
        Ok(Self {
            common:    File::create(p.join("generated_common.rs"))?,
            types:     File::create(p.join("generated_types.rs"))?,
            functions: File::create(p.join("generated_functions.rs"))?,
            enums:     File::create(p.join("generated_enums.rs"))?,
        })
    }
}

impl<W: Write> Outputs<W> {
    /// Flush all writers.
    pub fn flush(&mut self) -> io::Result<()> {
        self.common.flush()?;
        self.types.flush()?;
        self.functions.flush()?;
        self.enums.flush()
    }
}

// ─── Public API ───────────────────────────────────────────────────────────────

/// Generate Rust source code from a slice of parsed schema definitions.
///
/// The schema is validated first; an inconsistent schema (unknown type
/// references, duplicate tags, families mixing discriminators) is reported as
/// [`io::ErrorKind::InvalidData`] before anything is written.
///
/// Write results into `outputs`. Call `outputs.flush()` when done.
pub fn generate<W: Write>(
    defs: &[Definition],
    config: &Config,
    outputs: &mut Outputs<W>,
) -> io::Result<()> {
    let meta = Metadata::build(defs)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidData, msg))?;

    write_common(config, &mut outputs.common)?;
    write_types_mod(defs, config, &meta, &mut outputs.types)?;
    write_functions_mod(defs, config, &meta, &mut outputs.functions)?;
    write_enums_mod(defs, config, &meta, &mut outputs.enums)?;

    Ok(())
}

// ─── Common module ────────────────────────────────────────────────────────────

fn write_common<W: Write>(config: &Config, out: &mut W) -> io::Result<()> {
    writeln!(out, "// @generated — do not edit by hand")?;
    writeln!(out, "// Re-run the build script to regenerate.")?;
    writeln!(out)?;
    writeln!(out, "/// The Bot API version this code was generated from.")?;
    writeln!(out, "pub const API_VERSION: &str = {:?};", config.api_version)
}

// ─── Struct generation (types + functions) ────────────────────────────────────

fn write_mod_header<W: Write>(out: &mut W, name: &str) -> io::Result<()> {
    writeln!(out, "// @generated — do not edit by hand")?;
    writeln!(out, "pub mod {name} {{")?;
    writeln!(out, "    #[allow(unused_imports)]")?;
    writeln!(out, "    use crate::{{Deserializable, Identifiable, Record, Serializable, TaggedUnion}};")
}

fn write_types_mod<W: Write>(
    defs: &[Definition],
    config: &Config,
    meta: &Metadata,
    out: &mut W,
) -> io::Result<()> {
    write_mod_header(out, "types")?;

    let indent = "    ";
    for def in grouper::sorted(defs, Category::Types) {
        write_struct(out, indent, def, meta, config)?;
        if def.tag.is_some() {
            write_identifiable(out, indent, def)?;
        }
        write_record(out, indent, def)?;
        write_struct_deserializable(out, indent, def)?;
        if config.impl_serde {
            write_impl_serde(out, indent, &n::def_type_name(def), true)?;
        }
    }

    writeln!(out, "}}")
}

fn write_functions_mod<W: Write>(
    defs: &[Definition],
    config: &Config,
    meta: &Metadata,
    out: &mut W,
) -> io::Result<()> {
    write_mod_header(out, "functions")?;

    let indent = "    ";
    for def in grouper::sorted(defs, Category::Functions) {
        write_struct(out, indent, def, meta, config)?;
        write_record(out, indent, def)?;
        if config.deserializable_functions {
            write_struct_deserializable(out, indent, def)?;
        }
        write_remote_call(out, indent, def, meta)?;
        if config.impl_serde {
            write_impl_serde(out, indent, &n::def_type_name(def), config.deserializable_functions)?;
        }
    }

    writeln!(out, "}}")
}

// ─── Struct pieces ────────────────────────────────────────────────────────────

fn write_struct<W: Write>(
    out: &mut W,
    indent: &str,
    def: &Definition,
    meta: &Metadata,
    config: &Config,
) -> io::Result<()> {
    let name = n::def_type_name(def);
    let anchor = match def.category {
        Category::Types     => n::doc_anchor(&name),
        Category::Functions => n::doc_anchor(&def.name),
    };
    writeln!(
        out,
        "\n{indent}/// [`{name}`](https://core.telegram.org/bots/api#{anchor})\n\
         {indent}///\n\
         {indent}/// Generated from:\n\
         {indent}/// ```text\n\
         {indent}/// {def}\n\
         {indent}/// ```",
    )?;

    if config.impl_debug {
        writeln!(out, "{indent}#[derive(Debug)]")?;
    }
    writeln!(out, "{indent}#[derive(Clone, PartialEq)]")?;
    writeln!(out, "{indent}pub struct {name} {{")?;

    for param in &def.params {
        writeln!(
            out,
            "{indent}    pub {}: {},",
            n::param_attr_name(param),
            n::param_qual_name(def, param, meta),
        )?;
    }
    writeln!(out, "{indent}}}")
}

fn write_identifiable<W: Write>(out: &mut W, indent: &str, def: &Definition) -> io::Result<()> {
    let Some(tag) = &def.tag else { return Ok(()) };
    writeln!(
        out,
        "{indent}impl crate::Identifiable for {} {{\n\
         {indent}    const TAG: &'static str = {:?};\n\
         {indent}}}",
        n::def_type_name(def),
        tag.value(),
    )
}

fn write_record<W: Write>(out: &mut W, indent: &str, def: &Definition) -> io::Result<()> {
    let name = n::def_type_name(def);
    let field_tag = match &def.tag {
        Some(Tag::Field { key, .. }) => Some(key),
        _ => None,
    };
    let mutable = if def.params.is_empty() && field_tag.is_none() { "" } else { "mut " };

    writeln!(out, "{indent}impl crate::Record for {name} {{")?;
    writeln!(out, "{indent}    fn to_map(&self) -> serde_json::Map<String, serde_json::Value> {{")?;
    writeln!(out, "{indent}        let {mutable}map = serde_json::Map::new();")?;
    if let Some(key) = field_tag {
        writeln!(out, "{indent}        map.insert({key:?}.to_owned(), serde_json::Value::from(Self::TAG));")?;
    }
    for param in &def.params {
        writeln!(
            out,
            "{indent}        map.insert({:?}.to_owned(), self.{}.serialize());",
            param.name,
            n::param_attr_name(param),
        )?;
    }
    writeln!(out, "{indent}        map")?;
    writeln!(out, "{indent}    }}")?;
    writeln!(out, "{indent}}}")?;

    writeln!(out, "{indent}impl crate::Serializable for {name} {{")?;
    writeln!(out, "{indent}    fn serialize(&self) -> serde_json::Value {{")?;
    writeln!(out, "{indent}        serde_json::Value::Object(self.to_map())")?;
    writeln!(out, "{indent}    }}")?;
    writeln!(out, "{indent}}}")
}

fn write_struct_deserializable<W: Write>(
    out: &mut W,
    indent: &str,
    def: &Definition,
) -> io::Result<()> {
    let name = n::def_type_name(def);
    let field_tag = match &def.tag {
        Some(Tag::Field { key, .. }) => Some(key),
        _ => None,
    };

    // Empty, untagged structs never read from `fields`. Name it `_fields`
    // to suppress the unused-variable warning in the generated output.
    let fields_name = if def.params.is_empty() && field_tag.is_none() { "_fields" } else { "fields" };

    writeln!(out, "{indent}impl crate::Deserializable for {name} {{")?;
    writeln!(
        out,
        "{indent}    fn deserialize(value: &serde_json::Value) -> crate::deserialize::Result<Self> {{"
    )?;
    writeln!(
        out,
        "{indent}        let {fields_name} = crate::deserialize::Fields::new({name:?}, value)?;"
    )?;
    if let Some(key) = field_tag {
        writeln!(
            out,
            "{indent}        fields.expect_tag({:?}, {key:?}, Self::TAG)?;",
            n::type_name(&def.ty),
        )?;
    }

    writeln!(out, "{indent}        Ok(Self {{")?;
    for param in &def.params {
        let getter = if param.optional { "optional" } else { "required" };
        writeln!(
            out,
            "{indent}            {}: fields.{getter}({:?})?,",
            n::param_attr_name(param),
            param.name,
        )?;
    }
    writeln!(out, "{indent}        }})")?;
    writeln!(out, "{indent}    }}")?;
    writeln!(out, "{indent}}}")
}

fn write_remote_call<W: Write>(
    out: &mut W,
    indent: &str,
    def: &Definition,
    meta: &Metadata,
) -> io::Result<()> {
    writeln!(out, "{indent}impl crate::RemoteCall for {} {{", n::def_type_name(def))?;
    writeln!(out, "{indent}    const METHOD: &'static str = {:?};", def.name)?;
    writeln!(out, "{indent}    type Return = {};", n::type_qual_name(&def.ty, meta))?;
    writeln!(out, "{indent}}}")
}

fn write_impl_serde<W: Write>(
    out: &mut W,
    indent: &str,
    name: &str,
    deserialize: bool,
) -> io::Result<()> {
    writeln!(out, "{indent}impl serde::Serialize for {name} {{")?;
    writeln!(
        out,
        "{indent}    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {{"
    )?;
    writeln!(
        out,
        "{indent}        serde::Serialize::serialize(&crate::Serializable::serialize(self), serializer)"
    )?;
    writeln!(out, "{indent}    }}")?;
    writeln!(out, "{indent}}}")?;

    if !deserialize {
        return Ok(());
    }

    writeln!(out, "{indent}impl<'de> serde::Deserialize<'de> for {name} {{")?;
    writeln!(
        out,
        "{indent}    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {{"
    )?;
    writeln!(
        out,
        "{indent}        let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;"
    )?;
    writeln!(
        out,
        "{indent}        <Self as crate::Deserializable>::deserialize(&value).map_err(serde::de::Error::custom)"
    )?;
    writeln!(out, "{indent}    }}")?;
    writeln!(out, "{indent}}}")
}

// ─── Enum generation ──────────────────────────────────────────────────────────

fn write_enums_mod<W: Write>(
    defs: &[Definition],
    config: &Config,
    meta: &Metadata,
    out: &mut W,
) -> io::Result<()> {
    write_mod_header(out, "enums")?;

    let indent = "    ";
    for ty in grouper::family_types(defs) {
        write_enum(out, indent, ty, meta, config)?;
        write_tagged_union(out, indent, ty, meta)?;
        write_enum_record(out, indent, ty, meta)?;
        write_enum_deserializable(out, indent, ty)?;
        if config.impl_from_type {
            write_impl_from(out, indent, ty, meta)?;
        }
        if config.impl_from_enum {
            write_impl_try_from(out, indent, ty, meta)?;
        }
        if config.impl_serde {
            write_impl_serde(out, indent, &n::type_name(ty), true)?;
        }
    }

    writeln!(out, "}}")
}

fn write_enum<W: Write>(
    out: &mut W,
    indent: &str,
    ty: &Type,
    meta: &Metadata,
    config: &Config,
) -> io::Result<()> {
    let name = n::type_name(ty);
    writeln!(
        out,
        "\n{indent}/// [`{name}`](https://core.telegram.org/bots/api#{})",
        n::doc_anchor(&name),
    )?;
    if config.impl_debug {
        writeln!(out, "{indent}#[derive(Debug)]")?;
    }
    writeln!(out, "{indent}#[derive(Clone, PartialEq)]")?;
    writeln!(out, "{indent}pub enum {name} {{")?;

    for def in meta.defs_for_type(ty) {
        let variant = n::def_variant_name(def);
        if def.params.is_empty() {
            writeln!(out, "{indent}    {variant},")?;
        } else if meta.is_recursive(def) {
            writeln!(out, "{indent}    {variant}(Box<{}>),", n::def_qual_name(def))?;
        } else {
            writeln!(out, "{indent}    {variant}({}),", n::def_qual_name(def))?;
        }
    }

    writeln!(out, "{indent}}}")
}

fn write_tagged_union<W: Write>(
    out: &mut W,
    indent: &str,
    ty: &Type,
    meta: &Metadata,
) -> io::Result<()> {
    let name = n::type_name(ty);
    let members = meta.defs_for_type(ty);
    let discriminator = match members.first().and_then(|d| d.tag.as_ref()) {
        Some(Tag::Field { key, .. }) => format!("crate::Discriminator::Field({key:?})"),
        _ => "crate::Discriminator::Presence".to_owned(),
    };

    writeln!(out, "{indent}impl crate::TaggedUnion for {name} {{")?;
    writeln!(out, "{indent}    const FAMILY: &'static str = {name:?};")?;
    writeln!(out, "{indent}    const DISCRIMINATOR: crate::Discriminator = {discriminator};")?;

    // Registry: built once, on first decode, then only read.
    writeln!(out, "{indent}    fn registry() -> &'static crate::Registry<Self> {{")?;
    writeln!(
        out,
        "{indent}        static REGISTRY: std::sync::LazyLock<crate::Registry<{name}>> = std::sync::LazyLock::new(|| {{"
    )?;
    writeln!(out, "{indent}            crate::Registry::<{name}>::new()")?;
    for def in members {
        let variant = n::def_variant_name(def);
        let qual    = n::def_qual_name(def);
        writeln!(out, "{indent}                .register({qual}::TAG, |v| {{")?;
        if def.params.is_empty() {
            writeln!(out, "{indent}                    {qual}::deserialize(v)?;")?;
            writeln!(out, "{indent}                    Ok({name}::{variant})")?;
        } else if meta.is_recursive(def) {
            writeln!(out, "{indent}                    Ok({name}::{variant}(Box::new({qual}::deserialize(v)?)))")?;
        } else {
            writeln!(out, "{indent}                    Ok({name}::{variant}({qual}::deserialize(v)?))")?;
        }
        writeln!(out, "{indent}                }})")?;
    }
    writeln!(out, "{indent}        }});")?;
    writeln!(out, "{indent}        &REGISTRY")?;
    writeln!(out, "{indent}    }}")?;

    writeln!(out, "{indent}    fn tag(&self) -> &'static str {{")?;
    writeln!(out, "{indent}        match self {{")?;
    for def in members {
        let variant = n::def_variant_name(def);
        let bind = if def.params.is_empty() { "" } else { "(_)" };
        writeln!(out, "{indent}            Self::{variant}{bind} => {}::TAG,", n::def_qual_name(def))?;
    }
    writeln!(out, "{indent}        }}")?;
    writeln!(out, "{indent}    }}")?;
    writeln!(out, "{indent}}}")
}

fn write_enum_record<W: Write>(
    out: &mut W,
    indent: &str,
    ty: &Type,
    meta: &Metadata,
) -> io::Result<()> {
    let name = n::type_name(ty);

    writeln!(out, "{indent}impl crate::Record for {name} {{")?;
    writeln!(out, "{indent}    fn to_map(&self) -> serde_json::Map<String, serde_json::Value> {{")?;
    writeln!(out, "{indent}        match self {{")?;
    for def in meta.defs_for_type(ty) {
        let variant = n::def_variant_name(def);
        if def.params.is_empty() {
            writeln!(
                out,
                "{indent}            Self::{variant} => crate::Record::to_map(&{} {{}}),",
                n::def_qual_name(def),
            )?;
        } else {
            writeln!(out, "{indent}            Self::{variant}(x) => x.to_map(),")?;
        }
    }
    writeln!(out, "{indent}        }}")?;
    writeln!(out, "{indent}    }}")?;
    writeln!(out, "{indent}}}")?;

    writeln!(out, "{indent}impl crate::Serializable for {name} {{")?;
    writeln!(out, "{indent}    fn serialize(&self) -> serde_json::Value {{")?;
    writeln!(out, "{indent}        serde_json::Value::Object(self.to_map())")?;
    writeln!(out, "{indent}    }}")?;
    writeln!(out, "{indent}}}")
}

fn write_enum_deserializable<W: Write>(out: &mut W, indent: &str, ty: &Type) -> io::Result<()> {
    writeln!(out, "{indent}impl crate::Deserializable for {} {{", n::type_name(ty))?;
    writeln!(
        out,
        "{indent}    fn deserialize(value: &serde_json::Value) -> crate::deserialize::Result<Self> {{"
    )?;
    writeln!(out, "{indent}        Self::registry().decode(value)")?;
    writeln!(out, "{indent}    }}")?;
    writeln!(out, "{indent}}}")
}

fn write_impl_from<W: Write>(
    out: &mut W,
    indent: &str,
    ty: &Type,
    meta: &Metadata,
) -> io::Result<()> {
    let enum_name = n::type_name(ty);
    for def in meta.defs_for_type(ty) {
        let qual    = n::def_qual_name(def);
        let variant = n::def_variant_name(def);

        writeln!(out, "{indent}impl From<{qual}> for {enum_name} {{")?;
        let underscore = if def.params.is_empty() { "_" } else { "" };
        writeln!(out, "{indent}    fn from({underscore}x: {qual}) -> Self {{")?;
        if def.params.is_empty() {
            writeln!(out, "{indent}        Self::{variant}")?;
        } else if meta.is_recursive(def) {
            writeln!(out, "{indent}        Self::{variant}(Box::new(x))")?;
        } else {
            writeln!(out, "{indent}        Self::{variant}(x)")?;
        }
        writeln!(out, "{indent}    }}")?;
        writeln!(out, "{indent}}}")?;
    }
    Ok(())
}

fn write_impl_try_from<W: Write>(
    out: &mut W,
    indent: &str,
    ty: &Type,
    meta: &Metadata,
) -> io::Result<()> {
    let enum_name = n::type_name(ty);
    for def in meta.defs_for_type(ty) {
        if def.params.is_empty() { continue; }
        let qual    = n::def_qual_name(def);
        let variant = n::def_variant_name(def);

        writeln!(out, "{indent}impl TryFrom<{enum_name}> for {qual} {{")?;
        writeln!(out, "{indent}    type Error = {enum_name};")?;
        writeln!(out, "{indent}    #[allow(unreachable_patterns)]")?;
        writeln!(out, "{indent}    fn try_from(v: {enum_name}) -> Result<Self, Self::Error> {{")?;
        writeln!(out, "{indent}        match v {{")?;
        if meta.is_recursive(def) {
            writeln!(out, "{indent}            {enum_name}::{variant}(x) => Ok(*x),")?;
        } else {
            writeln!(out, "{indent}            {enum_name}::{variant}(x) => Ok(x),")?;
        }
        writeln!(out, "{indent}            other => Err(other),")?;
        writeln!(out, "{indent}        }}")?;
        writeln!(out, "{indent}    }}")?;
        writeln!(out, "{indent}}}")?;
    }
    Ok(())
}
