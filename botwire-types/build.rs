//! Build script: parse the Bot API schema and generate Rust source code.
//!
//! Updating to a newer Bot API release means editing `schema/botapi.tl` and
//! bumping its `// VERSION` header; everything else follows.

use std::env;
use std::fs;
use std::io;

use botwire_gen::{Config, Outputs, generate};
use botwire_parser::{parse_schema, schema_version};

const SCHEMA: &str = "schema/botapi.tl";

fn main() -> io::Result<()> {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");

    let content = fs::read_to_string(SCHEMA)
        .unwrap_or_else(|e| panic!("Cannot read {SCHEMA}: {e}"));

    // Cargo rebuild trigger
    println!("cargo:rerun-if-changed={SCHEMA}");

    let version = schema_version(&content).unwrap_or("0.0").to_owned();

    // ── Parse ───────────────────────────────────────────────────────────────
    let defs = parse_schema(&content).map_err(|errors| {
        let report: Vec<String> = errors.iter().map(|e| format!("{SCHEMA}: {e}")).collect();
        io::Error::new(io::ErrorKind::InvalidData, report.join("\n"))
    })?;

    // ── Build config from features ──────────────────────────────────────────
    let config = Config {
        api_version:              version,
        deserializable_functions: cfg!(feature = "deserializable-functions"),
        impl_debug:               cfg!(feature = "impl-debug"),
        impl_from_type:           cfg!(feature = "impl-from-type"),
        impl_from_enum:           cfg!(feature = "impl-from-enum"),
        impl_serde:               cfg!(feature = "impl-serde"),
    };

    // ── Generate code ───────────────────────────────────────────────────────
    let mut outputs = Outputs::from_dir(&out_dir)?;
    generate(&defs, &config, &mut outputs)?;
    outputs.flush()
}
