//! Build-time code generator that transforms a parsed Bot API schema into Rust source files.
//!
//! Intended to be used from a `build.rs` script.
//!
//! # Usage
//!
//! ```no_run
//! // build.rs
//! use botwire_gen::{Config, Outputs, generate};
//! use botwire_parser::parse_schema;
//! use std::fs;
//!
//! fn main() {
//!     let schema = fs::read_to_string("schema/botapi.tl").unwrap();
//!     let defs = parse_schema(&schema).expect("malformed schema");
//!
//!     let out = std::env::var("OUT_DIR").unwrap();
//!     let mut outputs = Outputs::from_dir(&out).unwrap();
//!     generate(&defs, &Config::default(), &mut outputs).unwrap();
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod grouper;
mod metadata;
mod namegen;
pub mod codegen;

pub use codegen::{generate, Config, Outputs};
