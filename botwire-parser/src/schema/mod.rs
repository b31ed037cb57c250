//! Rust types representing the Abstract Syntax Tree of a schema definition.

mod category;
mod definition;
mod parameter;
mod tag;
mod ty;

pub use category::Category;
pub use definition::Definition;
pub use parameter::Parameter;
pub use tag::Tag;
pub use ty::Type;
