//! Tag → decoder tables for tagged-union families.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde_json::Value;

use crate::deserialize::{Error, Fields, Result};
use crate::{Discriminator, TaggedUnion};

/// Decodes a full JSON object into one member of the family `T`.
pub type DecodeFn<T> = fn(&Value) -> Result<T>;

/// The set of members of the family `T`, keyed by tag.
///
/// Generated code builds one registry per family, once, and never mutates it
/// afterwards; lookups are plain reads and safe from any thread.
pub struct Registry<T> {
    decoders: HashMap<&'static str, DecodeFn<T>>,
    /// Registration order; presence families are probed in this order.
    order: Vec<&'static str>,
}

impl<T: TaggedUnion> Registry<T> {
    /// An empty registry.
    pub fn new() -> Self {
        Self { decoders: HashMap::new(), order: Vec::new() }
    }

    /// Add a member.
    ///
    /// # Panics
    ///
    /// If `tag` is already registered. Tags are unique within a family.
    pub fn register(mut self, tag: &'static str, decode: DecodeFn<T>) -> Self {
        match self.decoders.entry(tag) {
            Entry::Vacant(slot) => {
                slot.insert(decode);
                self.order.push(tag);
            }
            Entry::Occupied(_) => panic!("{}: tag `{tag}` registered twice", T::FAMILY),
        }
        self
    }

    /// Registered tags, in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    /// Number of registered members.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// `true` if no member has been registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Select the member `value` describes and decode it.
    pub fn decode(&self, value: &Value) -> Result<T> {
        let fields = Fields::new(T::FAMILY, value)?;
        match T::DISCRIMINATOR {
            Discriminator::Field(key) => {
                let tag: String = fields.required(key)?;
                match self.decoders.get(tag.as_str()) {
                    Some(decode) => decode(value),
                    None => Err(Error::UnrecognizedVariant { family: T::FAMILY, tag }),
                }
            }
            Discriminator::Presence => self
                .order
                .iter()
                .find(|tag| fields.contains(tag))
                .and_then(|tag| self.decoders.get(tag))
                .map_or(Err(Error::UnrecognizedShape { family: T::FAMILY }), |decode| decode(value)),
        }
    }
}

impl<T: TaggedUnion> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::LazyLock;

    #[derive(Debug, PartialEq)]
    enum Shape {
        Circle,
        Square,
    }

    impl TaggedUnion for Shape {
        const FAMILY: &'static str = "Shape";
        const DISCRIMINATOR: Discriminator = Discriminator::Field("kind");

        fn registry() -> &'static Registry<Self> {
            static REGISTRY: LazyLock<Registry<Shape>> = LazyLock::new(|| {
                Registry::new()
                    .register("circle", |_| Ok(Shape::Circle))
                    .register("square", |_| Ok(Shape::Square))
            });
            &REGISTRY
        }

        fn tag(&self) -> &'static str {
            match self {
                Self::Circle => "circle",
                Self::Square => "square",
            }
        }
    }

    #[test]
    fn decodes_by_field() {
        let registry = Shape::registry();
        assert_eq!(registry.decode(&json!({"kind": "square"})), Ok(Shape::Square));
        assert_eq!(registry.tags().collect::<Vec<_>>(), ["circle", "square"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    #[should_panic(expected = "Shape: tag `circle` registered twice")]
    fn duplicate_tag_is_rejected() {
        let _ = Registry::<Shape>::new()
            .register("circle", |_| Ok(Shape::Circle))
            .register("circle", |_| Ok(Shape::Square));
    }
}
