//! Generated Telegram Bot API types, methods and tagged unions.
//!
//! This crate is **auto-generated** from the schema in `schema/botapi.tl`.
//! To update for a new Bot API release, edit the schema and rebuild.
//!
//! # Overview
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`types`]     | Records and tagged-union members as `struct`s               |
//! | [`functions`] | API methods as `struct`s implementing [`RemoteCall`]        |
//! | [`enums`]     | Tagged unions as `enum`s implementing [`TaggedUnion`]       |
//!
//! Every value converts to and from an untyped JSON map: [`Serializable`]
//! produces a [`serde_json::Value`], [`Deserializable`] validates one and
//! builds the typed value, failing with a [`deserialize::Error`] that names
//! the offending field.
//!
//! # Decoding a tagged union
//!
//! ```rust,no_run
//! use botwire_types::{Deserializable, enums};
//!
//! let json = r#"{"type":"contact","id":"x1","phone_number":"+100","first_name":"Ann"}"#;
//! let result = enums::InlineQueryResult::from_json(json).unwrap();
//! assert!(matches!(result, enums::InlineQueryResult::Contact(_)));
//! ```
//!
//! # Building a request payload
//!
//! ```rust,no_run
//! use botwire_types::{functions, Record, RemoteCall};
//!
//! let req = functions::DeleteStickerFromSet { sticker: "CAADAgADQAAD".into() };
//! assert_eq!(functions::DeleteStickerFromSet::METHOD, "deleteStickerFromSet");
//! let payload = req.to_map();
//! // Hand `payload` to a transport…
//! ```

#![deny(unsafe_code)]
#![allow(clippy::large_enum_variant)]

pub mod deserialize;
pub mod kinds;
pub mod registry;
pub mod serialize;
mod generated;

pub use deserialize::Deserializable;
pub use generated::{API_VERSION, enums, functions, types};
pub use kinds::{MaskPoint, StickerType};
pub use registry::Registry;
pub use serialize::{Record, Serializable};

/// Unique identifier for the target chat or username of the target channel
/// (in the format `@channelusername`).
///
/// Encodes as a JSON integer or string respectively.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChatId {
    /// Numeric chat identifier.
    Id(i64),
    /// Public `@username` of a channel or supergroup.
    Username(String),
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self { Self::Id(id) }
}

impl From<String> for ChatId {
    fn from(username: String) -> Self { Self::Username(username) }
}

impl From<&str> for ChatId {
    fn from(username: &str) -> Self { Self::Username(username.to_owned()) }
}

// ─── Core traits ──────────────────────────────────────────────────────────────

/// Every member of a tagged union has a tag that selects it.
///
/// For field-discriminated families this is the value of the discriminator
/// field (`"contact"`, `"administrator"`). For presence-discriminated
/// families it is the name of the field whose presence identifies the member.
pub trait Identifiable {
    /// The tag as specified in the schema.
    const TAG: &'static str;
}

/// How the members of a tagged union are told apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Discriminator {
    /// A string field holds the member's tag, e.g. `"type"` or `"status"`.
    Field(&'static str),
    /// Each member is identified by the presence of a distinguishing field.
    /// Members are probed in schema order; the first match wins.
    Presence,
}

/// A family of record types that share a name and are told apart by a tag.
pub trait TaggedUnion: Sized + 'static {
    /// The family name, e.g. `"InlineQueryResult"`.
    const FAMILY: &'static str;
    /// How members of this family are identified.
    const DISCRIMINATOR: Discriminator;

    /// The tag → decoder table of this family. Built once, on first use.
    fn registry() -> &'static Registry<Self>;

    /// The tag of the member held by `self`.
    fn tag(&self) -> &'static str;
}

/// Marks a method type that can be sent to the Bot API.
///
/// `Return` is the type the API will respond with.
pub trait RemoteCall: Record {
    /// The method name as it appears in the request URL.
    const METHOD: &'static str;
    /// The deserialized response type.
    type Return: Deserializable;
}
