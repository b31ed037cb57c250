//! # botwire — Telegram Bot API library
//!
//! `botwire` is a modular Rust library for the Telegram Bot API.
//! It consists of four focused sub-crates wired together here for convenience:
//!
//! | Sub-crate        | Role                                                     |
//! |------------------|----------------------------------------------------------|
//! | `botwire-parser` | Parse the `.tl`-style Bot API schema into an AST         |
//! | `botwire-gen`    | Generate Rust source from the AST (build-time)           |
//! | `botwire-types`  | Generated value types, methods & tagged unions           |
//! | `botwire-client` | Request dispatch over a pluggable transport              |
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use botwire::api::{enums, functions};
//! use botwire::{Client, Transport};
//!
//! fn admins(transport: impl Transport) -> Result<(), botwire::InvocationError> {
//!     let client = Client::new(transport);
//!     for member in client.invoke(&functions::GetChatAdministrators { chat_id: "@botwire".into() })? {
//!         if let enums::ChatMember::Administrator(admin) = member {
//!             println!("{} can_promote_members={}", admin.user.first_name, admin.can_promote_members);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Updating the Bot API version
//!
//! Edit `botwire-types/schema/botapi.tl`, bump its `// VERSION` header and
//! rebuild. Everything else regenerates automatically.

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Re-export of [`botwire_types`] — generated value types, methods and tagged unions.
pub use botwire_types as api;

/// Re-export of [`botwire_client`] — transport seam, clients and errors.
pub use botwire_client as client;

/// Re-export of [`botwire_parser`] (requires `feature = "parser"`).
#[cfg(feature = "parser")]
pub use botwire_parser as parser;

/// Re-export of [`botwire_gen`] (requires `feature = "codegen"`).
#[cfg(feature = "codegen")]
pub use botwire_gen as codegen;

// ─── Convenience re-exports ───────────────────────────────────────────────────

pub use botwire_types::{
    API_VERSION,
    ChatId,
    Deserializable,
    Identifiable,
    Record,
    RemoteCall,
    Serializable,
    TaggedUnion,
};

pub use botwire_client::{
    AbsentFields,
    ApiError,
    AsyncClient,
    Client,
    Config,
    InvocationError,
    SendRequest,
    Transport,
    TransportError,
};
