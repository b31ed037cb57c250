//! # botwire-client
//!
//! Typed request dispatch for the Telegram Bot API.
//!
//! A [`Client`] encodes a method from [`botwire_types::functions`], hands the
//! payload to a pluggable [`Transport`] together with the caller's attempt
//! count, and decodes the answer into the method's return type. The HTTP
//! call itself, retries and backoff belong to the transport.
//!
//! ## Features
//! - Blocking [`Client`] and a tokio-backed [`AsyncClient`]
//! - [`SendRequest::send_request`] on every method, no client needed
//! - Absent optional fields omitted or sent as `null` ([`AbsentFields`])
//! - [`open_envelope`] for transports that receive raw API responses
//!
//! ```rust,no_run
//! # fn demo(transport: impl botwire_client::Transport) -> Result<(), botwire_client::InvocationError> {
//! use botwire_client::Client;
//! use botwire_types::{enums, functions};
//!
//! let client = Client::new(transport);
//! let admins = client.invoke(&functions::GetChatAdministrators { chat_id: (-1001234567890i64).into() })?;
//! for admin in admins {
//!     if let enums::ChatMember::Owner(owner) = admin {
//!         println!("owner: {}", owner.user.first_name);
//!     }
//! }
//! # Ok(()) }
//! ```

#![deny(unsafe_code)]

mod errors;
mod request;
mod transport;

pub use errors::{ApiError, InvocationError, TransportError};
pub use request::{payload, SendRequest};
pub use transport::{open_envelope, Transport};

use std::num::NonZeroU32;
use std::sync::Arc;

use botwire_types::RemoteCall;
use tracing::warn;

// ─── Config ───────────────────────────────────────────────────────────────────

/// What to do with optional fields that hold no value when encoding a
/// request payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AbsentFields {
    /// Leave the key out of the payload.
    #[default]
    Omit,
    /// Send the key with an explicit `null`.
    Null,
}

/// Configuration for a [`Client`].
#[derive(Clone, Debug)]
pub struct Config {
    /// Attempts handed to the transport by [`Client::invoke`] (default: 1).
    pub attempts: NonZeroU32,
    /// Encoding of absent optional fields (default: [`AbsentFields::Omit`]).
    pub absent_fields: AbsentFields,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            attempts:      NonZeroU32::MIN,
            absent_fields: AbsentFields::Omit,
        }
    }
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// Sends typed Bot API requests through a [`Transport`].
pub struct Client<T> {
    transport: T,
    config:    Config,
}

impl<T: Transport> Client<T> {
    /// A client with the default [`Config`].
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, Config::default())
    }

    pub fn with_config(transport: T, config: Config) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Invoke a method with the configured number of attempts.
    pub fn invoke<R: RemoteCall>(&self, req: &R) -> Result<R::Return, InvocationError> {
        self.invoke_with_attempts(req, self.config.attempts)
    }

    /// Invoke a method, overriding the number of attempts for this call only.
    pub fn invoke_with_attempts<R: RemoteCall>(
        &self,
        req: &R,
        attempts: NonZeroU32,
    ) -> Result<R::Return, InvocationError> {
        request::dispatch(&self.transport, req, attempts, self.config.absent_fields)
    }
}

// ─── AsyncClient ──────────────────────────────────────────────────────────────

/// Async front-end for a [`Client`].
///
/// Transports block, so every call runs on tokio's blocking pool and never
/// stalls a runtime worker. Cheap to clone; clones share the client.
pub struct AsyncClient<T> {
    inner: Arc<Client<T>>,
}

impl<T> Clone for AsyncClient<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T> From<Client<T>> for AsyncClient<T> {
    fn from(client: Client<T>) -> Self {
        Self { inner: Arc::new(client) }
    }
}

impl<T: Transport + Send + Sync + 'static> AsyncClient<T> {
    pub fn new(transport: T) -> Self {
        Client::new(transport).into()
    }

    pub fn client(&self) -> &Client<T> {
        &self.inner
    }

    /// Invoke a method with the configured number of attempts.
    pub async fn invoke<R>(&self, req: R) -> Result<R::Return, InvocationError>
    where
        R: RemoteCall + Send + 'static,
        R::Return: Send + 'static,
    {
        let attempts = self.inner.config.attempts;
        self.invoke_with_attempts(req, attempts).await
    }

    /// Invoke a method, overriding the number of attempts for this call only.
    pub async fn invoke_with_attempts<R>(
        &self,
        req: R,
        attempts: NonZeroU32,
    ) -> Result<R::Return, InvocationError>
    where
        R: RemoteCall + Send + 'static,
        R::Return: Send + 'static,
    {
        let client = Arc::clone(&self.inner);
        match tokio::task::spawn_blocking(move || client.invoke_with_attempts(&req, attempts)).await {
            Ok(result) => result,
            Err(e) => {
                warn!(method = R::METHOD, error = %e, "blocking task lost");
                Err(InvocationError::Dropped)
            }
        }
    }
}
