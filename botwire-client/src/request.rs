//! Encoding a method call, handing it to the transport, decoding the answer.

use std::num::NonZeroU32;

use botwire_types::serialize::strip_absent;
use botwire_types::{Deserializable, RemoteCall};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::errors::InvocationError;
use crate::transport::Transport;
use crate::AbsentFields;

/// The wire payload of `req` under the given absent-field policy.
pub fn payload<R: RemoteCall>(req: &R, absent: AbsentFields) -> Map<String, Value> {
    let mut map = req.to_map();
    if absent == AbsentFields::Omit {
        strip_absent(&mut map);
    }
    map
}

pub(crate) fn dispatch<T, R>(
    transport: &T,
    req: &R,
    attempts: NonZeroU32,
    absent: AbsentFields,
) -> Result<R::Return, InvocationError>
where
    T: Transport + ?Sized,
    R: RemoteCall,
{
    let payload = payload(req, absent);
    debug!(method = R::METHOD, attempts = attempts.get(), fields = payload.len(), "invoking");

    let response = transport.call(R::METHOD, &payload, attempts).map_err(|e| {
        warn!(method = R::METHOD, error = %e, "transport failed");
        InvocationError::Transport(e)
    })?;

    R::Return::deserialize(&response).map_err(|e| {
        warn!(method = R::METHOD, error = %e, "unexpected response");
        InvocationError::Deserialize(e)
    })
}

/// Send any method straight through a transport, without a [`crate::Client`].
///
/// ```rust,no_run
/// # fn demo(transport: &impl botwire_client::Transport) -> Result<(), botwire_client::InvocationError> {
/// use std::num::NonZeroU32;
/// use botwire_client::SendRequest;
/// use botwire_types::functions;
///
/// let req = functions::GetCustomEmojiStickers { custom_emoji_ids: vec!["5368324170671202286".into()] };
/// let stickers = req.send_request(transport, NonZeroU32::new(3).unwrap())?;
/// # Ok(()) }
/// ```
pub trait SendRequest: RemoteCall + Sized {
    /// Encode `self` (omitting absent fields), let `transport` perform the
    /// call with up to `attempts` tries, and decode the result.
    ///
    /// A list result fails as a whole when any element fails to decode.
    fn send_request<T: Transport + ?Sized>(
        &self,
        transport: &T,
        attempts: NonZeroU32,
    ) -> Result<Self::Return, InvocationError> {
        dispatch(transport, self, attempts, AbsentFields::Omit)
    }
}

impl<R: RemoteCall> SendRequest for R {}
