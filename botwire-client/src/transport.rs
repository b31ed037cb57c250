//! The seam between the request layer and whatever performs the HTTP call.

use std::num::NonZeroU32;
use std::sync::Arc;

use botwire_types::Deserializable;
use botwire_types::deserialize::{self, Fields};
use serde_json::{Map, Value};

use crate::errors::{ApiError, TransportError};

/// Performs one Bot API method call.
///
/// The request layer hands over the method name, the encoded payload and the
/// number of attempts the caller allows. Retrying, backoff and rate limiting
/// are entirely the transport's business; the request layer never retries on
/// its own. On success the transport returns the unwrapped `result` value
/// (see [`open_envelope`]).
pub trait Transport {
    fn call(
        &self,
        method: &str,
        payload: &Map<String, Value>,
        attempts: NonZeroU32,
    ) -> Result<Value, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn call(&self, method: &str, payload: &Map<String, Value>, attempts: NonZeroU32) -> Result<Value, TransportError> {
        (**self).call(method, payload, attempts)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn call(&self, method: &str, payload: &Map<String, Value>, attempts: NonZeroU32) -> Result<Value, TransportError> {
        (**self).call(method, payload, attempts)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn call(&self, method: &str, payload: &Map<String, Value>, attempts: NonZeroU32) -> Result<Value, TransportError> {
        (**self).call(method, payload, attempts)
    }
}

/// Unwrap a Bot API response envelope.
///
/// `{"ok": true, "result": …}` yields the result; `{"ok": false, …}` becomes
/// [`TransportError::Api`]. Anything else is reported as
/// [`TransportError::Other`].
pub fn open_envelope(mut response: Value) -> Result<Value, TransportError> {
    let ok: bool = Fields::new("Response", &response)
        .and_then(|fields| fields.required("ok"))
        .map_err(malformed)?;

    if !ok {
        let err = ApiError::deserialize(&response).map_err(malformed)?;
        return Err(err.into());
    }

    match response.get_mut("result") {
        Some(result) => Ok(result.take()),
        None => Err(malformed(deserialize::Error::MissingField { ty: "Response", field: "result" })),
    }
}

fn malformed(e: deserialize::Error) -> TransportError {
    TransportError::Other(Box::new(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_envelope_yields_result() {
        let result = open_envelope(json!({"ok": true, "result": [1, 2]})).unwrap();
        assert_eq!(result, json!([1, 2]));
    }

    #[test]
    fn error_envelope_becomes_api_error() {
        let err = open_envelope(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found",
        }))
        .unwrap_err();
        let TransportError::Api(api) = err else { panic!("expected an API error") };
        assert_eq!(api.code, 400);
        assert!(api.is("*chat not found"));
        assert_eq!(api.parameters, None);
    }

    #[test]
    fn migration_hint_is_kept() {
        let err = open_envelope(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: group chat was upgraded to a supergroup chat",
            "parameters": {"migrate_to_chat_id": -1001234567890i64},
        }))
        .unwrap_err();
        let TransportError::Api(api) = err else { panic!() };
        assert_eq!(api.migrate_to_chat_id(), Some(-1001234567890));
    }

    #[test]
    fn garbage_is_not_an_api_error() {
        assert!(matches!(open_envelope(json!([])), Err(TransportError::Other(_))));
        assert!(matches!(open_envelope(json!({"result": 1})), Err(TransportError::Other(_))));
        assert!(matches!(open_envelope(json!({"ok": true})), Err(TransportError::Other(_))));
    }
}
