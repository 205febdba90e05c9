//! Structural validation of raw JSON-RPC envelopes.
//!
//! Validation is pure: it inspects a raw value and either produces a typed
//! [`JsonRpcRequest`] or an `INVALID_REQUEST` error carrying the best-known
//! request id. It never logs and never touches shared state.

use serde_json::Value;

use crate::error::JsonRpcError;
use crate::request::JsonRpcRequest;
use crate::types::RequestId;
use crate::JSONRPC_VERSION;

/// Recover the request id from a raw value, falling back to the sentinel.
///
/// Used so that error responses for malformed envelopes still correlate with
/// the caller's request whenever the id field happens to be intact.
pub fn recover_id(raw: &Value) -> RequestId {
    match raw.get("id") {
        Some(Value::Number(n)) => n
            .as_i64()
            .map(RequestId::Number)
            .unwrap_or_else(RequestId::sentinel),
        Some(Value::String(s)) => RequestId::String(s.clone()),
        _ => RequestId::sentinel(),
    }
}

/// Validate the outer JSON-RPC envelope of a raw request value.
///
/// Checks, in order: the value is an object, the `jsonrpc` version marker is
/// present and exactly `"2.0"`, `method` is a non-empty string, and `id` is a
/// string or a number. Domain-level params validation is a separate stage and
/// does not happen here.
pub fn validate_envelope(raw: &Value) -> Result<JsonRpcRequest, JsonRpcError> {
    let id = recover_id(raw);

    let object = match raw.as_object() {
        Some(object) => object,
        None => {
            return Err(JsonRpcError::invalid_request(
                id,
                "Request must be a JSON object",
            ));
        }
    };

    match object.get("jsonrpc").and_then(Value::as_str) {
        Some(JSONRPC_VERSION) => {}
        Some(other) => {
            return Err(JsonRpcError::invalid_request(
                id,
                &format!("Unsupported jsonrpc version '{}'", other),
            ));
        }
        None => {
            return Err(JsonRpcError::invalid_request(
                id,
                "Missing 'jsonrpc' version field",
            ));
        }
    }

    match object.get("method").and_then(Value::as_str) {
        Some(method) if !method.is_empty() => {}
        Some(_) => {
            return Err(JsonRpcError::invalid_request(
                id,
                "'method' must be a non-empty string",
            ));
        }
        None => {
            return Err(JsonRpcError::invalid_request(
                id,
                "Missing 'method' field",
            ));
        }
    }

    match object.get("id") {
        Some(Value::Number(_)) | Some(Value::String(_)) => {}
        Some(_) => {
            return Err(JsonRpcError::invalid_request(
                id,
                "'id' must be a string or a number",
            ));
        }
        None => {
            return Err(JsonRpcError::invalid_request(id, "Missing 'id' field"));
        }
    }

    serde_json::from_value(raw.clone())
        .map_err(|e| JsonRpcError::invalid_request(recover_id(raw), &e.to_string()))
}
