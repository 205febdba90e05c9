use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::JsonRpcError;
use crate::types::{JsonRpcVersion, RequestId};

/// Result data for a JSON-RPC response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseResult {
    /// Success result with data
    Success(Value),
    /// Null result (for void methods)
    Null,
}

impl ResponseResult {
    pub fn is_null(&self) -> bool {
        matches!(self, ResponseResult::Null)
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ResponseResult::Success(value) => Some(value),
            ResponseResult::Null => None,
        }
    }
}

impl From<Value> for ResponseResult {
    fn from(value: Value) -> Self {
        if value.is_null() {
            ResponseResult::Null
        } else {
            ResponseResult::Success(value)
        }
    }
}

impl From<()> for ResponseResult {
    fn from(_: ()) -> Self {
        ResponseResult::Null
    }
}

/// A successful JSON-RPC response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    pub id: RequestId,
    pub result: ResponseResult,
}

impl JsonRpcResponse {
    pub fn new(id: RequestId, result: ResponseResult) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            id,
            result,
        }
    }

    pub fn success(id: RequestId, result: Value) -> Self {
        Self::new(id, ResponseResult::Success(result))
    }

    pub fn null(id: RequestId) -> Self {
        Self::new(id, ResponseResult::Null)
    }
}

/// Union type that represents either a successful response or an error response.
/// Keeping the two variants as distinct structs means a response can never
/// carry both `result` and `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcMessage {
    /// Successful response with result field
    Response(JsonRpcResponse),
    /// Error response with error field
    Error(JsonRpcError),
}

impl JsonRpcMessage {
    /// Create a success message
    pub fn success(id: RequestId, result: Value) -> Self {
        Self::Response(JsonRpcResponse::success(id, result))
    }

    /// Create an error message
    pub fn error(error: JsonRpcError) -> Self {
        Self::Error(error)
    }

    /// Check if this is an error response
    pub fn is_error(&self) -> bool {
        matches!(self, JsonRpcMessage::Error(_))
    }

    /// Get the request ID from either response or error
    pub fn id(&self) -> &RequestId {
        match self {
            JsonRpcMessage::Response(resp) => &resp.id,
            JsonRpcMessage::Error(err) => &err.id,
        }
    }

    /// The success payload, if this is a success response
    pub fn result(&self) -> Option<&Value> {
        match self {
            JsonRpcMessage::Response(resp) => resp.result.as_value(),
            JsonRpcMessage::Error(_) => None,
        }
    }

    /// The error object, if this is an error response
    pub fn error_object(&self) -> Option<&crate::error::JsonRpcErrorObject> {
        match self {
            JsonRpcMessage::Response(_) => None,
            JsonRpcMessage::Error(err) => Some(&err.error),
        }
    }
}

impl From<JsonRpcResponse> for JsonRpcMessage {
    fn from(response: JsonRpcResponse) -> Self {
        Self::Response(response)
    }
}

impl From<JsonRpcError> for JsonRpcMessage {
    fn from(error: JsonRpcError) -> Self {
        Self::Error(error)
    }
}
