use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::types::RequestId;

/// JSON-RPC error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonRpcErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    RateLimited,
    ServerError(i64), // -32099 to -32000
}

impl JsonRpcErrorCode {
    pub fn code(&self) -> i64 {
        match self {
            JsonRpcErrorCode::ParseError => crate::error_codes::PARSE_ERROR,
            JsonRpcErrorCode::InvalidRequest => crate::error_codes::INVALID_REQUEST,
            JsonRpcErrorCode::MethodNotFound => crate::error_codes::METHOD_NOT_FOUND,
            JsonRpcErrorCode::InvalidParams => crate::error_codes::INVALID_PARAMS,
            JsonRpcErrorCode::InternalError => crate::error_codes::INTERNAL_ERROR,
            JsonRpcErrorCode::RateLimited => crate::error_codes::RATE_LIMITED,
            JsonRpcErrorCode::ServerError(code) => *code,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            JsonRpcErrorCode::ParseError => "Parse error",
            JsonRpcErrorCode::InvalidRequest => "Invalid Request",
            JsonRpcErrorCode::MethodNotFound => "Method not found",
            JsonRpcErrorCode::InvalidParams => "Invalid params",
            JsonRpcErrorCode::InternalError => "Internal error",
            JsonRpcErrorCode::RateLimited => "Rate limit exceeded",
            JsonRpcErrorCode::ServerError(_) => "Server error",
        }
    }
}

impl fmt::Display for JsonRpcErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// JSON-RPC Error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcErrorObject {
    pub fn new(code: JsonRpcErrorCode, message: Option<String>, data: Option<Value>) -> Self {
        Self {
            code: code.code(),
            message: message.unwrap_or_else(|| code.message().to_string()),
            data,
        }
    }

    /// Build an error object from a raw numeric code, preserving it verbatim.
    /// Used for handler-supplied codes that are not part of the fixed taxonomy.
    pub fn from_code(code: i64, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            code,
            message: message.into(),
            data,
        }
    }

    pub fn parse_error(data: Option<Value>) -> Self {
        Self::new(JsonRpcErrorCode::ParseError, None, data)
    }

    pub fn invalid_request(message: &str) -> Self {
        Self::new(
            JsonRpcErrorCode::InvalidRequest,
            Some(message.to_string()),
            None,
        )
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            JsonRpcErrorCode::MethodNotFound,
            Some(format!("Method '{}' not found", method)),
            None,
        )
    }

    pub fn invalid_params(message: &str) -> Self {
        Self::new(
            JsonRpcErrorCode::InvalidParams,
            Some(message.to_string()),
            None,
        )
    }

    pub fn internal_error(message: Option<String>) -> Self {
        Self::new(JsonRpcErrorCode::InternalError, message, None)
    }

    pub fn rate_limited(method: &str) -> Self {
        Self::new(
            JsonRpcErrorCode::RateLimited,
            Some(format!("Rate limit exceeded for method '{}'", method)),
            None,
        )
    }

    pub fn server_error(code: i64, message: &str, data: Option<Value>) -> Self {
        assert!(
            (crate::error_codes::SERVER_ERROR_START..=crate::error_codes::SERVER_ERROR_END)
                .contains(&code),
            "Server error code must be in range -32099 to -32000"
        );
        Self::new(
            JsonRpcErrorCode::ServerError(code),
            Some(message.to_string()),
            data,
        )
    }
}

/// JSON-RPC Error response
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("JSON-RPC Error {}: {}", .error.code, .error.message)]
pub struct JsonRpcError {
    #[serde(rename = "jsonrpc")]
    pub version: String,
    pub id: RequestId,
    pub error: JsonRpcErrorObject,
}

impl JsonRpcError {
    pub fn new(id: RequestId, error: JsonRpcErrorObject) -> Self {
        Self {
            version: crate::JSONRPC_VERSION.to_string(),
            id,
            error,
        }
    }

    pub fn parse_error() -> Self {
        Self::new(RequestId::sentinel(), JsonRpcErrorObject::parse_error(None))
    }

    pub fn invalid_request(id: RequestId, message: &str) -> Self {
        Self::new(id, JsonRpcErrorObject::invalid_request(message))
    }

    pub fn method_not_found(id: RequestId, method: &str) -> Self {
        Self::new(id, JsonRpcErrorObject::method_not_found(method))
    }

    pub fn invalid_params(id: RequestId, message: &str) -> Self {
        Self::new(id, JsonRpcErrorObject::invalid_params(message))
    }

    pub fn internal_error(id: RequestId, message: Option<String>) -> Self {
        Self::new(id, JsonRpcErrorObject::internal_error(message))
    }

    pub fn rate_limited(id: RequestId, method: &str) -> Self {
        Self::new(id, JsonRpcErrorObject::rate_limited(method))
    }
}
