//! Domain error type shared across the dispatch core.
//!
//! Every expected failure travels as an [`McpError`] inside a `Result`;
//! panics are reserved for programming errors such as duplicate tool
//! registration. The [`McpError::to_error_object`] mapping is the single
//! place where domain failures become JSON-RPC error objects.

use serde_json::Value;

use atelier_json_rpc::error::JsonRpcErrorObject;

/// Common result type for MCP operations
pub type McpResult<T> = Result<T, McpError>;

/// MCP-specific errors
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Handler already registered for method: {0}")]
    DuplicateMethod(String),

    #[error("Rate limit exceeded for method: {0}")]
    RateLimited(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter type for '{param}': expected {expected}, got {actual}")]
    InvalidParameterType {
        param: String,
        expected: String,
        actual: String,
    },

    #[error("Unknown tool: {0}")]
    ToolNotFound(String),

    #[error("Tool execution failed: {0}")]
    ToolExecutionError(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A failure raised by a handler with its own numeric code.
    /// The code and data pass through to the response verbatim.
    #[error("Handler error {code}: {message}")]
    Handler {
        code: i64,
        message: String,
        data: Option<Value>,
    },

    /// A handler failed without a recognizable protocol error
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl McpError {
    /// Create a missing parameter error
    pub fn missing_param(param: &str) -> Self {
        Self::MissingParameter(param.to_string())
    }

    /// Create an invalid parameter type error
    pub fn invalid_param_type(param: &str, expected: &str, actual: &str) -> Self {
        Self::InvalidParameterType {
            param: param.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a tool execution error
    pub fn tool_execution(message: &str) -> Self {
        Self::ToolExecutionError(message.to_string())
    }

    /// Create a validation error
    pub fn validation(message: &str) -> Self {
        Self::ValidationError(message.to_string())
    }

    /// Create a handler-supplied error with an explicit code
    pub fn handler(code: i64, message: impl Into<String>, data: Option<Value>) -> Self {
        Self::Handler {
            code,
            message: message.into(),
            data,
        }
    }

    /// Convert to a JsonRpcErrorObject for JSON-RPC 2.0 responses
    pub fn to_error_object(&self) -> JsonRpcErrorObject {
        match self {
            McpError::InvalidRequest(msg) => JsonRpcErrorObject::invalid_request(msg),

            McpError::MethodNotFound(method) => JsonRpcErrorObject::method_not_found(method),

            McpError::RateLimited(method) => JsonRpcErrorObject::rate_limited(method),

            // Parameter-related errors map to InvalidParams (-32602)
            McpError::InvalidParameters(msg) => JsonRpcErrorObject::invalid_params(msg),
            McpError::MissingParameter(param) => JsonRpcErrorObject::invalid_params(&format!(
                "Missing required parameter: {}",
                param
            )),
            McpError::InvalidParameterType {
                param,
                expected,
                actual,
            } => JsonRpcErrorObject::invalid_params(&format!(
                "Invalid parameter type for '{}': expected {}, got {}",
                param, expected, actual
            )),

            // Not found and execution errors map to server errors
            McpError::ToolNotFound(name) => {
                JsonRpcErrorObject::server_error(-32001, &format!("Unknown tool: {}", name), None)
            }
            McpError::ResourceNotFound(uri) => JsonRpcErrorObject::server_error(
                -32002,
                &format!("Resource not found: {}", uri),
                None,
            ),
            McpError::ToolExecutionError(msg) => JsonRpcErrorObject::server_error(
                -32010,
                &format!("Tool execution failed: {}", msg),
                None,
            ),
            McpError::ValidationError(msg) => JsonRpcErrorObject::server_error(
                -32020,
                &format!("Validation error: {}", msg),
                None,
            ),
            McpError::DuplicateMethod(method) => JsonRpcErrorObject::server_error(
                -32021,
                &format!("Handler already registered for method: {}", method),
                None,
            ),

            // Handler-supplied codes pass through verbatim
            McpError::Handler {
                code,
                message,
                data,
            } => JsonRpcErrorObject::from_code(*code, message.clone(), data.clone()),

            // Everything unrecognizable is an internal error
            McpError::Internal(msg) => JsonRpcErrorObject::internal_error(Some(msg.clone())),
            McpError::IoError(err) => {
                JsonRpcErrorObject::internal_error(Some(format!("IO error: {}", err)))
            }
            McpError::SerializationError(err) => {
                JsonRpcErrorObject::internal_error(Some(format!("Serialization error: {}", err)))
            }
        }
    }
}
