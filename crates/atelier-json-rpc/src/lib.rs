//! # JSON-RPC 2.0 Envelope Layer
//!
//! Pure, transport-agnostic JSON-RPC 2.0 types for the atelier server.
//! This crate provides the request/response envelope, the error taxonomy,
//! and structural envelope validation without any transport-specific or
//! domain-specific code.
//!
//! ## Features
//! - Full JSON-RPC 2.0 envelope compliance
//! - Transport agnostic (works with HTTP, WebSocket, stdio, etc.)
//! - Responses carry exactly one of `result`/`error` by construction
//! - Structural validation of raw request values

pub mod error;
pub mod request;
pub mod response;
pub mod types;
pub mod validate;

// Re-export main types
pub use error::{JsonRpcError, JsonRpcErrorCode, JsonRpcErrorObject};
pub use request::{JsonRpcRequest, RequestParams};
pub use response::{JsonRpcMessage, JsonRpcResponse, ResponseResult};
pub use types::{JsonRpcVersion, RequestId};
pub use validate::validate_envelope;

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;

    // Server error range: -32099 to -32000
    pub const SERVER_ERROR_START: i64 = -32099;
    pub const SERVER_ERROR_END: i64 = -32000;

    /// Sliding-window quota exceeded for a method
    pub const RATE_LIMITED: i64 = -32005;
}
