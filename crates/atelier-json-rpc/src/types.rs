use serde::{Deserialize, Serialize};
use std::fmt;

/// A JSON-RPC request identifier.
///
/// Per the JSON-RPC 2.0 specification an id is either a string or a number.
/// The sentinel id `0` is used in error responses when the incoming envelope
/// was too malformed for the real id to be recovered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    String(String),
}

impl RequestId {
    /// Fallback id used in error responses when the request id is unknown
    pub fn sentinel() -> Self {
        RequestId::Number(0)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::sentinel()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{}", n),
            RequestId::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        RequestId::Number(n)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        RequestId::String(s.to_string())
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        RequestId::String(s)
    }
}

/// The protocol version marker. Only `"2.0"` is valid; deserialization of
/// any other value fails, which is what makes a wrong `jsonrpc` field an
/// invalid envelope rather than a silently accepted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JsonRpcVersion {
    #[serde(rename = "2.0")]
    V2_0,
}

impl Default for JsonRpcVersion {
    fn default() -> Self {
        JsonRpcVersion::V2_0
    }
}

impl fmt::Display for JsonRpcVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "2.0")
    }
}
