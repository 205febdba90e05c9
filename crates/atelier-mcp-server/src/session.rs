//! Minimal session context passed through to handlers and tools.
//!
//! The dispatch core does not manage session state; this is just the
//! identity and metadata a transport may attach to a request.

use serde_json::Value;
use std::collections::HashMap;

/// Session context for handler and tool execution
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Unique session identifier
    pub session_id: String,
    /// Session metadata supplied by the transport
    pub metadata: HashMap<String, Value>,
    /// Session timestamp (Unix milliseconds)
    pub timestamp: u64,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            metadata: HashMap::new(),
            timestamp: chrono::Utc::now().timestamp_millis() as u64,
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_ids_unique() {
        let a = SessionContext::new();
        let b = SessionContext::new();
        assert_ne!(a.session_id, b.session_id);
    }

    #[test]
    fn test_metadata_builder() {
        let session = SessionContext::new().with_metadata("client", json!("test-suite"));
        assert_eq!(session.metadata.get("client"), Some(&json!("test-suite")));
    }
}
