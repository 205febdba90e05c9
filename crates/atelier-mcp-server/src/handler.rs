//! Method handlers and the method-to-handler registry.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use atelier_json_rpc::request::RequestParams;

use crate::error::{McpError, McpResult};
use crate::session::SessionContext;

/// A unit of work registered under one or more protocol method names.
///
/// Handlers receive already-validated requests and return a domain result;
/// the processor converts both outcomes into JSON-RPC responses. A handler
/// that needs a non-standard error code on the wire returns
/// [`McpError::Handler`] and the code passes through verbatim.
#[async_trait]
pub trait McpHandler: Send + Sync {
    /// Handle a request for one of this handler's methods
    async fn handle(
        &self,
        method: &str,
        params: Option<RequestParams>,
        session: Option<SessionContext>,
    ) -> McpResult<Value>;

    /// The methods this handler serves
    fn supported_methods(&self) -> Vec<String>;
}

/// Maps a method name to exactly one handler.
///
/// The registry only answers presence/absence; turning a missing handler
/// into a METHOD_NOT_FOUND response is the processor's job.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn McpHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler under every method it supports.
    ///
    /// Registering a method that already has a handler fails fast and
    /// leaves the registry unchanged.
    pub fn register(&mut self, handler: Arc<dyn McpHandler>) -> McpResult<()> {
        let methods = handler.supported_methods();
        for method in &methods {
            if self.handlers.contains_key(method) {
                return Err(McpError::DuplicateMethod(method.clone()));
            }
        }
        for method in methods {
            self.handlers.insert(method, handler.clone());
        }
        Ok(())
    }

    /// Look up the handler for a method
    pub fn get(&self, method: &str) -> Option<Arc<dyn McpHandler>> {
        self.handlers.get(method).cloned()
    }

    /// Remove the handler for a method, returning it if present
    pub fn unregister(&mut self, method: &str) -> Option<Arc<dyn McpHandler>> {
        self.handlers.remove(method)
    }

    /// All registered method names
    pub fn methods(&self) -> Vec<String> {
        let mut methods: Vec<String> = self.handlers.keys().cloned().collect();
        methods.sort();
        methods
    }
}
