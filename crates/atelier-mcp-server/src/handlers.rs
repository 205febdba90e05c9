//! Built-in method handlers.
//!
//! `ping` is served directly; `tools/list` and `tools/call` delegate to a
//! shared [`ToolRegistry`], so the registry's tool-name dispatch mirrors
//! the processor's method-name dispatch one level down. Resource methods
//! stay external: collaborators implement [`McpHandler`] and register
//! themselves.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use atelier_json_rpc::request::RequestParams;

use crate::error::{McpError, McpResult};
use crate::handler::McpHandler;
use crate::session::SessionContext;
use crate::tool_registry::ToolRegistry;

/// Handler for the `ping` liveness method
pub struct PingHandler;

#[async_trait]
impl McpHandler for PingHandler {
    async fn handle(
        &self,
        _method: &str,
        _params: Option<RequestParams>,
        _session: Option<SessionContext>,
    ) -> McpResult<Value> {
        Ok(json!({}))
    }

    fn supported_methods(&self) -> Vec<String> {
        vec!["ping".to_string()]
    }
}

/// Handler for `tools/list` requests
pub struct ListToolsHandler {
    registry: Arc<ToolRegistry>,
}

impl ListToolsHandler {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl McpHandler for ListToolsHandler {
    async fn handle(
        &self,
        method: &str,
        _params: Option<RequestParams>,
        _session: Option<SessionContext>,
    ) -> McpResult<Value> {
        debug!("handling {} request", method);
        let tools = self.registry.list_tools();
        Ok(json!({ "tools": tools }))
    }

    fn supported_methods(&self) -> Vec<String> {
        vec!["tools/list".to_string()]
    }
}

/// Handler for `tools/call` requests
pub struct CallToolHandler {
    registry: Arc<ToolRegistry>,
}

impl CallToolHandler {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl McpHandler for CallToolHandler {
    async fn handle(
        &self,
        method: &str,
        params: Option<RequestParams>,
        session: Option<SessionContext>,
    ) -> McpResult<Value> {
        debug!("handling {} request", method);

        let params = params.ok_or_else(|| McpError::missing_param("name"))?;

        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| McpError::missing_param("name"))?
            .to_string();

        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

        self.registry.execute(&name, arguments, session).await
    }

    fn supported_methods(&self) -> Vec<String> {
        vec!["tools/call".to_string()]
    }
}
