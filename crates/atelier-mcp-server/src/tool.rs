//! Tool trait and descriptor.
//!
//! A tool is a named, schema-validated, independently invocable unit of
//! work dispatched through `tools/call`. The registry validates arguments
//! against [`McpTool::input_schema`] before `call` ever runs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::McpResult;
use crate::schema::JsonSchema;
use crate::session::SessionContext;

/// A user-invocable tool
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Unique tool name
    fn name(&self) -> &str;

    /// Human-readable description for `tools/list`
    fn description(&self) -> Option<&str> {
        None
    }

    /// Argument schema; the registry enforces it before `call`
    fn input_schema(&self) -> &JsonSchema;

    /// Execute the tool. Arguments have already passed schema validation.
    async fn call(&self, args: Value, session: Option<SessionContext>) -> McpResult<Value>;
}

/// Wire descriptor for a registered tool, as returned by `tools/list`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub input_schema: Value,
}

impl ToolDescriptor {
    pub fn from_tool(tool: &dyn McpTool) -> Self {
        Self {
            name: tool.name().to_string(),
            description: tool.description().map(|d| d.to_string()),
            input_schema: tool.input_schema().describe(),
        }
    }
}
