//! Tool lifecycle events.
//!
//! The tool registry emits one event per execution: `tool.executed` on
//! success, `tool.failed` on any failure path. Delivery is best-effort; a
//! sink that errors or panics never changes the result handed back to the
//! caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::McpResult;

/// Method names used on the wire for lifecycle events
pub const TOOL_EXECUTED: &str = "tool.executed";
pub const TOOL_FAILED: &str = "tool.failed";

/// A tool lifecycle event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all_fields = "camelCase")]
pub enum ToolEvent {
    #[serde(rename = "tool.executed")]
    Executed {
        tool_name: String,
        arguments: Value,
        result: Value,
        execution_time_ms: u64,
        /// Unix milliseconds
        timestamp: u64,
    },
    #[serde(rename = "tool.failed")]
    Failed {
        tool_name: String,
        arguments: Value,
        error: String,
        execution_time_ms: u64,
        /// Unix milliseconds
        timestamp: u64,
    },
}

impl ToolEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            ToolEvent::Executed { .. } => TOOL_EXECUTED,
            ToolEvent::Failed { .. } => TOOL_FAILED,
        }
    }

    pub fn tool_name(&self) -> &str {
        match self {
            ToolEvent::Executed { tool_name, .. } => tool_name,
            ToolEvent::Failed { tool_name, .. } => tool_name,
        }
    }

    pub fn execution_time_ms(&self) -> u64 {
        match self {
            ToolEvent::Executed {
                execution_time_ms, ..
            } => *execution_time_ms,
            ToolEvent::Failed {
                execution_time_ms, ..
            } => *execution_time_ms,
        }
    }
}

/// Destination for tool lifecycle events
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Deliver one event. Failures are logged by the emitter and dropped.
    async fn emit(&self, event: ToolEvent) -> McpResult<()>;
}

/// Current time in Unix milliseconds
pub(crate) fn now_millis() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}
