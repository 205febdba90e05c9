//! Tool dispatch: lookup, argument validation, execution, lifecycle events.
//!
//! This mirrors the outer method dispatch at a finer grain: tool name to
//! tool handler instead of method name to method handler. Every failure
//! path returns an `Err` and emits `tool.failed`; a panicking tool body is
//! caught here and never crosses the registry boundary.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use futures::FutureExt;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{McpError, McpResult};
use crate::events::{now_millis, EventSink, ToolEvent};
use crate::session::SessionContext;
use crate::tool::{McpTool, ToolDescriptor};

/// Registry of user-invocable tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: Mutex<HashMap<String, Arc<dyn McpTool>>>,
    sink: Option<Arc<dyn EventSink>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Mutex::new(HashMap::new()),
            sink: None,
        }
    }

    /// Attach a lifecycle event sink
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Register a tool under its unique name.
    ///
    /// # Panics
    ///
    /// Panics if a tool with the same name is already registered. A
    /// duplicate name is a wiring mistake, not a runtime condition callers
    /// should recover from.
    pub fn register(&self, tool: Arc<dyn McpTool>) {
        let name = tool.name().to_string();
        let mut tools = self.tools.lock().expect("tool registry lock poisoned");
        if tools.contains_key(&name) {
            panic!("Tool '{}' is already registered", name);
        }
        debug!(tool = %name, "registering tool");
        tools.insert(name, tool);
    }

    /// Execute a registered tool by name.
    ///
    /// Arguments are validated against the tool's schema before the tool
    /// runs; a validation failure never invokes the tool. All failure paths
    /// emit `tool.failed`, success emits `tool.executed`. Event delivery
    /// never changes the returned result.
    pub async fn execute(
        &self,
        name: &str,
        args: Value,
        session: Option<SessionContext>,
    ) -> McpResult<Value> {
        let started = Instant::now();

        let tool = {
            let tools = self.tools.lock().expect("tool registry lock poisoned");
            tools.get(name).cloned()
        };

        let tool = match tool {
            Some(tool) => tool,
            None => {
                let error = McpError::ToolNotFound(name.to_string());
                self.emit_failed(name, &args, &error, started).await;
                return Err(error);
            }
        };

        if let Err(detail) = tool.input_schema().validate(&args) {
            let error = McpError::InvalidParameters(format!("Invalid arguments: {}", detail));
            self.emit_failed(name, &args, &error, started).await;
            return Err(error);
        }

        match AssertUnwindSafe(tool.call(args.clone(), session))
            .catch_unwind()
            .await
        {
            Ok(Ok(result)) => {
                self.emit(ToolEvent::Executed {
                    tool_name: name.to_string(),
                    arguments: args,
                    result: result.clone(),
                    execution_time_ms: started.elapsed().as_millis() as u64,
                    timestamp: now_millis(),
                })
                .await;
                Ok(result)
            }
            Ok(Err(error)) => {
                self.emit_failed(name, &args, &error, started).await;
                Err(error)
            }
            Err(panic) => {
                let error = McpError::ToolExecutionError(panic_message(panic));
                self.emit_failed(name, &args, &error, started).await;
                Err(error)
            }
        }
    }

    /// Descriptors for every registered tool, in stable name order
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        let tools = self.tools.lock().expect("tool registry lock poisoned");
        let mut descriptors: Vec<ToolDescriptor> = tools
            .values()
            .map(|tool| ToolDescriptor::from_tool(tool.as_ref()))
            .collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    /// Whether a tool is registered under `name`
    pub fn has_handler(&self, name: &str) -> bool {
        self.tools
            .lock()
            .expect("tool registry lock poisoned")
            .contains_key(name)
    }

    /// Names of all registered tools, in stable name order
    pub fn handler_names(&self) -> Vec<String> {
        let tools = self.tools.lock().expect("tool registry lock poisoned");
        let mut names: Vec<String> = tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// The tool registered under `name`, if any
    pub fn get_handler(&self, name: &str) -> Option<Arc<dyn McpTool>> {
        self.tools
            .lock()
            .expect("tool registry lock poisoned")
            .get(name)
            .cloned()
    }

    /// Remove all registered tools at once
    pub fn clear(&self) {
        self.tools
            .lock()
            .expect("tool registry lock poisoned")
            .clear();
    }

    async fn emit_failed(&self, name: &str, args: &Value, error: &McpError, started: Instant) {
        self.emit(ToolEvent::Failed {
            tool_name: name.to_string(),
            arguments: args.clone(),
            error: error.to_string(),
            execution_time_ms: started.elapsed().as_millis() as u64,
            timestamp: now_millis(),
        })
        .await;
    }

    /// Best-effort event delivery: sink errors and panics are logged and
    /// dropped so they cannot flip a successful execution into a failure.
    async fn emit(&self, event: ToolEvent) {
        let sink = match &self.sink {
            Some(sink) => sink.clone(),
            None => return,
        };
        let kind = event.kind();
        let tool = event.tool_name().to_string();
        match AssertUnwindSafe(sink.emit(event)).catch_unwind().await {
            Ok(Ok(())) => {}
            Ok(Err(error)) => {
                warn!(%tool, kind, %error, "event sink rejected tool event");
            }
            Err(_) => {
                warn!(%tool, kind, "event sink panicked delivering tool event");
            }
        }
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "tool panicked".to_string()
    }
}
