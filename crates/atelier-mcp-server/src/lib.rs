//! # Atelier MCP Server Core
//!
//! The protocol dispatch and tool-execution pipeline behind the atelier
//! workspace server. One request flows one direction:
//!
//! ```text
//! raw value → envelope validation → rate limit → method whitelist
//!           → handler lookup → params validation → handler execution
//!           → response
//! ```
//!
//! Expected failures travel as [`McpResult`] values at every internal
//! boundary and become JSON-RPC error responses at the processor edge;
//! panics are reserved for wiring mistakes such as registering two tools
//! under one name.
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use atelier_mcp_server::{
//!     CallToolHandler, ListToolsHandler, PingHandler, RequestProcessor, ServerConfig,
//!     ToolRegistry,
//! };
//!
//! # async fn run() {
//! let tools = Arc::new(ToolRegistry::new());
//! let mut processor = RequestProcessor::new(ServerConfig::default());
//! processor.register_handler(Arc::new(PingHandler)).unwrap();
//! processor
//!     .register_handler(Arc::new(ListToolsHandler::new(tools.clone())))
//!     .unwrap();
//! processor
//!     .register_handler(Arc::new(CallToolHandler::new(tools)))
//!     .unwrap();
//!
//! let raw = serde_json::json!({"jsonrpc": "2.0", "id": 1, "method": "ping", "params": {}});
//! let response = processor.process_request(raw).await;
//! assert!(!response.is_error());
//! # }
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod handler;
pub mod handlers;
pub mod processor;
pub mod rate_limit;
pub mod result;
pub mod schema;
pub mod session;
pub mod tool;
pub mod tool_registry;
pub mod validation;

pub use config::{RateLimitConfig, ServerConfig};
pub use error::{McpError, McpResult};
pub use events::{EventSink, ToolEvent, TOOL_EXECUTED, TOOL_FAILED};
pub use handler::{HandlerRegistry, McpHandler};
pub use handlers::{CallToolHandler, ListToolsHandler, PingHandler};
pub use processor::RequestProcessor;
pub use rate_limit::RateLimiter;
pub use result::{collect_results, partition_results};
pub use schema::JsonSchema;
pub use session::SessionContext;
pub use tool::{McpTool, ToolDescriptor};
pub use tool_registry::ToolRegistry;

// Re-export the envelope layer for downstream transports
pub use atelier_json_rpc;
