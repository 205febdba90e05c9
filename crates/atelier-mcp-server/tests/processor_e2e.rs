//! End-to-end tests over the full pipeline: raw request value in, JSON-RPC
//! response out, with the tool registry wired in as the `tools/call`
//! handler the way a real server assembles it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use atelier_json_rpc::{error_codes, RequestId};
use atelier_mcp_server::{
    CallToolHandler, EventSink, JsonSchema, ListToolsHandler, McpError, McpHandler, McpResult,
    McpTool, PingHandler, RateLimitConfig, RequestProcessor, ServerConfig, SessionContext,
    ToolEvent, ToolRegistry,
};

struct EchoTool {
    schema: JsonSchema,
}

impl EchoTool {
    fn new() -> Self {
        Self {
            schema: JsonSchema::object()
                .with_properties(HashMap::from([(
                    "message".to_string(),
                    JsonSchema::string(),
                )]))
                .with_required(vec!["message".to_string()]),
        }
    }
}

#[async_trait]
impl McpTool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> Option<&str> {
        Some("Echoes a message back")
    }

    fn input_schema(&self) -> &JsonSchema {
        &self.schema
    }

    async fn call(&self, args: Value, _session: Option<SessionContext>) -> McpResult<Value> {
        Ok(json!({"echoed": args["message"]}))
    }
}

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<ToolEvent>>,
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn emit(&self, event: ToolEvent) -> McpResult<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// An external collaborator handler, registered into the core like the
/// real resource handlers are.
struct StaticResourcesHandler;

#[async_trait]
impl McpHandler for StaticResourcesHandler {
    async fn handle(
        &self,
        method: &str,
        params: Option<atelier_json_rpc::RequestParams>,
        _session: Option<SessionContext>,
    ) -> McpResult<Value> {
        match method {
            "resources/list" => Ok(json!({"resources": [{"uri": "workspace://default"}]})),
            "resources/read" => {
                let uri = params
                    .as_ref()
                    .and_then(|p| p.get("uri"))
                    .and_then(Value::as_str)
                    .ok_or_else(|| McpError::missing_param("uri"))?;
                if uri == "workspace://default" {
                    Ok(json!({"contents": [{"uri": uri, "text": "notes"}]}))
                } else {
                    Err(McpError::ResourceNotFound(uri.to_string()))
                }
            }
            other => Err(McpError::MethodNotFound(other.to_string())),
        }
    }

    fn supported_methods(&self) -> Vec<String> {
        vec!["resources/list".to_string(), "resources/read".to_string()]
    }
}

fn build_server(config: ServerConfig) -> (RequestProcessor, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let tools = Arc::new(ToolRegistry::new().with_event_sink(sink.clone()));
    tools.register(Arc::new(EchoTool::new()));

    let mut processor = RequestProcessor::new(config);
    processor.register_handler(Arc::new(PingHandler)).unwrap();
    processor
        .register_handler(Arc::new(ListToolsHandler::new(tools.clone())))
        .unwrap();
    processor
        .register_handler(Arc::new(CallToolHandler::new(tools)))
        .unwrap();
    processor
        .register_handler(Arc::new(StaticResourcesHandler))
        .unwrap();

    (processor, sink)
}

#[tokio::test]
async fn ping_round_trip() {
    let (processor, _) = build_server(ServerConfig::default());

    let response = processor
        .process_request(json!({"jsonrpc": "2.0", "id": 7, "method": "ping", "params": {}}))
        .await;

    assert_eq!(response.id(), &RequestId::Number(7));
    assert_eq!(response.result(), Some(&json!({})));
    assert!(response.error_object().is_none());
}

#[tokio::test]
async fn unknown_method_round_trip() {
    let (processor, _) = build_server(ServerConfig::default());

    let response = processor
        .process_request(json!({"jsonrpc": "2.0", "id": 1, "method": "nope"}))
        .await;

    let error = response.error_object().unwrap();
    assert_eq!(error.code, error_codes::METHOD_NOT_FOUND);
    assert_eq!(response.id(), &RequestId::Number(1));
}

#[tokio::test]
async fn tools_list_describes_registered_tools() {
    let (processor, _) = build_server(ServerConfig::default());

    let response = processor
        .process_request(json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}))
        .await;

    let result = response.result().unwrap();
    let tools = result["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], "echo");
    assert_eq!(tools[0]["description"], "Echoes a message back");
    assert_eq!(tools[0]["inputSchema"]["type"], "object");
}

#[tokio::test]
async fn tools_call_success_emits_executed_event() {
    let (processor, sink) = build_server(ServerConfig::default());

    let response = processor
        .process_request(json!({
            "jsonrpc": "2.0", "id": 3, "method": "tools/call",
            "params": {"name": "echo", "arguments": {"message": "hi"}}
        }))
        .await;

    assert_eq!(response.result(), Some(&json!({"echoed": "hi"})));

    let events = sink.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    match &events[0] {
        ToolEvent::Executed {
            tool_name,
            arguments,
            execution_time_ms,
            timestamp,
            ..
        } => {
            assert_eq!(tool_name, "echo");
            assert_eq!(arguments, &json!({"message": "hi"}));
            assert!(*execution_time_ms < 60_000);
            assert!(*timestamp > 0);
        }
        other => panic!("expected executed event, got {:?}", other),
    }
}

#[tokio::test]
async fn tools_call_invalid_arguments_emits_failed_event() {
    let (processor, sink) = build_server(ServerConfig::default());

    let response = processor
        .process_request(json!({
            "jsonrpc": "2.0", "id": 4, "method": "tools/call",
            "params": {"name": "echo", "arguments": {"message": 12}}
        }))
        .await;

    let error = response.error_object().unwrap();
    assert_eq!(error.code, error_codes::INVALID_PARAMS);
    assert!(error.message.contains("Invalid arguments"));

    let events = sink.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], ToolEvent::Failed { .. }));
}

#[tokio::test]
async fn tools_call_unknown_tool_names_it() {
    let (processor, sink) = build_server(ServerConfig::default());

    let response = processor
        .process_request(json!({
            "jsonrpc": "2.0", "id": 5, "method": "tools/call",
            "params": {"name": "shears"}
        }))
        .await;

    let error = response.error_object().unwrap();
    assert!(error.message.contains("shears"));
    assert_eq!(sink.events.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn resources_round_trip_through_external_handler() {
    let (processor, _) = build_server(ServerConfig::default());

    let listed = processor
        .process_request(json!({"jsonrpc": "2.0", "id": 6, "method": "resources/list"}))
        .await;
    assert!(listed.result().unwrap()["resources"].is_array());

    let read = processor
        .process_request(json!({
            "jsonrpc": "2.0", "id": 7, "method": "resources/read",
            "params": {"uri": "workspace://default"}
        }))
        .await;
    assert_eq!(
        read.result().unwrap()["contents"][0]["text"],
        json!("notes")
    );

    let missing = processor
        .process_request(json!({
            "jsonrpc": "2.0", "id": 8, "method": "resources/read",
            "params": {"uri": "workspace://absent"}
        }))
        .await;
    assert!(missing.is_error());
}

#[tokio::test]
async fn rate_limit_toggle_is_clean() {
    let limited = ServerConfig {
        rate_limiting: RateLimitConfig {
            enabled: true,
            max_requests_per_minute: 1,
        },
        ..ServerConfig::default()
    };
    let (processor, _) = build_server(limited);

    let first = processor
        .process_request(json!({"jsonrpc": "2.0", "id": 1, "method": "ping"}))
        .await;
    assert!(!first.is_error());

    let second = processor
        .process_request(json!({"jsonrpc": "2.0", "id": 2, "method": "ping"}))
        .await;
    assert_eq!(
        second.error_object().unwrap().code,
        error_codes::RATE_LIMITED
    );

    // A processor with limiting disabled never produces RATE_LIMITED
    let (unlimited, _) = build_server(ServerConfig::default());
    for i in 0..50 {
        let response = unlimited
            .process_request(json!({"jsonrpc": "2.0", "id": i, "method": "ping"}))
            .await;
        assert!(!response.is_error());
    }
}

#[tokio::test]
async fn request_logging_toggle_does_not_change_responses() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();

    let (logging, _) = build_server(ServerConfig::default());
    let (silent, _) = build_server(ServerConfig {
        log_requests: false,
        ..ServerConfig::default()
    });

    for raw in [
        json!({"jsonrpc": "2.0", "id": 1, "method": "ping", "params": {}}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "nope"}),
        json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call",
               "params": {"name": "echo", "arguments": {"message": "hi"}}}),
        json!({"id": 4, "method": "ping"}),
    ] {
        let logged = logging.process_request(raw.clone()).await;
        let unlogged = silent.process_request(raw).await;
        assert_eq!(
            serde_json::to_value(&logged).unwrap(),
            serde_json::to_value(&unlogged).unwrap()
        );
    }
}

#[tokio::test]
async fn malformed_envelopes_use_best_known_id() {
    let (processor, _) = build_server(ServerConfig::default());

    // Id recoverable: error response correlates with it
    let with_id = processor
        .process_request(json!({"id": 9, "method": "ping"}))
        .await;
    assert_eq!(
        with_id.error_object().unwrap().code,
        error_codes::INVALID_REQUEST
    );
    assert_eq!(with_id.id(), &RequestId::Number(9));

    // Id unrecoverable: sentinel
    let no_id = processor.process_request(json!(null)).await;
    assert_eq!(no_id.id(), &RequestId::sentinel());
}
