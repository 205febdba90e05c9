//! The request lifecycle orchestrator.
//!
//! `process_request` walks one request through envelope validation, rate
//! limiting, method resolution, params validation and handler execution,
//! and always lands on exactly one response. Failures at any step skip the
//! remaining steps and become an error response carrying the best-known
//! request id; nothing escapes as a panic.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use serde_json::Value;
use tracing::{debug, error};

use atelier_json_rpc::{validate_envelope, JsonRpcError, JsonRpcMessage};

use crate::config::ServerConfig;
use crate::error::{McpError, McpResult};
use crate::handler::{HandlerRegistry, McpHandler};
use crate::rate_limit::RateLimiter;
use crate::session::SessionContext;
use crate::validation;

/// Orchestrates the per-request pipeline. Owns its registry and rate
/// limiter, so tests can construct isolated processors with no global
/// state to reset.
pub struct RequestProcessor {
    config: ServerConfig,
    registry: HandlerRegistry,
    rate_limiter: RateLimiter,
}

impl RequestProcessor {
    pub fn new(config: ServerConfig) -> Self {
        let rate_limiter = RateLimiter::new(config.rate_limiting.clone());
        Self {
            config,
            registry: HandlerRegistry::new(),
            rate_limiter,
        }
    }

    /// Register a handler for every method it supports, failing fast on a
    /// duplicate method name.
    pub fn register_handler(&mut self, handler: Arc<dyn McpHandler>) -> McpResult<()> {
        self.registry.register(handler)
    }

    /// Remove the handler for a method
    pub fn unregister_handler(&mut self, method: &str) {
        self.registry.unregister(method);
    }

    /// All registered methods
    pub fn registered_methods(&self) -> Vec<String> {
        self.registry.methods()
    }

    /// Process one raw request value into exactly one response.
    pub async fn process_request(&self, raw: Value) -> JsonRpcMessage {
        self.process_request_with_context(raw, None).await
    }

    /// Process one raw request value with an optional session context.
    pub async fn process_request_with_context(
        &self,
        raw: Value,
        session: Option<SessionContext>,
    ) -> JsonRpcMessage {
        let started = Instant::now();

        // 1. Envelope validation
        let request = match validate_envelope(&raw) {
            Ok(request) => request,
            Err(rpc_error) => {
                if self.config.log_requests {
                    debug!(code = rpc_error.error.code, "rejected malformed envelope");
                }
                return JsonRpcMessage::error(rpc_error);
            }
        };

        let id = request.id.clone();
        let method = request.method.clone();

        if self.config.log_requests {
            debug!(%method, %id, "request received");
        }

        // 2. Rate limit, before any handler work happens
        if self.config.rate_limiting.enabled {
            if let Err(limit_error) = self.rate_limiter.check_and_consume(&method) {
                return self.error_response(id, method, started, limit_error);
            }
        }

        // 3. Protocol whitelist
        if !validation::is_valid_method(&method) {
            return self.error_response(
                id,
                method.clone(),
                started,
                McpError::MethodNotFound(method),
            );
        }

        // 4. Registry lookup
        let handler = match self.registry.get(&method) {
            Some(handler) => handler,
            None => {
                return self.error_response(
                    id,
                    method.clone(),
                    started,
                    McpError::MethodNotFound(method),
                );
            }
        };

        // 5. Params validation
        if self.config.validate_requests {
            if let Err(params_error) = validation::validate_params(&method, request.params.as_ref())
            {
                return self.error_response(id, method, started, params_error);
            }
        }

        // 6. Handler invocation; a panicking handler becomes INTERNAL_ERROR
        let outcome = AssertUnwindSafe(handler.handle(&method, request.params, session))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(result)) => {
                if self.config.log_requests {
                    debug!(
                        %method,
                        %id,
                        duration_ms = started.elapsed().as_millis() as u64,
                        "request succeeded"
                    );
                }
                JsonRpcMessage::success(id, result)
            }
            Ok(Err(domain_error)) => self.error_response(id, method, started, domain_error),
            Err(_) => {
                error!(%method, %id, "handler panicked");
                self.error_response(
                    id,
                    method,
                    started,
                    McpError::Internal("handler panicked".to_string()),
                )
            }
        }
    }

    fn error_response(
        &self,
        id: atelier_json_rpc::RequestId,
        method: String,
        started: Instant,
        domain_error: McpError,
    ) -> JsonRpcMessage {
        if self.config.log_requests {
            debug!(
                %method,
                %id,
                duration_ms = started.elapsed().as_millis() as u64,
                error = %domain_error,
                "request failed"
            );
        }
        JsonRpcMessage::error(JsonRpcError::new(id, domain_error.to_error_object()))
    }
}
