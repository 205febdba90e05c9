//! Protocol-level method whitelist and per-method params validation.
//!
//! Both stages are pure functions: they never log and never touch shared
//! state. Envelope validation is the job of `atelier_json_rpc::validate`;
//! this module covers what comes after it.

use serde_json::Value;

use atelier_json_rpc::request::RequestParams;

use crate::error::{McpError, McpResult};

/// Every method the protocol surface knows about. A method outside this
/// list is METHOD_NOT_FOUND before any registry lookup happens.
pub const KNOWN_METHODS: &[&str] = &[
    "initialize",
    "ping",
    "resources/list",
    "resources/read",
    "resources/instructions",
    "tools/list",
    "tools/call",
];

/// Whether a method is on the protocol whitelist
pub fn is_valid_method(method: &str) -> bool {
    KNOWN_METHODS.contains(&method)
}

/// Validate the shape of `params` for a whitelisted method.
///
/// The shape table is explicit and exhaustive over [`KNOWN_METHODS`]; a
/// method without entry here accepts anything, which keeps the table the
/// single place to consult when a method grows params.
pub fn validate_params(method: &str, params: Option<&RequestParams>) -> McpResult<()> {
    match method {
        "resources/read" => {
            let uri = params.and_then(|p| p.get("uri"));
            match uri {
                Some(Value::String(s)) if !s.is_empty() => Ok(()),
                Some(_) => Err(McpError::invalid_param_type("uri", "string", "other")),
                None => Err(McpError::missing_param("uri")),
            }
        }
        "tools/call" => {
            let name = params.and_then(|p| p.get("name"));
            match name {
                Some(Value::String(s)) if !s.is_empty() => {}
                Some(_) => return Err(McpError::invalid_param_type("name", "string", "other")),
                None => return Err(McpError::missing_param("name")),
            }
            match params.and_then(|p| p.get("arguments")) {
                None | Some(Value::Object(_)) => Ok(()),
                Some(_) => Err(McpError::invalid_param_type("arguments", "object", "other")),
            }
        }
        "resources/list" | "tools/list" => {
            match params.and_then(|p| p.get("cursor")) {
                None | Some(Value::String(_)) => Ok(()),
                Some(_) => Err(McpError::invalid_param_type("cursor", "string", "other")),
            }
        }
        // initialize, ping, resources/instructions take no required params
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn object_params(pairs: &[(&str, Value)]) -> RequestParams {
        let map: HashMap<String, Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        RequestParams::Object(map)
    }

    #[test]
    fn test_whitelist() {
        assert!(is_valid_method("tools/call"));
        assert!(is_valid_method("ping"));
        assert!(!is_valid_method("tools/delete"));
        assert!(!is_valid_method(""));
    }

    #[test]
    fn test_resources_read_requires_uri() {
        let ok = object_params(&[("uri", json!("workspace://default/notes.md"))]);
        assert!(validate_params("resources/read", Some(&ok)).is_ok());

        let missing = object_params(&[]);
        assert!(matches!(
            validate_params("resources/read", Some(&missing)),
            Err(McpError::MissingParameter(_))
        ));

        let wrong_type = object_params(&[("uri", json!(42))]);
        assert!(matches!(
            validate_params("resources/read", Some(&wrong_type)),
            Err(McpError::InvalidParameterType { .. })
        ));
    }

    #[test]
    fn test_tools_call_shape() {
        let ok = object_params(&[("name", json!("echo")), ("arguments", json!({"x": 1}))]);
        assert!(validate_params("tools/call", Some(&ok)).is_ok());

        let no_args = object_params(&[("name", json!("echo"))]);
        assert!(validate_params("tools/call", Some(&no_args)).is_ok());

        let bad_args = object_params(&[("name", json!("echo")), ("arguments", json!([1, 2]))]);
        assert!(validate_params("tools/call", Some(&bad_args)).is_err());

        assert!(validate_params("tools/call", None).is_err());
    }

    #[test]
    fn test_list_cursor_optional() {
        assert!(validate_params("tools/list", None).is_ok());
        let with_cursor = object_params(&[("cursor", json!("abc"))]);
        assert!(validate_params("tools/list", Some(&with_cursor)).is_ok());
        let bad_cursor = object_params(&[("cursor", json!(1))]);
        assert!(validate_params("tools/list", Some(&bad_cursor)).is_err());
    }

    #[test]
    fn test_ping_accepts_anything() {
        assert!(validate_params("ping", None).is_ok());
        let extra = object_params(&[("ignored", json!(true))]);
        assert!(validate_params("ping", Some(&extra)).is_ok());
    }
}
