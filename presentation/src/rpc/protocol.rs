//! JSON-RPC 2.0 message types.
//!
//! Every frame is one JSON object on its own line.
//!
//! - **Requests**: client → server, `{"jsonrpc":"2.0","id":1,"method":"questions.submit","params":{...}}`
//! - **Responses**: server → client, with either `result` or `error`
//! - **Notifications**: requests without `id`; executed, never answered

use couplequest_application::ErrorStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// Invalid JSON was received.
pub const PARSE_ERROR: i64 = -32700;
/// The JSON sent is not a valid request object.
pub const INVALID_REQUEST: i64 = -32600;
/// The method does not exist.
pub const METHOD_NOT_FOUND: i64 = -32601;
/// Invalid method parameters.
pub const INVALID_PARAMS: i64 = -32602;
/// Internal error.
pub const INTERNAL_ERROR: i64 = -32603;

/// Incoming JSON-RPC request (or notification when `id` is absent)
#[derive(Debug, Clone, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl RpcRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// Outgoing JSON-RPC response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn parse_error(detail: impl std::fmt::Display) -> Self {
        Self::new(PARSE_ERROR, format!("Parse error: {}", detail))
    }

    pub fn invalid_request(detail: impl std::fmt::Display) -> Self {
        Self::new(INVALID_REQUEST, format!("Invalid request: {}", detail))
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("Method not found: {}", method))
    }

    pub fn invalid_params(detail: impl std::fmt::Display) -> Self {
        Self::new(INVALID_PARAMS, format!("Invalid params: {}", detail))
    }

    /// An application failure; `data.status` carries the HTTP-like status.
    pub fn application(status: ErrorStatus, message: impl Into<String>) -> Self {
        Self {
            code: status_code(status),
            message: message.into(),
            data: Some(serde_json::json!({ "status": status.http_code() })),
        }
    }

    /// The HTTP-like status of an application error, if this is one.
    pub fn status(&self) -> Option<u16> {
        self.data
            .as_ref()
            .and_then(|d| d.get("status"))
            .and_then(Value::as_u64)
            .and_then(|s| u16::try_from(s).ok())
    }
}

/// JSON-RPC error code for an application failure class.
///
/// Client errors live in the implementation-defined server range
/// (-32000 minus the last digits of the HTTP status); internal failures use
/// the reserved internal error code.
pub fn status_code(status: ErrorStatus) -> i64 {
    match status {
        ErrorStatus::BadRequest => -32000,
        ErrorStatus::Unauthorized => -32001,
        ErrorStatus::Forbidden => -32003,
        ErrorStatus::NotFound => -32004,
        ErrorStatus::Conflict => -32009,
        ErrorStatus::Internal => INTERNAL_ERROR,
    }
}
