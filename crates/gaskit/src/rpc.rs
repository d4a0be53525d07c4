//! JSON-RPC 2.0 bindings for the gas estimation endpoint.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::{borrow::Cow, fmt};

/// The JSON-RPC protocol version marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Version {
    /// `"2.0"`
    #[serde(rename = "2.0")]
    V2,
}

/// A request id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// Numeric id.
    Number(i64),
    /// String id.
    String(String),
    /// Explicit null id.
    Null,
}

/// An incoming JSON-RPC method call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Protocol version.
    pub jsonrpc: Version,
    /// Method name.
    pub method: String,
    /// Method parameters; defaults to `null` when omitted.
    #[serde(default)]
    pub params: Value,
    /// Request id; notifications carry none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
}

/// A JSON-RPC response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Protocol version.
    pub jsonrpc: Version,
    /// Id of the request this responds to.
    pub id: Option<Id>,
    /// Result or error.
    #[serde(flatten)]
    pub result: ResponseResult,
}

impl Response {
    /// A successful response carrying `result`.
    pub fn success(id: Option<Id>, result: Value) -> Self {
        Self { jsonrpc: Version::V2, id, result: ResponseResult::Success(result) }
    }

    /// An error response.
    pub fn error(id: Option<Id>, error: RpcError) -> Self {
        Self { jsonrpc: Version::V2, id, result: ResponseResult::Error(error) }
    }
}

/// The payload of a [`Response`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ResponseResult {
    /// Success, as the `result` field.
    #[serde(rename = "result")]
    Success(Value),
    /// Failure, as the `error` field.
    #[serde(rename = "error")]
    Error(RpcError),
}

/// A JSON-RPC error object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcError {
    /// Error code.
    pub code: ErrorCode,
    /// Short error message.
    pub message: Cow<'static, str>,
    /// Optional structured data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    /// New error with the code's canonical message.
    pub const fn new(code: ErrorCode) -> Self {
        Self { message: Cow::Borrowed(code.message()), code, data: None }
    }

    /// `InvalidRequest` error.
    pub const fn invalid_request() -> Self {
        Self::new(ErrorCode::InvalidRequest)
    }

    /// `MethodNotFound` error.
    pub const fn method_not_found() -> Self {
        Self::new(ErrorCode::MethodNotFound)
    }

    /// `InvalidParams` error with a custom message.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self { code: ErrorCode::InvalidParams, message: message.into().into(), data: None }
    }

    /// `InternalError` error with a custom message.
    pub fn internal_error_with(message: impl Into<String>) -> Self {
        Self { code: ErrorCode::InternalError, message: message.into().into(), data: None }
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.message(), self.message)
    }
}

/// JSON-RPC error codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid JSON was received.
    ParseError,
    /// The request object is not valid.
    InvalidRequest,
    /// The method does not exist.
    MethodNotFound,
    /// Invalid method parameters.
    InvalidParams,
    /// Internal JSON-RPC error.
    InternalError,
    /// Server-defined error.
    ServerError(i64),
}

impl ErrorCode {
    /// Returns the error code as `i64`.
    pub const fn code(&self) -> i64 {
        match *self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
            Self::ServerError(code) => code,
        }
    }

    /// Returns the canonical message for the code.
    pub const fn message(&self) -> &'static str {
        match *self {
            Self::ParseError => "Parse error",
            Self::InvalidRequest => "Invalid request",
            Self::MethodNotFound => "Method not found",
            Self::InvalidParams => "Invalid params",
            Self::InternalError => "Internal error",
            Self::ServerError(_) => "Server error",
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match i64::deserialize(deserializer)? {
            -32700 => Self::ParseError,
            -32600 => Self::InvalidRequest,
            -32601 => Self::MethodNotFound,
            -32602 => Self::InvalidParams,
            -32603 => Self::InternalError,
            code => Self::ServerError(code),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use similar_asserts::assert_eq;

    #[test]
    fn deserializes_method_call() {
        let request: Request = serde_json::from_str(
            r#"{"jsonrpc":"2.0","method":"gas_requestGasEstimation","params":[137],"id":1}"#,
        )
        .unwrap();
        assert_eq!(request.method, "gas_requestGasEstimation");
        assert_eq!(request.params, json!([137]));
        assert_eq!(request.id, Some(Id::Number(1)));
    }

    #[test]
    fn rejects_wrong_version() {
        let request = serde_json::from_str::<Request>(
            r#"{"jsonrpc":"1.0","method":"gas_requestGasEstimation","id":1}"#,
        );
        assert!(request.is_err());
    }

    #[test]
    fn serializes_success_and_error() {
        let response = Response::success(Some(Id::Number(1)), json!({"ok": true}));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"jsonrpc": "2.0", "id": 1, "result": {"ok": true}})
        );

        let response = Response::error(None, RpcError::method_not_found());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "id": null,
                "error": {"code": -32601, "message": "Method not found"}
            })
        );
    }

    #[test]
    fn error_code_roundtrip() {
        for code in [-32700i64, -32600, -32601, -32602, -32603, -32000] {
            let parsed: ErrorCode = serde_json::from_value(json!(code)).unwrap();
            assert_eq!(parsed.code(), code);
        }
    }
}
