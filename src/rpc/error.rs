use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::RepositoryError;
use crate::procedure::ProcedureError;

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;
/// Repository refused the operation (duplicate title, missing project)
pub const REPOSITORY_ERROR: i64 = -32000;
/// Caller lacks permission for the action
pub const ACCESS_DENIED: i64 = 403;

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

    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn parse_error(detail: impl Into<String>) -> Self {
        Self::new(PARSE_ERROR, "Parse error").with_data(Value::String(detail.into()))
    }

    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self::new(INVALID_REQUEST, "Invalid Request").with_data(Value::String(detail.into()))
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, "Method not found").with_data(method.to_string())
    }

    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, "Invalid params").with_data(Value::String(detail.into()))
    }

    pub fn internal_error() -> Self {
        Self::new(INTERNAL_ERROR, "Internal error")
    }

    pub fn forbidden() -> Self {
        Self::new(ACCESS_DENIED, "Forbidden")
    }
}

impl From<ProcedureError> for RpcError {
    fn from(err: ProcedureError) -> Self {
        match err {
            // The denial reason is logged by the authorizer; callers only
            // learn that they were refused
            ProcedureError::AccessDenied(_) => RpcError::forbidden(),
            ProcedureError::Repository(RepositoryError::NotFound(msg)) => RpcError::new(REPOSITORY_ERROR, msg),
            ProcedureError::Repository(RepositoryError::Conflict(msg)) => RpcError::new(REPOSITORY_ERROR, msg),
            ProcedureError::Repository(RepositoryError::Sqlx(e)) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("SQLx error: {}", e);
                RpcError::internal_error()
            }
        }
    }
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for RpcError {}
