use serde_json::{json, Map, Value};

use super::error::RpcError;

/// A decoded request. `id` is None for notifications.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcRequest {
    pub method: String,
    pub params: Option<Value>,
    pub id: Option<Value>,
}

impl RpcRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Validate the envelope of one request object. On failure the error
    /// carries whatever id could be recovered so the response can echo it.
    pub fn from_value(value: Value) -> Result<Self, (RpcError, Value)> {
        let Value::Object(mut object) = value else {
            return Err((RpcError::invalid_request("request must be an object"), Value::Null));
        };

        let id = object.remove("id");
        let echo_id = id.clone().unwrap_or(Value::Null);

        if let Some(id) = &id {
            if !(id.is_string() || id.is_number() || id.is_null()) {
                return Err((RpcError::invalid_request("id must be a string, number or null"), Value::Null));
            }
        }

        match object.remove("jsonrpc") {
            Some(Value::String(version)) if version == "2.0" => {}
            _ => return Err((RpcError::invalid_request("jsonrpc must be \"2.0\""), echo_id)),
        }

        let method = match object.remove("method") {
            Some(Value::String(method)) => method,
            _ => return Err((RpcError::invalid_request("method must be a string"), echo_id)),
        };

        let params = object.remove("params");

        Ok(Self { method, params, id })
    }
}

/// A response to a request that carried an id
#[derive(Debug, Clone, PartialEq)]
pub struct RpcResponse {
    pub id: Value,
    pub outcome: Result<Value, RpcError>,
}

impl RpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self { id, outcome: Ok(result) }
    }

    pub fn failure(id: Value, error: RpcError) -> Self {
        Self { id, outcome: Err(error) }
    }

    pub fn into_json(self) -> Value {
        let mut body = Map::new();
        body.insert("jsonrpc".into(), json!("2.0"));
        match self.outcome {
            Ok(result) => {
                body.insert("result".into(), result);
            }
            Err(error) => {
                let error = serde_json::to_value(&error).unwrap_or_else(|_| json!({
                    "code": error.code,
                    "message": error.message,
                }));
                body.insert("error".into(), error);
            }
        }
        body.insert("id".into(), self.id);
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_request_with_params() {
        let request = RpcRequest::from_value(json!({
            "jsonrpc": "2.0",
            "method": "getColumns",
            "params": [1],
            "id": 7
        }))
        .unwrap();

        assert_eq!(request.method, "getColumns");
        assert_eq!(request.params, Some(json!([1])));
        assert_eq!(request.id, Some(json!(7)));
        assert!(!request.is_notification());
    }

    #[test]
    fn missing_id_is_a_notification() {
        let request = RpcRequest::from_value(json!({"jsonrpc": "2.0", "method": "getColumns"})).unwrap();
        assert!(request.is_notification());
        assert_eq!(request.params, None);
    }

    #[test]
    fn wrong_version_echoes_id() {
        let (error, id) = RpcRequest::from_value(json!({"jsonrpc": "1.0", "method": "x", "id": "abc"})).unwrap_err();
        assert_eq!(error.code, crate::rpc::error::INVALID_REQUEST);
        assert_eq!(id, json!("abc"));
    }

    #[test]
    fn non_object_is_invalid() {
        let (error, id) = RpcRequest::from_value(json!(42)).unwrap_err();
        assert_eq!(error.code, crate::rpc::error::INVALID_REQUEST);
        assert_eq!(id, Value::Null);
    }

    #[test]
    fn null_result_is_kept() {
        let body = RpcResponse::success(json!(1), Value::Null).into_json();
        assert_eq!(body, json!({"jsonrpc": "2.0", "result": null, "id": 1}));
    }

    #[test]
    fn error_response_shape() {
        let body = RpcResponse::failure(json!(2), RpcError::forbidden()).into_json();
        assert_eq!(
            body,
            json!({"jsonrpc": "2.0", "error": {"code": 403, "message": "Forbidden"}, "id": 2})
        );
    }
}
