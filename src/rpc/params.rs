use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::RpcError;
use crate::types::{ColumnId, ProjectId};

/// Argument struct of one procedure. `NAMES` gives the positional order.
pub trait ProcedureParams: DeserializeOwned {
    const NAMES: &'static [&'static str];
}

/// Bind request params onto `T`.
///
/// Accepts a positional array (matched against `T::NAMES`), a named object,
/// or nothing at all. Missing optional arguments take their defaults.
pub fn bind<T: ProcedureParams>(params: Option<Value>) -> Result<T, RpcError> {
    let named = match params {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map,
        Some(Value::Array(values)) => {
            if values.len() > T::NAMES.len() {
                return Err(RpcError::invalid_params(format!(
                    "expected at most {} params, got {}",
                    T::NAMES.len(),
                    values.len()
                )));
            }
            T::NAMES
                .iter()
                .map(|name| name.to_string())
                .zip(values)
                .collect()
        }
        Some(_) => return Err(RpcError::invalid_params("params must be an array or an object")),
    };

    serde_json::from_value(Value::Object(named)).map_err(|e| RpcError::invalid_params(e.to_string()))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetColumnsParams {
    pub project_id: ProjectId,
}

impl ProcedureParams for GetColumnsParams {
    const NAMES: &'static [&'static str] = &["project_id"];
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnIdParams {
    pub column_id: ColumnId,
}

impl ProcedureParams for ColumnIdParams {
    const NAMES: &'static [&'static str] = &["column_id"];
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateColumnParams {
    pub column_id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub task_limit: i32,
    #[serde(default)]
    pub description: String,
}

impl ProcedureParams for UpdateColumnParams {
    const NAMES: &'static [&'static str] = &["column_id", "title", "task_limit", "description"];
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddColumnParams {
    pub project_id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub task_limit: i32,
    #[serde(default)]
    pub description: String,
}

impl ProcedureParams for AddColumnParams {
    const NAMES: &'static [&'static str] = &["project_id", "title", "task_limit", "description"];
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChangeColumnPositionParams {
    pub project_id: ProjectId,
    pub column_id: ColumnId,
    pub position: i32,
}

impl ProcedureParams for ChangeColumnPositionParams {
    const NAMES: &'static [&'static str] = &["project_id", "column_id", "position"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn positional_and_named_bind_the_same() {
        let positional: AddColumnParams = bind(Some(json!([3, "Review", 2, "peer review"]))).unwrap();
        let named: AddColumnParams = bind(Some(json!({
            "project_id": 3,
            "title": "Review",
            "task_limit": 2,
            "description": "peer review"
        })))
        .unwrap();

        assert_eq!(positional.project_id, named.project_id);
        assert_eq!(positional.title, named.title);
        assert_eq!(positional.task_limit, 2);
        assert_eq!(named.description, "peer review");
    }

    #[test]
    fn optional_arguments_default() {
        let params: UpdateColumnParams = bind(Some(json!([5, "Todo"]))).unwrap();
        assert_eq!(params.task_limit, 0);
        assert_eq!(params.description, "");
    }

    #[test]
    fn missing_required_argument_is_rejected() {
        let err = bind::<ChangeColumnPositionParams>(Some(json!([1, 2]))).unwrap_err();
        assert_eq!(err.code, crate::rpc::error::INVALID_PARAMS);

        let err = bind::<GetColumnsParams>(None).unwrap_err();
        assert_eq!(err.code, crate::rpc::error::INVALID_PARAMS);
    }

    #[test]
    fn extra_arguments_are_rejected() {
        assert!(bind::<ColumnIdParams>(Some(json!([1, 2]))).is_err());
        assert!(bind::<ColumnIdParams>(Some(json!({"column_id": 1, "force": true}))).is_err());
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(bind::<GetColumnsParams>(Some(json!(["one"]))).is_err());
        assert!(bind::<GetColumnsParams>(Some(json!("1"))).is_err());
    }
}
