use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::error::RpcError;
use super::message::{RpcRequest, RpcResponse};
use super::params::{
    bind, AddColumnParams, ChangeColumnPositionParams, ColumnIdParams, GetColumnsParams, UpdateColumnParams,
};
use crate::auth::Caller;
use crate::procedure::{ColumnAction, ColumnProcedure};

/// Handle a raw JSON-RPC body, single or batch.
///
/// Returns None when nothing needs to be sent back (only notifications).
/// Batch entries run one after another in request order.
pub async fn handle_payload(
    procedure: &ColumnProcedure,
    caller: &Caller,
    body: &[u8],
    max_batch_size: usize,
) -> Option<Value> {
    let payload: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => return Some(RpcResponse::failure(Value::Null, RpcError::parse_error(e.to_string())).into_json()),
    };

    match payload {
        Value::Array(messages) => {
            if messages.is_empty() {
                return Some(RpcResponse::failure(Value::Null, RpcError::invalid_request("empty batch")).into_json());
            }
            if messages.len() > max_batch_size {
                return Some(
                    RpcResponse::failure(
                        Value::Null,
                        RpcError::invalid_request(format!(
                            "batch of {} exceeds limit of {}",
                            messages.len(),
                            max_batch_size
                        )),
                    )
                    .into_json(),
                );
            }

            debug!("Dispatching batch of {} requests", messages.len());
            let mut responses = Vec::with_capacity(messages.len());
            for message in messages {
                if let Some(response) = handle_message(procedure, caller, message).await {
                    responses.push(response);
                }
            }

            if responses.is_empty() {
                None
            } else {
                Some(Value::Array(responses))
            }
        }
        message => handle_message(procedure, caller, message).await,
    }
}

async fn handle_message(procedure: &ColumnProcedure, caller: &Caller, message: Value) -> Option<Value> {
    let request = match RpcRequest::from_value(message) {
        Ok(request) => request,
        Err((error, id)) => return Some(RpcResponse::failure(id, error).into_json()),
    };

    let outcome = invoke(procedure, caller, &request.method, request.params).await;

    if let Err(error) = &outcome {
        debug!(method = %request.method, code = error.code, "Procedure failed: {}", error.message);
    }

    let id = request.id?;
    Some(RpcResponse { id, outcome }.into_json())
}

/// Call a procedure by its wire name with undecoded params
pub async fn invoke(
    procedure: &ColumnProcedure,
    caller: &Caller,
    method: &str,
    params: Option<Value>,
) -> Result<Value, RpcError> {
    let action: ColumnAction = method.parse().map_err(|_| RpcError::method_not_found(method))?;

    if action.is_mutation() {
        info!(user = %caller.username, access = caller.access.as_str(), "RPC {}", method);
    } else {
        debug!(user = %caller.username, access = caller.access.as_str(), "RPC {}", method);
    }

    match action {
        ColumnAction::GetColumns => {
            let p: GetColumnsParams = bind(params)?;
            to_result(procedure.get_columns(caller, p.project_id).await?)
        }
        ColumnAction::GetColumn => {
            let p: ColumnIdParams = bind(params)?;
            to_result(procedure.get_column(caller, p.column_id).await?)
        }
        ColumnAction::UpdateColumn => {
            let p: UpdateColumnParams = bind(params)?;
            to_result(
                procedure
                    .update_column(caller, p.column_id, &p.title, p.task_limit, &p.description)
                    .await?,
            )
        }
        ColumnAction::AddColumn => {
            let p: AddColumnParams = bind(params)?;
            to_result(
                procedure
                    .add_column(caller, p.project_id, &p.title, p.task_limit, &p.description)
                    .await?,
            )
        }
        ColumnAction::RemoveColumn => {
            let p: ColumnIdParams = bind(params)?;
            to_result(procedure.remove_column(caller, p.column_id).await?)
        }
        ColumnAction::ChangeColumnPosition => {
            let p: ChangeColumnPositionParams = bind(params)?;
            to_result(
                procedure
                    .change_column_position(caller, p.project_id, p.column_id, p.position)
                    .await?,
            )
        }
    }
}

fn to_result<T: Serialize>(value: T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|e| {
        tracing::error!("Failed to serialize procedure result: {}", e);
        RpcError::internal_error()
    })
}
