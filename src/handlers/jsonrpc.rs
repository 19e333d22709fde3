use axum::{
    body::Bytes,
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::auth::Caller;
use crate::rpc;
use crate::server::AppState;

/// POST /jsonrpc - run one request or a batch against the column procedures
pub async fn jsonrpc_post(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    body: Bytes,
) -> Response {
    match rpc::handle_payload(&state.procedure, &caller, &body, state.config.rpc.max_batch_size).await {
        Some(value) => Json(value).into_response(),
        // Only notifications were sent
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
