use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::procedure::ColumnAction;
use crate::server::AppState;

/// GET / - service description
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");
    let methods: Vec<&str> = ColumnAction::ALL.iter().map(|a| a.as_str()).collect();

    Json(json!({
        "success": true,
        "data": {
            "name": "Kanban API (Rust)",
            "version": version,
            "environment": state.config.environment,
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "jsonrpc": "/jsonrpc (protected - JSON-RPC 2.0, Bearer JWT)",
            },
            "methods": methods,
        }
    }))
}

/// GET /health - checks that the column store answers
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.columns.ping().await?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
            "store": "ok"
        }
    })))
}
