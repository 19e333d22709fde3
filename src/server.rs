use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::authorization::{ColumnAuthorization, ProjectAuthorization};
use crate::config::AppConfig;
use crate::database::{ColumnRepository, MemoryStore, ProjectRoleStore};
use crate::handlers;
use crate::middleware::jwt_auth_middleware;
use crate::procedure::ColumnProcedure;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub procedure: Arc<ColumnProcedure>,
    pub columns: Arc<dyn ColumnRepository>,
}

impl AppState {
    /// Wire the procedure to its authorizers and stores
    pub fn new(config: AppConfig, columns: Arc<dyn ColumnRepository>, roles: Arc<dyn ProjectRoleStore>) -> Self {
        let project_auth = Arc::new(ProjectAuthorization::new(roles));
        let column_auth = Arc::new(ColumnAuthorization::new(project_auth.clone(), columns.clone()));
        let procedure = ColumnProcedure::new(project_auth, column_auth, columns.clone());

        Self {
            config: Arc::new(config),
            procedure: Arc::new(procedure),
            columns,
        }
    }

    pub fn in_memory(config: AppConfig, store: Arc<MemoryStore>) -> Self {
        Self::new(config, store.clone(), store)
    }
}

pub fn app(state: AppState) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Protected
        .merge(rpc_routes(state.clone()));

    let router = if state.config.security.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router
        .layer(DefaultBodyLimit::max(state.config.rpc.max_request_size_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn rpc_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/jsonrpc", post(handlers::jsonrpc_post))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
