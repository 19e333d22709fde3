// handlers/mod.rs - HTTP entry points
//
// health:  GET /, GET /health (no authentication)
// jsonrpc: POST /jsonrpc (JWT authentication required)
pub mod health;
pub mod jsonrpc;

pub use health::{health, root};
pub use jsonrpc::jsonrpc_post;
