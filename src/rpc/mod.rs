//! JSON-RPC 2.0 transport for the column procedures.
//!
//! `dispatch` turns a raw request body into an optional response body;
//! `params` binds positional or named params onto typed argument structs.

pub mod dispatch;
pub mod error;
pub mod message;
pub mod params;

pub use dispatch::{handle_payload, invoke};
pub use error::RpcError;
pub use message::{RpcRequest, RpcResponse};
