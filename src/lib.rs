pub mod auth;
pub mod authorization;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod procedure;
pub mod rpc;
pub mod server;
pub mod types;
