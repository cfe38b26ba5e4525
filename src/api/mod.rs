//! API server implementation
//!
//! Exposes the proxy checking endpoints over HTTP.

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

pub use server::{ApiServer, AppState};
