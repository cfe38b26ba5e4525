//! Proxy Checker
//!
//! An HTTP service that checks batches of proxies.
//!
//! ## Features
//!
//! - One request per proxy to a "what is my IP" endpoint
//! - Up to 100 proxies per batch, all probed concurrently
//! - Working / failed / timeout classification with response time and exit IP
//! - Environment-based configuration and structured logging

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod proxy;

pub use config::Config;
pub use error::{CheckerError, Result};
