//! Proxy checking
//!
//! - `address`: normalizes user-supplied addresses into proxy URLs
//! - `prober`: checks one proxy with a single HTTP request
//! - `batch`: validates requests and runs probes concurrently

pub mod address;
pub mod batch;
pub mod prober;

pub use batch::BatchChecker;
pub use prober::{HttpProber, Prober};
