//! REST Backend Client
//!
//! Typed wrapper over the backend's HTTP contract. Every endpoint sends
//! and receives JSON; any 2xx status is success and any other status is
//! failure, uniformly, with the response body kept for logging only. No
//! retries happen at this layer (or anywhere else).

mod client;
mod error;

pub use client::ApiClient;
pub use error::ApiError;
