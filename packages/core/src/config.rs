//! Runtime configuration
//!
//! `ApiConfig` is built once at startup and is immutable for the process
//! lifetime. The only knob is the backend base URL, taken from the
//! `ORKESTRIA_API_URL` environment variable with the same default the
//! dashboard has always used.

use std::env;

/// Environment variable overriding the backend base URL
pub const API_URL_ENV: &str = "ORKESTRIA_API_URL";

/// Default backend base URL for local development
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Backend connection configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the REST backend, without a trailing slash
    pub base_url: String,
}

impl ApiConfig {
    /// Read configuration from the environment, falling back to the
    /// local-development default.
    pub fn from_env() -> Self {
        let base_url = env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::with_base_url(base_url)
    }

    /// Build a configuration pointing at an explicit base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        ApiConfig { base_url }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }
}
