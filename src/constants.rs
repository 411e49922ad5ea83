//! Application constants and configuration

/// Endpoint queried when no override is configured
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api/data";

/// Environment variable that overrides the configured endpoint
pub const API_URL_ENV: &str = "DATAVIEW_API_URL";

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
