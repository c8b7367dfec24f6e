//! Application configuration

use std::env;

/// Main application configuration.
///
/// Built once at startup and passed by reference; nothing in the
/// workspace reads environment variables after this point.
#[derive(Debug, Clone)]
pub struct Config {
    /// Versioned API root of the forge, e.g. `https://forge.example.com/api/v5/`
    pub forge_api_url: String,
    pub forge_token: Option<String>,
    /// Shared secret expected in the webhook token header
    pub webhook_secret: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            forge_api_url: env::var("FORGE_API_URL")
                .unwrap_or_else(|_| "https://forge.example.com/api/v5/".to_string()),
            forge_token: env::var("FORGE_TOKEN").ok(),
            webhook_secret: env::var("WEBHOOK_SECRET").unwrap_or_default(),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        }
    }
}
