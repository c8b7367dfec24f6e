//! Application state

use common::Config;
use webhook::{Authenticator, HookConfig};

/// Shared application state
pub struct AppState {
    pub auth: Authenticator,
    pub hook: HookConfig,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let auth = Authenticator::new(config.webhook_secret.clone())?;
        Ok(Self {
            auth,
            hook: HookConfig::default(),
        })
    }
}
