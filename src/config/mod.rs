//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BOM_CONCIERGE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use bom_concierge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod agents;
mod ai;
mod error;
mod server;

pub use agents::{AgentDefinition, AgentRoster, AgentsConfig};
pub use ai::{AiConfig, AiProvider};
pub use error::{ConfigError, RosterError, ValidationError};
pub use server::ServerConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Model provider configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Agent roster location and history window
    #[serde(default)]
    pub agents: AgentsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `BOM_CONCIERGE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `BOM_CONCIERGE__AI__PROVIDER=openai` -> `ai.provider = openai`
    /// - `BOM_CONCIERGE__AGENTS__ROSTER_PATH=agents.yaml`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BOM_CONCIERGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.agents.validate()?;
        Ok(())
    }

    /// Reads the roster named by `agents.roster_path`.
    pub fn load_roster(&self) -> Result<AgentRoster, ConfigError> {
        Ok(AgentRoster::load(&self.agents.roster_path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("BOM_CONCIERGE__SERVER__PORT");
        env::remove_var("BOM_CONCIERGE__SERVER__LOG_JSON");
        env::remove_var("BOM_CONCIERGE__AI__PROVIDER");
        env::remove_var("BOM_CONCIERGE__AI__API_KEY");
        env::remove_var("BOM_CONCIERGE__AGENTS__HISTORY_LIMIT");
    }

    #[test]
    fn test_load_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 8080);
        assert!(!config.server.log_json);
        assert_eq!(config.ai.provider, AiProvider::Mock);
        assert_eq!(config.agents.history_limit, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("BOM_CONCIERGE__SERVER__PORT", "3000");
        env::set_var("BOM_CONCIERGE__SERVER__LOG_JSON", "true");
        env::set_var("BOM_CONCIERGE__AI__PROVIDER", "openai");
        env::set_var("BOM_CONCIERGE__AI__API_KEY", "sk-xxx");
        env::set_var("BOM_CONCIERGE__AGENTS__HISTORY_LIMIT", "20");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.server.log_json);
        assert_eq!(config.ai.provider, AiProvider::OpenAI);
        assert!(config.ai.has_api_key());
        assert_eq!(config.agents.history_limit, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_openai_without_key_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("BOM_CONCIERGE__AI__PROVIDER", "openai");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_err());
    }
}
