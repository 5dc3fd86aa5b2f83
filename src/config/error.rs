//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Agent roster invalid: {0}")]
    Roster(#[from] RosterError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Bind host '{0}' is not an IP address")]
    InvalidHost(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Temperature must be between 0 and 2")]
    InvalidTemperature,

    #[error("History limit must be at least 1")]
    InvalidHistoryLimit,
}

/// Errors found while loading or checking the agent roster
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Failed to read roster {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse roster: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Roster defines no agents")]
    Empty,

    #[error("Agent name cannot be empty")]
    EmptyName,

    #[error("Agent name '{0}' is defined more than once")]
    DuplicateName(String),

    #[error("More than one default agent: {0:?}")]
    MultipleDefaults(Vec<String>),

    #[error("Agent '{agent}' hands off to unknown agent '{target}'")]
    UnknownHandoffTarget { agent: String, target: String },
}
