//! Model Classifier Port - Interface for the language-model classification call.
//!
//! The goal engine renders a prompt template against the delimited message
//! window and asks the model for a `{category, text}` object. This port is
//! the only place the engine touches a language model.
//!
//! # Design
//!
//! - One call per classification; no streaming
//! - Missing fields in the model's reply are returned as `None`, never as errors
//! - Transport and provider failures surface as [`AIError`]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::dialogue::ClassificationMode;
use crate::domain::foundation::RoomId;

/// Port for classifying the latest user reply.
#[async_trait]
pub trait ModelClassifier: Send + Sync {
    /// Sends the rendered prompt and returns the raw `{category, text}` pair.
    async fn classify(&self, request: &ClassificationRequest) -> Result<RawClassification, AIError>;

    /// Short provider name for logs (e.g. "openai", "mock").
    fn provider_name(&self) -> &str;
}

/// A fully rendered classification prompt.
#[derive(Debug, Clone)]
pub struct ClassificationRequest {
    pub mode: ClassificationMode,
    /// Template with every placeholder filled.
    pub prompt: String,
    pub room_id: RoomId,
    /// Name of the agent running the goal.
    pub agent_name: String,
}

impl ClassificationRequest {
    pub fn new(
        mode: ClassificationMode,
        prompt: impl Into<String>,
        room_id: RoomId,
        agent_name: impl Into<String>,
    ) -> Self {
        Self {
            mode,
            prompt: prompt.into(),
            room_id,
            agent_name: agent_name.into(),
        }
    }
}

/// Model reply before normalization. Either field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawClassification {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl RawClassification {
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            text: Some(text.into()),
        }
    }

    /// A reply with neither field, as produced for unparseable model output.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Model provider errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum AIError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider's envelope (not the model's content).
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn timeout(timeout_secs: u32) -> Self {
        Self::Timeout { timeout_secs }
    }

    /// Returns true if a caller could reasonably try again later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Unavailable { .. } | Self::Network(_) | Self::Timeout { .. }
        )
    }
}
