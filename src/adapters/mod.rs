//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - model classifiers (OpenAI-compatible, scripted mock)
//! - `storage` - in-memory relationship, goal and message stores
//! - `http` - axum routes for the chat platform

pub mod ai;
pub mod http;
pub mod storage;

pub use ai::{MockModelClassifier, OpenAIClassifier, OpenAIConfig};
pub use storage::{InMemoryGoalRepository, InMemoryMessageLog, InMemoryRelationshipRepository};
