//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ModelClassifier` - the language-model `{category, text}` call
//! - `RelationshipRepository` - per-agent identity and ownership edges
//! - `GoalRepository` - per-agent goal persistence
//! - `MessageLog` - shared room history read by the session delimiter

mod goal_repository;
mod message_log;
mod model_classifier;
mod relationship_repository;

pub use goal_repository::{GoalQuery, GoalRepository};
pub use message_log::MessageLog;
pub use model_classifier::{AIError, ClassificationRequest, ModelClassifier, RawClassification};
pub use relationship_repository::{RelationshipQuery, RelationshipRepository};
