//! In-memory storage adapters for goals, relationships and the message log.

mod in_memory_goal_repository;
mod in_memory_message_log;
mod in_memory_relationship_repository;

pub use in_memory_goal_repository::InMemoryGoalRepository;
pub use in_memory_message_log::InMemoryMessageLog;
pub use in_memory_relationship_repository::InMemoryRelationshipRepository;
