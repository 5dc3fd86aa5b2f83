//! Application layer - Handlers, the goal engine and the relationship router.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod agents;
pub mod engine;
pub mod handlers;
pub mod router;

pub use agents::{AgentRegistry, AgentRuntime};
pub use engine::{GoalEngine, ResultClassifier, TurnContext, TurnError, TurnOutcome};
pub use handlers::{
    HandleMessageCommand, HandleMessageError, HandleMessageHandler, HandleMessageResult, ReplyContent,
    ResetGoalsCommand, ResetGoalsError, ResetGoalsHandler, ResetGoalsResult,
};
pub use router::{RelationshipRouter, RouteDecision, RouterError};
