//! ResetGoalsHandler - Command handler that rebuilds an agent's goal for a user.

use std::sync::Arc;

use crate::application::router::{RelationshipRouter, RouterError};
use crate::domain::dialogue::ChatMessage;
use crate::domain::foundation::{DomainError, RoomId};
use crate::domain::goal::Goal;
use crate::ports::MessageLog;

/// Command to discard every goal between one agent and one user.
#[derive(Debug, Clone)]
pub struct ResetGoalsCommand {
    /// Agent id or agent name.
    pub agent: String,
    pub room_id: RoomId,
    pub platform_user: String,
}

#[derive(Debug, Clone)]
pub struct ResetGoalsResult {
    /// The fresh goal, built from the agent's line items.
    pub goal: Goal,
    pub removed: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ResetGoalsError {
    #[error("agent '{0}' not found")]
    AgentNotFound(String),

    #[error("invalid request: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Routing(#[from] RouterError),

    #[error(transparent)]
    Storage(#[from] DomainError),
}

pub struct ResetGoalsHandler {
    router: Arc<RelationshipRouter>,
    messages: Arc<dyn MessageLog>,
}

impl ResetGoalsHandler {
    pub fn new(router: Arc<RelationshipRouter>, messages: Arc<dyn MessageLog>) -> Self {
        Self { router, messages }
    }

    /// Idempotent: resetting with no prior goal yields the same fresh goal
    /// as resetting a finished one.
    pub async fn handle(&self, cmd: ResetGoalsCommand) -> Result<ResetGoalsResult, ResetGoalsError> {
        let agent = self
            .router
            .registry()
            .lookup(&cmd.agent)
            .ok_or_else(|| ResetGoalsError::AgentNotFound(cmd.agent.clone()))?;
        if cmd.platform_user.trim().is_empty() {
            return Err(ResetGoalsError::InvalidInput("userId must not be empty".to_string()));
        }

        let user_id = self.router.resolve_identity(&cmd.room_id, &cmd.platform_user).await?;

        let removed = agent
            .goals
            .remove_goals_by_relationship(&cmd.room_id, &user_id, agent.id)
            .await?;

        let goal = Goal::new(
            cmd.room_id.clone(),
            user_id.clone(),
            agent.id,
            &agent.definition.goal_name,
            &agent.definition.line_items,
        );
        agent.goals.create_goal(&goal).await?;

        // Answers given before the reset must not leak into the new goal.
        self.messages
            .append(ChatMessage::session_boundary(cmd.room_id.clone(), agent.sender()))
            .await?;

        tracing::info!(
            room_id = %cmd.room_id,
            user_id = %user_id,
            agent = agent.name(),
            removed,
            "goals reset"
        );

        Ok(ResetGoalsResult { goal, removed })
    }
}
