//! HandleMessageHandler - Command handler for one inbound user message.
//!
//! Resolves identity and ownership, runs the owning agent's goal engine and
//! applies any hand-off before replying.

use std::sync::Arc;

use crate::application::agents::AgentRuntime;
use crate::application::engine::{GoalEngine, TurnContext, TurnError, TurnOutcome};
use crate::application::router::{RelationshipRouter, RouterError};
use crate::domain::dialogue::{ChatMessage, Sender};
use crate::domain::foundation::{DomainError, RoomId, UserId};
use crate::domain::goal::Goal;
use crate::ports::{GoalQuery, MessageLog};

/// Command carrying one user message addressed to an agent.
#[derive(Debug, Clone)]
pub struct HandleMessageCommand {
    /// Agent id or agent name.
    pub agent: String,
    pub room_id: RoomId,
    /// Platform handle of the sender, mapped to a stable id per room.
    pub platform_user: String,
    pub user_name: Option<String>,
    pub text: String,
}

/// One message the agents emit back to the room.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyContent {
    pub agent: String,
    pub text: String,
    pub action: Option<String>,
}

/// Result of a turn. Empty when the addressed agent does not own the
/// conversation.
#[derive(Debug, Clone, Default)]
pub struct HandleMessageResult {
    pub contents: Vec<ReplyContent>,
}

#[derive(Debug, thiserror::Error)]
pub enum HandleMessageError {
    #[error("agent '{0}' not found")]
    AgentNotFound(String),

    #[error("invalid message: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Routing(#[from] RouterError),

    #[error(transparent)]
    Storage(#[from] DomainError),
}

pub struct HandleMessageHandler {
    router: Arc<RelationshipRouter>,
    engine: Arc<GoalEngine>,
    messages: Arc<dyn MessageLog>,
}

impl HandleMessageHandler {
    pub fn new(router: Arc<RelationshipRouter>, engine: Arc<GoalEngine>, messages: Arc<dyn MessageLog>) -> Self {
        Self {
            router,
            engine,
            messages,
        }
    }

    pub async fn handle(&self, cmd: HandleMessageCommand) -> Result<HandleMessageResult, HandleMessageError> {
        // 1. Validate input and find the addressed agent
        let addressed = self
            .router
            .registry()
            .lookup(&cmd.agent)
            .ok_or_else(|| HandleMessageError::AgentNotFound(cmd.agent.clone()))?;
        if cmd.text.trim().is_empty() {
            return Err(HandleMessageError::InvalidInput("text must not be empty".to_string()));
        }
        if cmd.platform_user.trim().is_empty() {
            return Err(HandleMessageError::InvalidInput("userId must not be empty".to_string()));
        }

        // 2. Map the platform user
        let room_id = cmd.room_id;
        let user_id = self.router.resolve_identity(&room_id, &cmd.platform_user).await?;
        let user_name = cmd
            .user_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| cmd.platform_user.clone());

        // 3. Only the owner answers. Every loaded agent receives the same
        // platform message, so only the owner records it in the room log.
        let decision = self.router.route(&room_id, &user_id, &addressed).await?;
        if decision.owner.id != addressed.id {
            tracing::debug!(
                room_id = %room_id,
                user_id = %user_id,
                addressed = addressed.name(),
                owner = decision.owner.name(),
                "message addressed to non-owner ignored"
            );
            return Ok(HandleMessageResult::default());
        }
        let agent = decision.owner;
        self.messages
            .append(ChatMessage::new(
                room_id.clone(),
                Sender::new(user_id.clone(), user_name.clone()),
                cmd.text.clone(),
            ))
            .await?;

        // 4. Run the turn
        let mut goal = self.load_or_create_goal(&agent, &room_id, &user_id).await?;
        let ctx = TurnContext {
            agent: &agent.definition,
            room_id: &room_id,
            user_name: &user_name,
            user_text: &cmd.text,
        };
        let outcome = match self.engine.run_turn(&ctx, &mut goal).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(
                    room_id = %room_id,
                    user_id = %user_id,
                    agent = agent.name(),
                    goal_id = %goal.id(),
                    error = %e,
                    "turn aborted"
                );
                return Err(e.into());
            }
        };

        // 5. Resolve the hand-off target before anything is persisted
        let target = match &outcome {
            TurnOutcome::Handoff { action, .. } => {
                let target = self.router.registry().by_name(&action.target).ok_or_else(|| {
                    TurnError::Configuration(format!(
                        "hand-off target '{}' of agent '{}' is not loaded",
                        action.target,
                        agent.name()
                    ))
                })?;
                Some(target)
            }
            TurnOutcome::Reply(_) => None,
        };

        // 6. Move ownership first: a failed hand-off leaves the goal open and
        // the turn can be replayed.
        if let Some(target) = &target {
            self.router.assign_exclusive(&room_id, &user_id, target).await?;
        }

        // 7. Persist the goal unconditionally
        if let Err(e) = agent.goals.update_goal(&goal).await {
            if let Some(target) = &target {
                tracing::error!(
                    room_id = %room_id,
                    user_id = %user_id,
                    from = agent.name(),
                    to = target.name(),
                    goal_id = %goal.id(),
                    status = ?goal.status(),
                    error = %e,
                    "ownership moved but closed goal was not saved"
                );
            }
            return Err(e.into());
        }

        // 8. Reply, handing off when the goal ended
        let mut contents = Vec::with_capacity(2);
        match (outcome, target) {
            (TurnOutcome::Handoff { text, action }, Some(target)) => {
                self.say(&room_id, agent.sender(), &text).await?;
                self.messages
                    .append(ChatMessage::session_boundary(room_id.clone(), agent.sender()))
                    .await?;

                tracing::info!(
                    room_id = %room_id,
                    user_id = %user_id,
                    from = agent.name(),
                    to = target.name(),
                    reason = %action.reason,
                    "conversation handed off"
                );

                contents.push(ReplyContent {
                    agent: agent.name().to_string(),
                    text,
                    action: Some(action.action_name()),
                });

                if let Some(greeting) = greeting_of(&target) {
                    self.say(&room_id, target.sender(), &greeting).await?;
                    contents.push(ReplyContent {
                        agent: target.name().to_string(),
                        text: greeting,
                        action: None,
                    });
                }
            }
            (outcome, _) => {
                let text = outcome.text().to_string();
                self.say(&room_id, agent.sender(), &text).await?;
                contents.push(ReplyContent {
                    agent: agent.name().to_string(),
                    text,
                    action: None,
                });
            }
        }

        Ok(HandleMessageResult { contents })
    }

    async fn load_or_create_goal(
        &self,
        agent: &AgentRuntime,
        room_id: &RoomId,
        user_id: &UserId,
    ) -> Result<Goal, DomainError> {
        let query = GoalQuery::for_relationship(room_id.clone(), user_id.clone(), agent.id)
            .named(agent.definition.goal_name.clone())
            .in_progress();
        if let Some(goal) = agent.goals.get_goals_by_relationship(&query).await?.pop() {
            return Ok(goal);
        }

        let goal = Goal::new(
            room_id.clone(),
            user_id.clone(),
            agent.id,
            &agent.definition.goal_name,
            &agent.definition.line_items,
        );
        agent.goals.create_goal(&goal).await?;
        tracing::debug!(room_id = %room_id, user_id = %user_id, agent = agent.name(), goal_id = %goal.id(), "goal created");
        Ok(goal)
    }

    async fn say(&self, room_id: &RoomId, sender: Sender, text: &str) -> Result<(), DomainError> {
        self.messages
            .append(ChatMessage::new(room_id.clone(), sender, text))
            .await
    }
}

fn greeting_of(agent: &AgentRuntime) -> Option<String> {
    agent
        .definition
        .greeting
        .as_deref()
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
}
