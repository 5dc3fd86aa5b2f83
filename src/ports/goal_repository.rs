//! Goal Repository Port - persistence for goals.
//!
//! Goals are read at the start of a turn and rewritten at the end whether or
//! not they changed, so `update_goal` must tolerate idempotent overwrites.

use async_trait::async_trait;

use crate::domain::foundation::{AgentId, DomainError, RoomId, UserId};
use crate::domain::goal::{Goal, GoalStatus};

/// Lookup by relationship, optionally narrowed to one goal name and status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalQuery {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub agent_id: AgentId,
    pub name: Option<String>,
    pub status: Option<GoalStatus>,
}

impl GoalQuery {
    pub fn for_relationship(room_id: RoomId, user_id: UserId, agent_id: AgentId) -> Self {
        Self {
            room_id,
            user_id,
            agent_id,
            name: None,
            status: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn in_progress(mut self) -> Self {
        self.status = Some(GoalStatus::InProgress);
        self
    }

    pub fn matches(&self, goal: &Goal) -> bool {
        goal.room_id() == &self.room_id
            && goal.user_id() == &self.user_id
            && goal.agent_id() == self.agent_id
            && self.name.as_deref().map_or(true, |n| goal.name() == n)
            && self.status.map_or(true, |s| goal.status() == s)
    }
}

/// Storage for goals.
#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// Goals matching `query`, oldest first.
    async fn get_goals_by_relationship(&self, query: &GoalQuery) -> Result<Vec<Goal>, DomainError>;

    /// Stores a new goal.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateGoal` if a goal with the same id exists, or if
    /// `goal` is in progress and the relationship already has an in-progress
    /// goal with the same name.
    async fn create_goal(&self, goal: &Goal) -> Result<(), DomainError>;

    /// Overwrites an existing goal.
    ///
    /// # Errors
    ///
    /// Returns `GoalNotFound` if the goal was never created.
    async fn update_goal(&self, goal: &Goal) -> Result<(), DomainError>;

    /// Deletes every goal for the relationship. Returns how many were removed.
    async fn remove_goals_by_relationship(
        &self,
        room_id: &RoomId,
        user_id: &UserId,
        agent_id: AgentId,
    ) -> Result<usize, DomainError>;
}
