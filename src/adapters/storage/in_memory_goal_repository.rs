//! In-Memory Goal Repository Adapter
//!
//! Stores goals for one agent in memory. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{AgentId, DomainError, ErrorCode, GoalId, RoomId, UserId};
use crate::domain::goal::{Goal, GoalStatus};
use crate::ports::{GoalQuery, GoalRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryGoalRepository {
    goals: Arc<RwLock<HashMap<GoalId, Goal>>>,
}

impl InMemoryGoalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored goals
    pub async fn goal_count(&self) -> usize {
        self.goals.read().await.len()
    }
}

#[async_trait]
impl GoalRepository for InMemoryGoalRepository {
    async fn get_goals_by_relationship(&self, query: &GoalQuery) -> Result<Vec<Goal>, DomainError> {
        let goals = self.goals.read().await;
        let mut found: Vec<Goal> = goals.values().filter(|g| query.matches(g)).cloned().collect();
        found.sort_by_key(|g| g.created_at());
        Ok(found)
    }

    async fn create_goal(&self, goal: &Goal) -> Result<(), DomainError> {
        let mut goals = self.goals.write().await;
        if goals.contains_key(&goal.id()) {
            return Err(DomainError::new(ErrorCode::DuplicateGoal, "goal already exists")
                .with_detail("goal_id", goal.id().to_string()));
        }
        if goal.status() == GoalStatus::InProgress {
            let open = GoalQuery::for_relationship(
                goal.room_id().clone(),
                goal.user_id().clone(),
                goal.agent_id(),
            )
            .named(goal.name())
            .in_progress();
            if let Some(existing) = goals.values().find(|g| open.matches(g)) {
                return Err(DomainError::new(
                    ErrorCode::DuplicateGoal,
                    "an in-progress goal with this name already exists",
                )
                .with_detail("goal_id", existing.id().to_string())
                .with_detail("goal_name", goal.name()));
            }
        }
        goals.insert(goal.id(), goal.clone());
        Ok(())
    }

    async fn update_goal(&self, goal: &Goal) -> Result<(), DomainError> {
        let mut goals = self.goals.write().await;
        match goals.get_mut(&goal.id()) {
            Some(existing) => {
                *existing = goal.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::GoalNotFound, "goal not found")
                .with_detail("goal_id", goal.id().to_string())),
        }
    }

    async fn remove_goals_by_relationship(
        &self,
        room_id: &RoomId,
        user_id: &UserId,
        agent_id: AgentId,
    ) -> Result<usize, DomainError> {
        let query = GoalQuery::for_relationship(room_id.clone(), user_id.clone(), agent_id);
        let mut goals = self.goals.write().await;
        let before = goals.len();
        goals.retain(|_, g| !query.matches(g));
        Ok(before - goals.len())
    }
}
