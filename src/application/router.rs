//! Relationship router.
//!
//! Decides which agent owns a (room, user) conversation. Ownership is never
//! cached: every turn recomputes it from the agents' relationship stores.

use futures::future::join_all;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, RoomId, UserId};
use crate::domain::routing::{agent_key, user_key, Relationship, RelationshipKind};
use crate::ports::{RelationshipQuery, RelationshipRepository};

use super::agents::{AgentRegistry, AgentRuntime};

/// Errors raised while routing.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// A hand-off named an agent that is not loaded.
    #[error("unknown agent '{0}'")]
    UnknownAgent(String),

    #[error(transparent)]
    Storage(#[from] DomainError),
}

/// Who answers this turn.
#[derive(Debug, Clone)]
pub struct RouteDecision {
    pub owner: Arc<AgentRuntime>,
    /// True when ownership was established during this call.
    pub newly_assigned: bool,
}

pub struct RelationshipRouter {
    registry: Arc<AgentRegistry>,
    identities: Arc<dyn RelationshipRepository>,
}

impl RelationshipRouter {
    pub fn new(registry: Arc<AgentRegistry>, identities: Arc<dyn RelationshipRepository>) -> Self {
        Self {
            registry,
            identities,
        }
    }

    pub fn registry(&self) -> &Arc<AgentRegistry> {
        &self.registry
    }

    /// Maps a platform user handle to its stable internal id, creating the
    /// mapping on first sight.
    pub async fn resolve_identity(
        &self,
        room_id: &RoomId,
        platform_user: &str,
    ) -> Result<UserId, RouterError> {
        let query = RelationshipQuery::new(
            room_id.clone(),
            RelationshipKind::Identity,
            user_key(room_id, platform_user),
        );
        let existing = self.identities.get_relationships(&query).await?;

        if let Some(edge) = existing.first() {
            return Ok(UserId::new(edge.user_b.clone()).map_err(DomainError::from)?);
        }

        let user_id = UserId::generated();
        self.identities
            .create_relationship(&Relationship::identity(room_id, platform_user, &user_id))
            .await?;
        tracing::debug!(room_id = %room_id, platform_user, user_id = %user_id, "identity created");
        Ok(user_id)
    }

    /// Finds the agent that owns the conversation, querying all agents in
    /// parallel.
    pub async fn resolve_owner(
        &self,
        room_id: &RoomId,
        user_id: &UserId,
    ) -> Result<Option<Arc<AgentRuntime>>, RouterError> {
        let lookups = self.registry.all().iter().map(|agent| {
            let query = ownership_query(room_id, user_id).with_user_b(agent_key(room_id, agent.name()));
            let agent = agent.clone();
            async move {
                let edges = agent.relationships.get_relationships(&query).await?;
                Ok::<_, DomainError>(edges.into_iter().map(move |edge| (agent.clone(), edge)))
            }
        });

        let mut owners: Vec<(Arc<AgentRuntime>, Relationship)> = Vec::new();
        for result in join_all(lookups).await {
            owners.extend(result?);
        }

        if owners.len() > 1 {
            tracing::warn!(
                room_id = %room_id,
                user_id = %user_id,
                owners = ?owners.iter().map(|(a, _)| a.name().to_string()).collect::<Vec<_>>(),
                "multiple ownership edges found, using the newest"
            );
        }

        Ok(owners
            .into_iter()
            .max_by_key(|(_, edge)| edge.created_at)
            .map(|(agent, _)| agent))
    }

    /// Makes `target` the only owner of the conversation.
    ///
    /// Existing edges are removed from every agent's store before the new
    /// edge is written, so two owners never coexist.
    pub async fn assign_exclusive(
        &self,
        room_id: &RoomId,
        user_id: &UserId,
        target: &AgentRuntime,
    ) -> Result<(), RouterError> {
        let query = ownership_query(room_id, user_id);

        for agent in self.registry.all() {
            for edge in agent.relationships.get_relationships(&query).await? {
                agent.relationships.remove_relationship(edge.id).await?;
            }
        }

        target
            .relationships
            .create_relationship(&Relationship::ownership(room_id, user_id, target.name()))
            .await?;

        tracing::info!(room_id = %room_id, user_id = %user_id, agent = target.name(), "ownership assigned");
        Ok(())
    }

    /// Hands the conversation to the agent named in a hand-off action.
    pub async fn hand_off(
        &self,
        room_id: &RoomId,
        user_id: &UserId,
        target_name: &str,
    ) -> Result<Arc<AgentRuntime>, RouterError> {
        let target = self
            .registry
            .by_name(target_name)
            .ok_or_else(|| RouterError::UnknownAgent(target_name.to_string()))?;
        self.assign_exclusive(room_id, user_id, &target).await?;
        Ok(target)
    }

    /// Resolves the owner, assigning one when nobody owns the conversation.
    ///
    /// The roster's default agent wins when present, otherwise the agent the
    /// message was addressed to.
    pub async fn route(
        &self,
        room_id: &RoomId,
        user_id: &UserId,
        addressed: &Arc<AgentRuntime>,
    ) -> Result<RouteDecision, RouterError> {
        if let Some(owner) = self.resolve_owner(room_id, user_id).await? {
            return Ok(RouteDecision {
                owner,
                newly_assigned: false,
            });
        }

        let owner = self.registry.default_agent().unwrap_or_else(|| addressed.clone());
        self.assign_exclusive(room_id, user_id, &owner).await?;
        Ok(RouteDecision {
            owner,
            newly_assigned: true,
        })
    }
}

fn ownership_query(room_id: &RoomId, user_id: &UserId) -> RelationshipQuery {
    RelationshipQuery::new(
        room_id.clone(),
        RelationshipKind::Ownership,
        user_key(room_id, user_id.as_str()),
    )
}
