//! Relationship Repository Port - per-agent relationship edge storage.
//!
//! Each loaded agent owns one repository. The router fans out across all of
//! them to find the agent that currently owns a (room, user) pair.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, RelationshipId, RoomId};
use crate::domain::routing::{Relationship, RelationshipKind};

/// Filter for relationship lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipQuery {
    pub room_id: RoomId,
    pub kind: RelationshipKind,
    pub user_a: String,
    /// When set, only edges to this exact counterpart match.
    pub user_b: Option<String>,
}

impl RelationshipQuery {
    pub fn new(room_id: RoomId, kind: RelationshipKind, user_a: impl Into<String>) -> Self {
        Self {
            room_id,
            kind,
            user_a: user_a.into(),
            user_b: None,
        }
    }

    pub fn with_user_b(mut self, user_b: impl Into<String>) -> Self {
        self.user_b = Some(user_b.into());
        self
    }

    pub fn matches(&self, edge: &Relationship) -> bool {
        edge.room_id == self.room_id
            && edge.kind == self.kind
            && edge.user_a == self.user_a
            && self.user_b.as_ref().map_or(true, |b| &edge.user_b == b)
    }
}

/// Storage for relationship edges.
#[async_trait]
pub trait RelationshipRepository: Send + Sync {
    /// Returns every edge matching `query`, oldest first.
    async fn get_relationships(&self, query: &RelationshipQuery) -> Result<Vec<Relationship>, DomainError>;

    /// Stores a new edge.
    async fn create_relationship(&self, relationship: &Relationship) -> Result<(), DomainError>;

    /// Removes an edge. Removing an unknown id is not an error.
    async fn remove_relationship(&self, id: RelationshipId) -> Result<(), DomainError>;
}
