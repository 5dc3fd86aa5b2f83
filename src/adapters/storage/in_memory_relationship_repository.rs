//! In-Memory Relationship Repository Adapter
//!
//! Keeps relationship edges for one agent in memory.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, RelationshipId};
use crate::domain::routing::Relationship;
use crate::ports::{RelationshipQuery, RelationshipRepository};

/// In-memory edge store, insertion ordered.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRelationshipRepository {
    edges: Arc<RwLock<Vec<Relationship>>>,
}

impl InMemoryRelationshipRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.edges.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.edges.read().await.is_empty()
    }

    /// Clear all stored edges (useful for tests)
    pub async fn clear(&self) {
        self.edges.write().await.clear();
    }
}

#[async_trait]
impl RelationshipRepository for InMemoryRelationshipRepository {
    async fn get_relationships(&self, query: &RelationshipQuery) -> Result<Vec<Relationship>, DomainError> {
        let edges = self.edges.read().await;
        Ok(edges.iter().filter(|e| query.matches(e)).cloned().collect())
    }

    async fn create_relationship(&self, relationship: &Relationship) -> Result<(), DomainError> {
        self.edges.write().await.push(relationship.clone());
        Ok(())
    }

    async fn remove_relationship(&self, id: RelationshipId) -> Result<(), DomainError> {
        self.edges.write().await.retain(|e| e.id != id);
        Ok(())
    }
}
