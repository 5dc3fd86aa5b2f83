//! Loaded agents and their per-agent stores.

use std::sync::Arc;

use crate::adapters::storage::{InMemoryGoalRepository, InMemoryRelationshipRepository};
use crate::config::{AgentDefinition, AgentRoster};
use crate::domain::dialogue::Sender;
use crate::domain::foundation::{AgentId, UserId};
use crate::ports::{GoalRepository, RelationshipRepository};

/// One running agent persona.
pub struct AgentRuntime {
    pub id: AgentId,
    pub definition: AgentDefinition,
    pub relationships: Arc<dyn RelationshipRepository>,
    pub goals: Arc<dyn GoalRepository>,
}

impl AgentRuntime {
    pub fn new(
        definition: AgentDefinition,
        relationships: Arc<dyn RelationshipRepository>,
        goals: Arc<dyn GoalRepository>,
    ) -> Self {
        Self {
            id: AgentId::new(),
            definition,
            relationships,
            goals,
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Message-log identity of this agent.
    pub fn sender(&self) -> Sender {
        Sender::new(UserId::for_agent(self.id), self.definition.name.clone())
    }
}

impl std::fmt::Debug for AgentRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRuntime")
            .field("id", &self.id)
            .field("name", &self.definition.name)
            .finish()
    }
}

/// Every agent loaded from the roster, in roster order.
#[derive(Debug, Default)]
pub struct AgentRegistry {
    agents: Vec<Arc<AgentRuntime>>,
}

impl AgentRegistry {
    pub fn new(agents: Vec<AgentRuntime>) -> Self {
        Self {
            agents: agents.into_iter().map(Arc::new).collect(),
        }
    }

    /// Builds a registry where each agent gets its own in-memory stores.
    pub fn in_memory(roster: &AgentRoster) -> Self {
        let agents = roster
            .agents
            .iter()
            .cloned()
            .map(|definition| {
                AgentRuntime::new(
                    definition,
                    Arc::new(InMemoryRelationshipRepository::new()),
                    Arc::new(InMemoryGoalRepository::new()),
                )
            })
            .collect();
        Self::new(agents)
    }

    pub fn all(&self) -> &[Arc<AgentRuntime>] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn by_id(&self, id: AgentId) -> Option<Arc<AgentRuntime>> {
        self.agents.iter().find(|a| a.id == id).cloned()
    }

    /// Case-sensitive name lookup.
    pub fn by_name(&self, name: &str) -> Option<Arc<AgentRuntime>> {
        self.agents.iter().find(|a| a.name() == name).cloned()
    }

    /// Accepts either an agent id or an agent name.
    pub fn lookup(&self, key: &str) -> Option<Arc<AgentRuntime>> {
        key.parse::<AgentId>()
            .ok()
            .and_then(|id| self.by_id(id))
            .or_else(|| self.by_name(key))
    }

    pub fn default_agent(&self) -> Option<Arc<AgentRuntime>> {
        self.agents.iter().find(|a| a.definition.is_default).cloned()
    }
}
