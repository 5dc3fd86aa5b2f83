//! Agent roster configuration
//!
//! The roster is a YAML file listing every agent persona the service loads,
//! the goal each one runs and where it hands the user off when done.
//! Line items are not validated here; each one is checked the first time
//! its objective becomes current.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::domain::line_item::LineItem;

use super::error::{RosterError, ValidationError};

/// Where the roster lives and how much history the engine reads.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentsConfig {
    /// Path to the YAML roster
    #[serde(default = "default_roster_path")]
    pub roster_path: String,

    /// Messages loaded from the room log per turn
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl AgentsConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.roster_path.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AGENTS__ROSTER_PATH"));
        }
        if self.history_limit == 0 {
            return Err(ValidationError::InvalidHistoryLimit);
        }
        Ok(())
    }
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            roster_path: default_roster_path(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_roster_path() -> String {
    "agents.yaml".to_string()
}

fn default_history_limit() -> usize {
    50
}

/// One agent persona.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDefinition {
    pub name: String,
    pub goal_name: String,
    /// Sent by this agent when it receives a hand-off
    #[serde(default)]
    pub greeting: Option<String>,
    /// Agent that takes over when the goal completes
    #[serde(default)]
    pub on_complete: Option<String>,
    /// Agent that takes over when the user cancels
    #[serde(default)]
    pub on_cancel: Option<String>,
    /// Serves users nobody owns yet
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

/// The parsed, structurally checked roster.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AgentRoster {
    pub agents: Vec<AgentDefinition>,
}

impl AgentRoster {
    /// Reads and checks the roster file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| RosterError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, RosterError> {
        let roster: AgentRoster = serde_yaml::from_str(yaml)?;
        roster.validate()?;
        Ok(roster)
    }

    /// Checks names and hand-off targets.
    pub fn validate(&self) -> Result<(), RosterError> {
        if self.agents.is_empty() {
            return Err(RosterError::Empty);
        }

        let mut names = HashSet::new();
        for agent in &self.agents {
            let name = agent.name.trim();
            if name.is_empty() {
                return Err(RosterError::EmptyName);
            }
            if !names.insert(name) {
                return Err(RosterError::DuplicateName(name.to_string()));
            }
        }

        let defaults: Vec<String> = self
            .agents
            .iter()
            .filter(|a| a.is_default)
            .map(|a| a.name.clone())
            .collect();
        if defaults.len() > 1 {
            return Err(RosterError::MultipleDefaults(defaults));
        }

        for agent in &self.agents {
            for target in [&agent.on_complete, &agent.on_cancel].into_iter().flatten() {
                if !names.contains(target.trim()) {
                    return Err(RosterError::UnknownHandoffTarget {
                        agent: agent.name.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&AgentDefinition> {
        self.agents.iter().find(|a| a.name == name)
    }

    pub fn default_agent(&self) -> Option<&AgentDefinition> {
        self.agents.iter().find(|a| a.is_default)
    }
}
