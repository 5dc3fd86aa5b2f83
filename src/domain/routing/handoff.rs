//! Hand-off actions emitted when a goal ends.

use serde::{Deserialize, Serialize};

/// Prefix of the action string that selects the next agent.
pub const SELECT_CHARACTER_PREFIX: &str = "SELECT_CHARACTER_";

/// Why a goal is handing the user to another agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandoffReason {
    Completed,
    Cancelled,
}

impl std::fmt::Display for HandoffReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandoffReason::Completed => write!(f, "completed"),
            HandoffReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Request to transfer ownership of the conversation to `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffAction {
    pub target: String,
    pub reason: HandoffReason,
}

impl HandoffAction {
    pub fn new(target: impl Into<String>, reason: HandoffReason) -> Self {
        Self {
            target: target.into(),
            reason,
        }
    }

    /// The action string placed on the reply, e.g. `SELECT_CHARACTER_Scout`.
    pub fn action_name(&self) -> String {
        format!("{}{}", SELECT_CHARACTER_PREFIX, self.target)
    }

    /// Extracts the target agent name from an action string.
    ///
    /// The prefix is matched case-sensitively; an empty target is rejected.
    pub fn parse_target(action: &str) -> Option<&str> {
        action
            .strip_prefix(SELECT_CHARACTER_PREFIX)
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_name_round_trips() {
        let action = HandoffAction::new("Closer", HandoffReason::Completed);
        assert_eq!(action.action_name(), "SELECT_CHARACTER_Closer");
        assert_eq!(HandoffAction::parse_target(&action.action_name()), Some("Closer"));
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(HandoffAction::parse_target("select_character_Closer"), None);
    }

    #[test]
    fn parse_rejects_empty_target() {
        assert_eq!(HandoffAction::parse_target("SELECT_CHARACTER_"), None);
        assert_eq!(HandoffAction::parse_target("NONE"), None);
    }
}
