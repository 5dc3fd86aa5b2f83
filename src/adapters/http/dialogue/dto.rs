//! HTTP DTOs for dialogue endpoints.
//!
//! These types decouple the HTTP API from domain types. Field names are
//! camelCase to match the chat platforms that call in.

use serde::{Deserialize, Serialize};

use crate::application::{AgentRuntime, ReplyContent};
use crate::domain::goal::Goal;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One inbound chat message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest {
    pub room_id: String,
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetGoalsRequest {
    pub room_id: String,
    pub user_id: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentResponse {
    pub agent: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub action: Option<String>,
}

impl From<ReplyContent> for ContentResponse {
    fn from(content: ReplyContent) -> Self {
        Self {
            agent: content.agent,
            text: content.text,
            action: content.action,
        }
    }
}

/// Zero, one or two messages to post back to the room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub contents: Vec<ContentResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetGoalsResponse {
    pub goal_id: String,
    pub goal_name: String,
    pub objectives: usize,
    pub removed: usize,
}

impl ResetGoalsResponse {
    pub fn new(goal: &Goal, removed: usize) -> Self {
        Self {
            goal_id: goal.id().to_string(),
            goal_name: goal.name().to_string(),
            objectives: goal.objectives().len(),
            removed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSummaryResponse {
    pub id: String,
    pub name: String,
    pub goal_name: String,
    pub is_default: bool,
    pub line_items: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub on_complete: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub on_cancel: Option<String>,
}

impl From<&AgentRuntime> for AgentSummaryResponse {
    fn from(agent: &AgentRuntime) -> Self {
        Self {
            id: agent.id.to_string(),
            name: agent.definition.name.clone(),
            goal_name: agent.definition.goal_name.clone(),
            is_default: agent.definition.is_default,
            line_items: agent.definition.line_items.len(),
            on_complete: agent.definition.on_complete.clone(),
            on_cancel: agent.definition.on_cancel.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentListResponse {
    pub agents: Vec<AgentSummaryResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub agents: usize,
    pub model: String,
}

/// Error body shared by all dialogue endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_request_reads_camel_case() {
        let req: MessageRequest = serde_json::from_str(
            r#"{"roomId":"r1","userId":"sam#1","userName":"Sam","text":"hi"}"#,
        )
        .unwrap();
        assert_eq!(req.room_id, "r1");
        assert_eq!(req.user_name.as_deref(), Some("Sam"));

        let req: MessageRequest =
            serde_json::from_str(r#"{"roomId":"r1","userId":"sam#1","text":"hi"}"#).unwrap();
        assert!(req.user_name.is_none());
    }

    #[test]
    fn content_without_action_omits_field() {
        let json = serde_json::to_value(ContentResponse {
            agent: "Scout".to_string(),
            text: "Which color?".to_string(),
            action: None,
        })
        .unwrap();
        assert!(json.get("action").is_none());
    }
}
