//! Chat messages as recorded in a room's log.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MessageId, RoomId, Timestamp, UserId};

use super::session::SESSION_BOUNDARY_MARKER;

/// Who wrote a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub user_id: UserId,
    pub name: String,
}

impl Sender {
    pub fn new(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
        }
    }
}

/// An immutable message in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub room_id: RoomId,
    pub sender: Sender,
    pub text: String,
    pub created_at: Timestamp,
}

impl ChatMessage {
    pub fn new(room_id: RoomId, sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            room_id,
            sender,
            text: text.into(),
            created_at: Timestamp::now(),
        }
    }

    /// The marker message that closes a session for the session delimiter.
    pub fn session_boundary(room_id: RoomId, sender: Sender) -> Self {
        Self::new(room_id, sender, SESSION_BOUNDARY_MARKER)
    }

    /// Single-line rendering used in classification prompts.
    pub fn format_line(&self) -> String {
        format!("{}: {}", self.sender.name, self.text)
    }
}
