//! Message Log Port - append-only chat history per room.

use async_trait::async_trait;

use crate::domain::dialogue::ChatMessage;
use crate::domain::foundation::{DomainError, RoomId};

#[async_trait]
pub trait MessageLog: Send + Sync {
    /// Appends a message to the room's history.
    async fn append(&self, message: ChatMessage) -> Result<(), DomainError>;

    /// The newest `limit` messages of the room, oldest first.
    async fn recent(&self, room_id: &RoomId, limit: usize) -> Result<Vec<ChatMessage>, DomainError>;
}
