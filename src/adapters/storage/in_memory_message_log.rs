//! In-Memory Message Log Adapter

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::dialogue::ChatMessage;
use crate::domain::foundation::{DomainError, RoomId};
use crate::ports::MessageLog;

/// Per-room message history kept in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageLog {
    rooms: Arc<RwLock<HashMap<RoomId, Vec<ChatMessage>>>>,
}

impl InMemoryMessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full history of a room, oldest first.
    pub async fn all(&self, room_id: &RoomId) -> Vec<ChatMessage> {
        self.rooms
            .read()
            .await
            .get(room_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl MessageLog for InMemoryMessageLog {
    async fn append(&self, message: ChatMessage) -> Result<(), DomainError> {
        self.rooms
            .write()
            .await
            .entry(message.room_id.clone())
            .or_default()
            .push(message);
        Ok(())
    }

    async fn recent(&self, room_id: &RoomId, limit: usize) -> Result<Vec<ChatMessage>, DomainError> {
        let rooms = self.rooms.read().await;
        let messages = rooms.get(room_id).map(Vec::as_slice).unwrap_or_default();
        let start = messages.len().saturating_sub(limit);
        Ok(messages[start..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::Sender;
    use crate::domain::foundation::UserId;

    fn message(room: &str, text: &str) -> ChatMessage {
        ChatMessage::new(
            RoomId::new(room).unwrap(),
            Sender::new(UserId::new("u").unwrap(), "Sam"),
            text,
        )
    }

    #[tokio::test]
    async fn recent_returns_newest_in_chronological_order() {
        let log = InMemoryMessageLog::new();
        for text in ["one", "two", "three"] {
            log.append(message("r", text)).await.unwrap();
        }

        let recent = log.recent(&RoomId::new("r").unwrap(), 2).await.unwrap();
        let texts: Vec<_> = recent.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["two", "three"]);
    }

    #[tokio::test]
    async fn rooms_are_isolated() {
        let log = InMemoryMessageLog::new();
        log.append(message("a", "hi")).await.unwrap();

        assert!(log.recent(&RoomId::new("b").unwrap(), 10).await.unwrap().is_empty());
        assert_eq!(log.all(&RoomId::new("a").unwrap()).await.len(), 1);
    }
}
