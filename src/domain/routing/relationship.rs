//! Relationship edges stored per agent.
//!
//! Two kinds exist. An *identity* edge maps a platform user handle in a room
//! to a stable internal user id. An *ownership* edge ties a (room, user)
//! pair to the agent currently allowed to talk to them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{RelationshipId, RoomId, Timestamp, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    Identity,
    Ownership,
}

/// A directed edge `user_a -> user_b` scoped to a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: RelationshipId,
    pub kind: RelationshipKind,
    pub user_a: String,
    pub user_b: String,
    pub room_id: RoomId,
    pub created_at: Timestamp,
}

impl Relationship {
    /// Ownership edge: the user in `room_id` is served by `agent_name`.
    pub fn ownership(room_id: &RoomId, user_id: &UserId, agent_name: &str) -> Self {
        Self::build(
            RelationshipKind::Ownership,
            user_key(room_id, user_id.as_str()),
            agent_key(room_id, agent_name),
            room_id.clone(),
        )
    }

    /// Identity edge: `platform_user` in `room_id` is the internal `user_id`.
    pub fn identity(room_id: &RoomId, platform_user: &str, user_id: &UserId) -> Self {
        Self::build(
            RelationshipKind::Identity,
            user_key(room_id, platform_user),
            user_id.as_str().to_string(),
            room_id.clone(),
        )
    }

    fn build(kind: RelationshipKind, user_a: String, user_b: String, room_id: RoomId) -> Self {
        Self {
            id: RelationshipId::new(),
            kind,
            user_a,
            user_b,
            room_id,
            created_at: Timestamp::now(),
        }
    }

    /// The agent name encoded in an ownership edge.
    pub fn owner_name(&self) -> Option<&str> {
        if self.kind != RelationshipKind::Ownership {
            return None;
        }
        let prefix = format!("{}::{}", self.room_id, AGENT_MARKER);
        self.user_b.strip_prefix(prefix.as_str())
    }
}

const AGENT_MARKER: &str = "character->";

/// Key for a user inside a room: `<roomId>::<user>`.
pub fn user_key(room_id: &RoomId, user: &str) -> String {
    format!("{}::{}", room_id, user)
}

/// Key for an agent inside a room: `<roomId>::character-><name>`.
pub fn agent_key(room_id: &RoomId, agent_name: &str) -> String {
    format!("{}::{}{}", room_id, AGENT_MARKER, agent_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> RoomId {
        RoomId::new("room-9").unwrap()
    }

    #[test]
    fn ownership_edge_uses_room_scoped_keys() {
        let user = UserId::new("u-1").unwrap();
        let edge = Relationship::ownership(&room(), &user, "Scout");

        assert_eq!(edge.user_a, "room-9::u-1");
        assert_eq!(edge.user_b, "room-9::character->Scout");
        assert_eq!(edge.owner_name(), Some("Scout"));
    }

    #[test]
    fn identity_edge_has_no_owner() {
        let user = UserId::new("0f7c").unwrap();
        let edge = Relationship::identity(&room(), "discord#42", &user);

        assert_eq!(edge.user_a, "room-9::discord#42");
        assert_eq!(edge.user_b, "0f7c");
        assert_eq!(edge.owner_name(), None);
    }

    #[test]
    fn owner_name_keeps_names_containing_separators() {
        let user = UserId::new("u").unwrap();
        let edge = Relationship::ownership(&room(), &user, "Mr::Fix");
        assert_eq!(edge.owner_name(), Some("Mr::Fix"));
    }
}
