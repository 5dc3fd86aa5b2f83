//! Relationship edges and hand-off actions used by the router.

mod handoff;
mod relationship;

pub use handoff::{HandoffAction, HandoffReason, SELECT_CHARACTER_PREFIX};
pub use relationship::{agent_key, user_key, Relationship, RelationshipKind};
