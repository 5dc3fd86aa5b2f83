//! Application handlers.
//!
//! Command handlers that orchestrate routing, the goal engine and the ports.

pub mod dialogue;

pub use dialogue::{
    HandleMessageCommand, HandleMessageError, HandleMessageHandler, HandleMessageResult, ReplyContent,
    ResetGoalsCommand, ResetGoalsError, ResetGoalsHandler, ResetGoalsResult,
};
