//! Dialogue command handlers.

mod handle_message;
mod reset_goals;

pub use handle_message::{
    HandleMessageCommand, HandleMessageError, HandleMessageHandler, HandleMessageResult, ReplyContent,
};
pub use reset_goals::{ResetGoalsCommand, ResetGoalsError, ResetGoalsHandler, ResetGoalsResult};
