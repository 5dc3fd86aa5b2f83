//! Errors raised by the pure dialogue components.

use crate::domain::line_item::ViolationList;

/// Fatal dialogue failures. Each aborts the current turn.
///
/// Model output that cannot be classified is not an error: it is
/// normalized to the `Retry` category instead.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum DialogueError {
    /// The current objective's line item is malformed.
    #[error("{0}")]
    SchemaViolation(ViolationList),

    /// An internal contract was broken (e.g. the pending question is not in
    /// the history window, or inverted bounds reached the question builder).
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),
}

impl DialogueError {
    pub fn protocol(message: impl Into<String>) -> Self {
        DialogueError::ProtocolViolation(message.into())
    }
}

impl From<ViolationList> for DialogueError {
    fn from(list: ViolationList) -> Self {
        DialogueError::SchemaViolation(list)
    }
}
