//! Session delimiter.
//!
//! Cuts the room history at the most recent session boundary or at the
//! pending question, whichever comes first walking backwards, so answers
//! from an earlier session are never read as answers to the current one.

use super::errors::DialogueError;
use super::message::ChatMessage;

/// Text recorded whenever a goal session ends or is reset.
pub const SESSION_BOUNDARY_MARKER: &str = "[[end of session]]";

/// Lines that terminate the backwards walk (inclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopSet {
    entries: [String; 2],
}

impl StopSet {
    /// The boundary marker plus the question most recently asked.
    pub fn for_question(question: impl Into<String>) -> Self {
        Self {
            entries: [SESSION_BOUNDARY_MARKER.to_string(), question.into()],
        }
    }

    pub fn question(&self) -> &str {
        &self.entries[1]
    }

    fn matched_by(&self, line: &str) -> Option<&str> {
        self.entries
            .iter()
            .filter(|entry| !entry.is_empty())
            .find(|entry| line.contains(entry.as_str()))
            .map(String::as_str)
    }
}

/// The slice of history that belongs to the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionWindow {
    /// Formatted lines, oldest first.
    lines: Vec<String>,
    /// The stop entry that ended the walk, if any.
    stopped_at: Option<String>,
}

impl SessionWindow {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn stopped_at(&self) -> Option<&str> {
        self.stopped_at.as_deref()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }

    /// Newline-joined text for prompt templates.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Walks `messages` (oldest first) from the newest backwards, stopping
/// inclusively at the first line that contains a stop-set entry.
pub fn format_with_stop(messages: &[ChatMessage], stop: &StopSet) -> SessionWindow {
    let mut lines = Vec::new();
    let mut stopped_at = None;

    for message in messages.iter().rev() {
        let line = message.format_line();
        let hit = stop.matched_by(&line).map(str::to_string);
        lines.push(line);
        if hit.is_some() {
            stopped_at = hit;
            break;
        }
    }

    lines.reverse();
    SessionWindow { lines, stopped_at }
}

/// Delimits the history for a pending question and proves it was sent.
///
/// A missing question means the engine believes it asked something the
/// log has no record of, which is a protocol violation.
pub fn window_for_question(
    messages: &[ChatMessage],
    question: &str,
) -> Result<SessionWindow, DialogueError> {
    let stop = StopSet::for_question(question);
    let window = format_with_stop(messages, &stop);

    if window.stopped_at() != Some(stop.question()) {
        return Err(DialogueError::protocol(format!(
            "pending question {:?} not found in the current session window ({} lines)",
            question,
            window.lines().len()
        )));
    }
    Ok(window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::message::Sender;
    use crate::domain::foundation::{RoomId, UserId};

    fn room() -> RoomId {
        RoomId::new("room-1").unwrap()
    }

    fn user(text: &str) -> ChatMessage {
        ChatMessage::new(room(), Sender::new(UserId::new("u1").unwrap(), "Sam"), text)
    }

    fn agent(text: &str) -> ChatMessage {
        ChatMessage::new(room(), Sender::new(UserId::new("a1").unwrap(), "Scout"), text)
    }

    fn boundary() -> ChatMessage {
        ChatMessage::session_boundary(room(), Sender::new(UserId::new("a1").unwrap(), "Scout"))
    }

    #[test]
    fn stops_inclusively_at_the_question() {
        let log = vec![
            user("hello"),
            agent("What color would you like?"),
            user("red"),
        ];
        let window = format_with_stop(&log, &StopSet::for_question("What color would you like?"));

        assert_eq!(
            window.lines(),
            &["Scout: What color would you like?".to_string(), "Sam: red".to_string()]
        );
        assert_eq!(window.stopped_at(), Some("What color would you like?"));
    }

    #[test]
    fn boundary_hides_answers_from_previous_session() {
        let log = vec![
            agent("What color would you like?"),
            user("blue"),
            boundary(),
            user("hi again"),
        ];
        let window = format_with_stop(&log, &StopSet::for_question("What color would you like?"));

        assert_eq!(window.lines().len(), 2);
        assert!(!window.contains("blue"));
        assert_eq!(window.stopped_at(), Some(SESSION_BOUNDARY_MARKER));
    }

    #[test]
    fn walks_whole_log_when_nothing_matches() {
        let log = vec![user("a"), user("b")];
        let window = format_with_stop(&log, &StopSet::for_question("never asked"));

        assert_eq!(window.lines().len(), 2);
        assert_eq!(window.stopped_at(), None);
        assert_eq!(window.text(), "Sam: a\nSam: b");
    }

    #[test]
    fn question_located_before_boundary_is_a_protocol_violation() {
        let log = vec![agent("How many?"), boundary(), user("3")];
        let err = window_for_question(&log, "How many?").unwrap_err();
        assert!(matches!(err, DialogueError::ProtocolViolation(_)));
    }

    #[test]
    fn question_in_window_is_accepted() {
        let log = vec![agent("Sorry, I didn't follow.\n\nHow many?"), user("3")];
        let window = window_for_question(&log, "How many?").unwrap();
        assert!(window.contains("Sam: 3"));
    }

    #[test]
    fn empty_log_is_a_protocol_violation() {
        assert!(window_for_question(&[], "How many?").is_err());
    }
}
