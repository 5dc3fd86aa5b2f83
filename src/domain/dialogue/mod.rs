//! Pure dialogue components: message log entries, the session delimiter,
//! the question builder, classification categories and prompt templates.

mod category;
mod errors;
mod message;
mod question;
mod session;
pub mod templates;

pub use category::{
    Category, Classification, ClassificationMode, HelpCategory, MainCategory, PreliminaryCategory,
};
pub use errors::DialogueError;
pub use message::{ChatMessage, Sender};
pub use question::build_question;
pub use session::{format_with_stop, window_for_question, SessionWindow, StopSet, SESSION_BOUNDARY_MARKER};
