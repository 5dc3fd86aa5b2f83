//! HTTP adapters - REST API implementations.

pub mod dialogue;

pub use dialogue::{dialogue_routes, DialogueHandlers};
