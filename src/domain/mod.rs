//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `line_item` - Declarative field descriptions, their validator and value extraction
//! - `goal` - Goal aggregate and its objectives
//! - `dialogue` - Session delimiter, question builder, categories and prompt templates
//! - `routing` - Relationship edges and hand-off actions

pub mod dialogue;
pub mod foundation;
pub mod goal;
pub mod line_item;
pub mod routing;
