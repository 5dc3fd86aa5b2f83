//! BOM Concierge - guided form filling for multi-agent chat rooms
//!
//! Each agent persona owns a goal: an ordered list of line items to collect
//! from a user. A language model classifies every reply into a small closed
//! set of intents, the goal engine advances the objectives, and finished or
//! cancelled goals hand the conversation to another agent.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
