//! Goal engine - turn-by-turn form filling driven by model classification.

mod goal_engine;
mod result_classifier;

pub use goal_engine::{GoalEngine, TurnContext, TurnError, TurnOutcome};
pub use result_classifier::ResultClassifier;
