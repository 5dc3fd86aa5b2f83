//! GoalStatus enum for tracking the lifecycle of a form-fill goal.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    #[default]
    InProgress,
    /// Every objective is satisfied.
    Done,
    /// The user cancelled.
    Failed,
}

impl StateMachine for GoalStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use GoalStatus::*;
        matches!((self, target), (InProgress, Done) | (InProgress, Failed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use GoalStatus::*;
        match self {
            InProgress => vec![Done, Failed],
            Done | Failed => vec![],
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GoalStatus::InProgress => "IN_PROGRESS",
            GoalStatus::Done => "DONE",
            GoalStatus::Failed => "FAILED",
        };
        write!(f, "{}", s)
    }
}
