//! Objective - one line item plus its run-time progress.

use serde::{Deserialize, Serialize};

use crate::domain::line_item::{FieldValue, LineItem, ViolationList};

/// What the user has supplied for an objective so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ResultData {
    /// Nothing collected yet.
    #[default]
    NotAsked,
    /// The user declined an optional item.
    Declined,
    /// A validated value.
    Answered(FieldValue),
}

impl ResultData {
    /// Returns the collected value, if any.
    pub fn value(&self) -> Option<&FieldValue> {
        match self {
            ResultData::Answered(value) => Some(value),
            _ => None,
        }
    }
}

/// One field to collect, with the mutable progress the goal engine tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    line_item: LineItem,
    completed: bool,
    in_help_mode: bool,
    desired_by_user: Option<bool>,
    result: ResultData,
    /// Text of the question most recently sent for this objective.
    last_question: Option<String>,
    schema_checked: bool,
}

impl Objective {
    pub fn new(line_item: LineItem) -> Self {
        Self {
            line_item,
            completed: false,
            in_help_mode: false,
            desired_by_user: None,
            result: ResultData::NotAsked,
            last_question: None,
            schema_checked: false,
        }
    }

    pub fn line_item(&self) -> &LineItem {
        &self.line_item
    }

    pub fn name(&self) -> &str {
        &self.line_item.name
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_in_help_mode(&self) -> bool {
        self.in_help_mode
    }

    pub fn desired_by_user(&self) -> Option<bool> {
        self.desired_by_user
    }

    pub fn result(&self) -> &ResultData {
        &self.result
    }

    pub fn last_question(&self) -> Option<&str> {
        self.last_question.as_deref()
    }

    /// True while an optional item still waits for the user's interest answer.
    pub fn awaits_preference(&self) -> bool {
        self.line_item.is_optional && self.desired_by_user.is_none()
    }

    /// Validates the line item the first time the objective becomes current.
    ///
    /// Later calls are free; a failed check is retried on the next turn.
    pub fn ensure_schema(&mut self) -> Result<(), ViolationList> {
        if !self.schema_checked {
            self.line_item.validate()?;
            self.schema_checked = true;
        }
        Ok(())
    }

    pub fn enter_help_mode(&mut self) {
        self.in_help_mode = true;
    }

    pub fn leave_help_mode(&mut self) {
        self.in_help_mode = false;
    }

    /// Records the user's interest in an optional item.
    ///
    /// Declining completes the objective with [`ResultData::Declined`].
    pub fn set_desired(&mut self, desired: bool) {
        self.desired_by_user = Some(desired);
        if !desired {
            self.result = ResultData::Declined;
            self.completed = true;
            self.in_help_mode = false;
        }
    }

    /// Stores an accepted value and completes the objective.
    pub fn complete_with(&mut self, value: FieldValue) {
        self.result = ResultData::Answered(value);
        self.completed = true;
        self.in_help_mode = false;
    }

    pub fn record_question(&mut self, question: impl Into<String>) {
        self.last_question = Some(question.into());
    }

    /// Clears all progress so the objective is asked from scratch.
    pub fn reopen(&mut self) {
        self.completed = false;
        self.in_help_mode = false;
        self.desired_by_user = None;
        self.result = ResultData::NotAsked;
        self.last_question = None;
    }
}
