//! Goal aggregate - the ordered objectives for one agent relationship.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AgentId, GoalId, RoomId, StateMachine, Timestamp, UserId, ValidationError,
};
use crate::domain::line_item::{FieldValue, LineItem};

use super::objective::{Objective, ResultData};
use super::status::GoalStatus;

/// A form-fill session between one user and one agent in one room.
///
/// # Invariants
///
/// - objectives keep their declaration order
/// - the current objective is always the first incomplete one
/// - a terminal status is never left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    id: GoalId,
    room_id: RoomId,
    user_id: UserId,
    agent_id: AgentId,
    name: String,
    status: GoalStatus,
    objectives: Vec<Objective>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Goal {
    /// Builds a fresh goal from line-item declarations.
    pub fn new(
        room_id: RoomId,
        user_id: UserId,
        agent_id: AgentId,
        name: impl Into<String>,
        line_items: &[LineItem],
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: GoalId::new(),
            room_id,
            user_id,
            agent_id,
            name: name.into(),
            status: GoalStatus::InProgress,
            objectives: line_items.iter().cloned().map(Objective::new).collect(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> GoalId {
        self.id
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn agent_id(&self) -> AgentId {
        self.agent_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> GoalStatus {
        self.status
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Index of the first incomplete objective, scanning in declaration order.
    pub fn next_objective_index(&self) -> Option<usize> {
        self.objectives.iter().position(|o| !o.is_completed())
    }

    /// The first incomplete objective, or `None` once all are satisfied.
    pub fn next_objective(&self) -> Option<&Objective> {
        self.next_objective_index().map(|i| &self.objectives[i])
    }

    pub fn objective_mut(&mut self, index: usize) -> Option<&mut Objective> {
        self.objectives.get_mut(index)
    }

    /// True when no incomplete objective remains.
    pub fn all_objectives_met(&self) -> bool {
        self.next_objective_index().is_none()
    }

    /// Completed and total objective counts.
    pub fn progress(&self) -> (usize, usize) {
        let done = self.objectives.iter().filter(|o| o.is_completed()).count();
        (done, self.objectives.len())
    }

    /// Reopens the objective completed just before the current one.
    ///
    /// Returns the reopened index, or `None` when nothing precedes the
    /// current objective.
    pub fn reopen_previous(&mut self) -> Option<usize> {
        let current = self.next_objective_index().unwrap_or(self.objectives.len());
        let previous = (0..current).rev().find(|&i| self.objectives[i].is_completed())?;
        self.objectives[previous].reopen();
        self.touch();
        Some(previous)
    }

    /// Transitions to DONE.
    pub fn mark_done(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(GoalStatus::Done)?;
        self.touch();
        Ok(())
    }

    /// Transitions to FAILED (user cancelled).
    pub fn mark_failed(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(GoalStatus::Failed)?;
        self.touch();
        Ok(())
    }

    /// Name/value pairs for every objective, in declaration order.
    ///
    /// Declined and unanswered objectives yield `None`.
    pub fn collected_values(&self) -> Vec<(&str, Option<&FieldValue>)> {
        self.objectives
            .iter()
            .map(|o| (o.name(), o.result().value()))
            .collect()
    }

    /// One line per collected field, used in completion replies.
    pub fn summary(&self) -> String {
        self.objectives
            .iter()
            .map(|o| match o.result() {
                ResultData::Answered(value) => format!("- {}: {}", o.name(), value),
                ResultData::Declined => format!("- {}: (skipped)", o.name()),
                ResultData::NotAsked => format!("- {}: (not provided)", o.name()),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::line_item::FieldType;
    use proptest::prelude::*;

    fn items(n: usize) -> Vec<LineItem> {
        (0..n)
            .map(|i| LineItem::new(format!("field_{}", i), FieldType::String, format!("Q{}?", i)))
            .collect()
    }

    fn goal_with(n: usize) -> Goal {
        Goal::new(
            RoomId::new("room-1").unwrap(),
            UserId::new("user-1").unwrap(),
            AgentId::new(),
            "bill_of_materials",
            &items(n),
        )
    }

    fn complete_first(goal: &mut Goal, k: usize) {
        for i in 0..k {
            goal.objective_mut(i)
                .unwrap()
                .complete_with(FieldValue::Text(format!("v{}", i)));
        }
    }

    #[test]
    fn new_goal_is_in_progress_with_declared_order() {
        let goal = goal_with(3);
        assert_eq!(goal.status(), GoalStatus::InProgress);
        let names: Vec<_> = goal.objectives().iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["field_0", "field_1", "field_2"]);
    }

    #[test]
    fn empty_goal_is_immediately_met() {
        assert!(goal_with(0).all_objectives_met());
    }

    #[test]
    fn first_incomplete_wins_even_if_later_ones_are_done() {
        let mut goal = goal_with(3);
        goal.objective_mut(2)
            .unwrap()
            .complete_with(FieldValue::Text("late".to_string()));

        assert_eq!(goal.next_objective_index(), Some(0));
    }

    #[test]
    fn reopen_previous_moves_current_back() {
        let mut goal = goal_with(3);
        complete_first(&mut goal, 2);

        assert_eq!(goal.reopen_previous(), Some(1));
        assert_eq!(goal.next_objective_index(), Some(1));
        assert_eq!(goal.progress(), (1, 3));
    }

    #[test]
    fn reopen_previous_on_first_objective_is_noop() {
        let mut goal = goal_with(2);
        assert_eq!(goal.reopen_previous(), None);
        assert_eq!(goal.next_objective_index(), Some(0));
    }

    #[test]
    fn done_goal_cannot_be_failed_afterwards() {
        let mut goal = goal_with(1);
        goal.mark_done().unwrap();
        assert!(goal.mark_failed().is_err());
        assert_eq!(goal.status(), GoalStatus::Done);
    }

    #[test]
    fn summary_lists_every_field() {
        let mut goal = goal_with(2);
        complete_first(&mut goal, 1);
        let summary = goal.summary();

        assert_eq!(summary, "- field_0: v0\n- field_1: (not provided)");
    }

    #[test]
    fn goal_roundtrips_through_json() {
        let mut goal = goal_with(2);
        complete_first(&mut goal, 1);
        let json = serde_json::to_string(&goal).unwrap();
        let restored: Goal = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, goal);
    }

    proptest! {
        #[test]
        fn next_objective_is_k_after_k_completions(n in 1usize..12, k_seed in 0usize..64) {
            let k = k_seed % (n + 1);
            let mut goal = goal_with(n);
            complete_first(&mut goal, k);

            if k < n {
                prop_assert_eq!(goal.next_objective_index(), Some(k));
                prop_assert_eq!(goal.next_objective().map(|o| o.name().to_string()), Some(format!("field_{}", k)));
            } else {
                prop_assert!(goal.next_objective().is_none());
            }
        }
    }
}
