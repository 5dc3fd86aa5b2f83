//! Goal engine - runs one conversational turn against a goal.
//!
//! Each turn picks the first incomplete objective. If its question was never
//! sent, the question is rendered and nothing is classified. Otherwise the
//! session-delimited history is classified in help, preliminary or main mode
//! and the category drives the objective's transitions.

use std::sync::Arc;

use crate::config::AgentDefinition;
use crate::domain::dialogue::templates::{PromptContext, NO_HELP_DOCUMENT, RETRY_APOLOGY};
use crate::domain::dialogue::{
    build_question, window_for_question, DialogueError, HelpCategory, MainCategory,
    PreliminaryCategory, SessionWindow,
};
use crate::domain::foundation::{DomainError, RoomId};
use crate::domain::goal::{Goal, Objective};
use crate::domain::routing::{HandoffAction, HandoffReason};
use crate::ports::{AIError, MessageLog, ModelClassifier};

use super::result_classifier::ResultClassifier;

/// Fatal turn failures. The goal is not persisted when one is returned.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error(transparent)]
    Dialogue(#[from] DialogueError),

    /// A hand-off target is missing from the agent definition.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("model call failed: {0}")]
    Model(#[from] AIError),

    #[error("storage error: {0}")]
    Storage(#[from] DomainError),
}

/// What the agent says at the end of a turn.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    Reply(String),
    /// The goal ended; ownership moves to `action.target`.
    Handoff { text: String, action: HandoffAction },
}

impl TurnOutcome {
    pub fn text(&self) -> &str {
        match self {
            TurnOutcome::Reply(text) => text,
            TurnOutcome::Handoff { text, .. } => text,
        }
    }
}

/// Per-turn inputs the engine reads but never changes.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    pub agent: &'a AgentDefinition,
    pub room_id: &'a RoomId,
    pub user_name: &'a str,
    /// The user's message that triggered this turn.
    pub user_text: &'a str,
}

pub struct GoalEngine {
    classifier: ResultClassifier,
    messages: Arc<dyn MessageLog>,
    history_limit: usize,
}

impl GoalEngine {
    pub fn new(model: Arc<dyn ModelClassifier>, messages: Arc<dyn MessageLog>, history_limit: usize) -> Self {
        Self {
            classifier: ResultClassifier::new(model),
            messages,
            history_limit,
        }
    }

    /// Advances `goal` by one user turn.
    pub async fn run_turn(&self, ctx: &TurnContext<'_>, goal: &mut Goal) -> Result<TurnOutcome, TurnError> {
        let Some(index) = goal.next_objective_index() else {
            return self.complete(ctx, goal);
        };

        let question = {
            let objective = objective_at(goal, index)?;
            objective.ensure_schema().map_err(DialogueError::from)?;
            match objective.last_question() {
                Some(question) => question.to_string(),
                None => return ask(goal, index),
            }
        };

        let history = self.messages.recent(ctx.room_id, self.history_limit).await?;
        let window = window_for_question(&history, &question)?;
        let prompt = prompt_context(ctx, &goal.objectives()[index], &question, &window);

        if goal.objectives()[index].is_in_help_mode() {
            let classification = self
                .classifier
                .classify::<HelpCategory>(&prompt, ctx.room_id, &ctx.agent.name)
                .await?;
            match classification.category {
                HelpCategory::Answered => objective_at(goal, index)?.leave_help_mode(),
                HelpCategory::Cancel => return self.cancel(ctx, goal, &classification.text),
                HelpCategory::Confused | HelpCategory::Help => {
                    return self.help_reply(ctx, goal, index, &prompt).await;
                }
                HelpCategory::Retry => return Ok(retry_reply(&question)),
            }
        }

        if goal.objectives()[index].awaits_preference() {
            self.preliminary_turn(ctx, goal, index, &prompt, &question).await
        } else {
            self.main_turn(ctx, goal, index, &prompt, &question).await
        }
    }

    async fn preliminary_turn(
        &self,
        ctx: &TurnContext<'_>,
        goal: &mut Goal,
        index: usize,
        prompt: &PromptContext,
        question: &str,
    ) -> Result<TurnOutcome, TurnError> {
        let classification = self
            .classifier
            .classify::<PreliminaryCategory>(prompt, ctx.room_id, &ctx.agent.name)
            .await?;

        match classification.category {
            PreliminaryCategory::True => {
                objective_at(goal, index)?.set_desired(true);
                ask(goal, index)
            }
            PreliminaryCategory::False => {
                objective_at(goal, index)?.set_desired(false);
                tracing::debug!(goal_id = %goal.id(), objective = index, "optional item declined");
                self.advance(ctx, goal)
            }
            PreliminaryCategory::Help => {
                objective_at(goal, index)?.enter_help_mode();
                self.help_reply(ctx, goal, index, prompt).await
            }
            PreliminaryCategory::Cancel => self.cancel(ctx, goal, &classification.text),
            PreliminaryCategory::Retry => Ok(retry_reply(question)),
        }
    }

    async fn main_turn(
        &self,
        ctx: &TurnContext<'_>,
        goal: &mut Goal,
        index: usize,
        prompt: &PromptContext,
        question: &str,
    ) -> Result<TurnOutcome, TurnError> {
        let classification = self
            .classifier
            .classify::<MainCategory>(prompt, ctx.room_id, &ctx.agent.name)
            .await?;

        match classification.category {
            MainCategory::Result => {
                let objective = objective_at(goal, index)?;
                let item = objective.line_item();
                let extracted = match item.extract_value(&classification.text) {
                    Ok(value) => Ok(value),
                    Err(rejection) => item.extract_value(ctx.user_text).map_err(|_| rejection),
                };

                match extracted {
                    Ok(value) => {
                        tracing::debug!(field = %item.name, value = %value, "value accepted");
                        objective.complete_with(value);
                        goal.touch();
                        let (done, total) = goal.progress();
                        tracing::debug!(goal_id = %goal.id(), done, total, "goal progress");
                        self.advance(ctx, goal)
                    }
                    Err(rejection) => {
                        tracing::debug!(field = %item.name, reason = %rejection, "value rejected");
                        Ok(TurnOutcome::Reply(format!("{} {}", rejection, question)))
                    }
                }
            }
            MainCategory::Change => match goal.reopen_previous() {
                Some(previous) => ask(goal, previous),
                None => ask(goal, index),
            },
            MainCategory::Help => {
                objective_at(goal, index)?.enter_help_mode();
                self.help_reply(ctx, goal, index, prompt).await
            }
            MainCategory::Cancel => self.cancel(ctx, goal, &classification.text),
            MainCategory::Retry => Ok(retry_reply(question)),
        }
    }

    async fn help_reply(
        &self,
        ctx: &TurnContext<'_>,
        goal: &Goal,
        index: usize,
        prompt: &PromptContext,
    ) -> Result<TurnOutcome, TurnError> {
        let answer = self
            .classifier
            .help_answer(prompt, ctx.room_id, &ctx.agent.name)
            .await?;
        let fallback = goal.objectives()[index].line_item().help_text().map(str::to_string);

        Ok(TurnOutcome::Reply(
            answer
                .or(fallback)
                .unwrap_or_else(|| RETRY_APOLOGY.to_string()),
        ))
    }

    /// Moves to the next incomplete objective, or completes the goal.
    fn advance(&self, ctx: &TurnContext<'_>, goal: &mut Goal) -> Result<TurnOutcome, TurnError> {
        match goal.next_objective_index() {
            Some(next) => ask(goal, next),
            None => self.complete(ctx, goal),
        }
    }

    fn complete(&self, ctx: &TurnContext<'_>, goal: &mut Goal) -> Result<TurnOutcome, TurnError> {
        let target = handoff_target(ctx.agent, HandoffReason::Completed)?;
        goal.mark_done().map_err(|e| DialogueError::protocol(e.to_string()))?;

        let (done, total) = goal.progress();
        tracing::info!(
            goal_id = %goal.id(),
            agent = %ctx.agent.name,
            target = %target,
            done,
            total,
            "goal completed"
        );

        let summary = goal.summary();
        let text = if summary.is_empty() {
            "Thanks, that's everything I need.".to_string()
        } else {
            format!("Thanks, that's everything I need:\n{}", summary)
        };
        Ok(TurnOutcome::Handoff {
            text,
            action: HandoffAction::new(target, HandoffReason::Completed),
        })
    }

    fn cancel(&self, ctx: &TurnContext<'_>, goal: &mut Goal, model_text: &str) -> Result<TurnOutcome, TurnError> {
        let target = handoff_target(ctx.agent, HandoffReason::Cancelled)?;
        goal.mark_failed().map_err(|e| DialogueError::protocol(e.to_string()))?;

        tracing::info!(goal_id = %goal.id(), agent = %ctx.agent.name, target = %target, "goal cancelled");

        let text = if model_text.trim().is_empty() {
            "No problem, I've stopped here.".to_string()
        } else {
            model_text.trim().to_string()
        };
        Ok(TurnOutcome::Handoff {
            text,
            action: HandoffAction::new(target, HandoffReason::Cancelled),
        })
    }
}

fn objective_at(goal: &mut Goal, index: usize) -> Result<&mut Objective, DialogueError> {
    goal.objective_mut(index)
        .ok_or_else(|| DialogueError::protocol(format!("objective {} does not exist", index)))
}

/// Renders and records the question for objective `index`.
fn ask(goal: &mut Goal, index: usize) -> Result<TurnOutcome, TurnError> {
    let objective = objective_at(goal, index)?;
    objective.ensure_schema().map_err(DialogueError::from)?;
    let question = build_question(objective)?;
    objective.record_question(question.clone());
    goal.touch();
    Ok(TurnOutcome::Reply(question))
}

fn retry_reply(question: &str) -> TurnOutcome {
    TurnOutcome::Reply(format!("{}\n\n{}", RETRY_APOLOGY, question))
}

fn handoff_target(agent: &AgentDefinition, reason: HandoffReason) -> Result<String, TurnError> {
    let target = match reason {
        HandoffReason::Completed => agent.on_complete.as_deref(),
        HandoffReason::Cancelled => agent.on_cancel.as_deref(),
    };
    target
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            TurnError::Configuration(format!(
                "agent '{}' has no hand-off target for a {} goal",
                agent.name, reason
            ))
        })
}

fn prompt_context(
    ctx: &TurnContext<'_>,
    objective: &Objective,
    question: &str,
    window: &SessionWindow,
) -> PromptContext {
    let item = objective.line_item();
    PromptContext::new()
        .with("agentName", ctx.agent.name.clone())
        .with("userName", ctx.user_name)
        .with("question", question)
        .with("recentMessages", window.text())
        .with("fieldName", item.name.clone())
        .with("fieldType", item.field_type.to_string())
        .with("helpDocument", item.help_text().unwrap_or(NO_HELP_DOCUMENT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockModelClassifier;
    use crate::adapters::storage::InMemoryMessageLog;
    use crate::domain::dialogue::{ChatMessage, Sender};
    use crate::domain::foundation::{AgentId, UserId};
    use crate::domain::goal::{GoalStatus, ResultData};
    use crate::domain::line_item::{FieldType, FieldValue, LineItem};

    struct Harness {
        engine: GoalEngine,
        model: Arc<MockModelClassifier>,
        log: Arc<InMemoryMessageLog>,
        agent: AgentDefinition,
        goal: Goal,
        room: RoomId,
    }

    fn agent_definition(items: Vec<LineItem>) -> AgentDefinition {
        AgentDefinition {
            name: "Scout".to_string(),
            goal_name: "order".to_string(),
            greeting: None,
            on_complete: Some("Closer".to_string()),
            on_cancel: Some("Greeter".to_string()),
            is_default: false,
            line_items: items,
        }
    }

    fn color() -> LineItem {
        LineItem::new("color", FieldType::String, "Which color?").with_valid_values(["red", "blue"])
    }

    fn quantity() -> LineItem {
        LineItem::new("quantity", FieldType::Number, "How many?")
            .with_bounds(Some(1.0), Some(500.0))
            .integer()
    }

    fn engraving() -> LineItem {
        LineItem::new("engraving", FieldType::String, "What should we engrave?")
            .optional("Would you like an engraving?", "Engravings hold up to 20 characters.")
    }

    impl Harness {
        fn new(items: Vec<LineItem>) -> Self {
            let model = Arc::new(MockModelClassifier::new());
            let log = Arc::new(InMemoryMessageLog::new());
            let room = RoomId::new("room-1").unwrap();
            let agent = agent_definition(items);
            let goal = Goal::new(
                room.clone(),
                UserId::new("user-1").unwrap(),
                AgentId::new(),
                &agent.goal_name,
                &agent.line_items,
            );
            Self {
                engine: GoalEngine::new(model.clone(), log.clone(), 50),
                model,
                log,
                agent,
                goal,
                room,
            }
        }

        async fn say(&mut self, text: &str) -> Result<TurnOutcome, TurnError> {
            self.log
                .append(ChatMessage::new(
                    self.room.clone(),
                    Sender::new(UserId::new("user-1").unwrap(), "Sam"),
                    text,
                ))
                .await
                .unwrap();

            let ctx = TurnContext {
                agent: &self.agent,
                room_id: &self.room,
                user_name: "Sam",
                user_text: text,
            };
            let outcome = self.engine.run_turn(&ctx, &mut self.goal).await?;

            self.log
                .append(ChatMessage::new(
                    self.room.clone(),
                    Sender::new(UserId::new("agent").unwrap(), "Scout"),
                    outcome.text(),
                ))
                .await
                .unwrap();
            Ok(outcome)
        }

        fn reply(&self, category: &str, text: &str) {
            self.model.push_reply(category, text);
        }
    }

    fn reply_text(outcome: &TurnOutcome) -> &str {
        match outcome {
            TurnOutcome::Reply(text) => text,
            other => panic!("expected a reply, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn first_turn_asks_without_classifying() {
        let mut h = Harness::new(vec![color()]);
        let outcome = h.say("hello").await.unwrap();

        assert_eq!(reply_text(&outcome), "Which color? Available choices: red, blue.");
        assert_eq!(h.model.call_count(), 0);
        assert_eq!(
            h.goal.objectives()[0].last_question(),
            Some("Which color? Available choices: red, blue.")
        );
    }

    #[tokio::test]
    async fn result_extracts_choice_from_sentence() {
        let mut h = Harness::new(vec![color(), quantity()]);
        h.say("hi").await.unwrap();
        h.reply("RESULT", "I'll take the red one");

        let outcome = h.say("I'll take the red one").await.unwrap();

        assert_eq!(
            h.goal.objectives()[0].result(),
            &ResultData::Answered(FieldValue::Text("red".to_string()))
        );
        assert_eq!(
            reply_text(&outcome),
            "How many? Please give a whole number between 1 and 500."
        );
    }

    #[tokio::test]
    async fn rejected_result_repeats_question_with_reason() {
        let mut h = Harness::new(vec![quantity()]);
        h.say("hi").await.unwrap();
        h.reply("RESULT", "1,200");

        let outcome = h.say("1,200 please").await.unwrap();

        let text = reply_text(&outcome);
        assert!(text.contains("500"));
        assert!(text.ends_with("How many? Please give a whole number between 1 and 500."));
        assert!(!h.goal.objectives()[0].is_completed());
    }

    #[tokio::test]
    async fn falls_back_to_user_text_when_model_text_is_unusable() {
        let mut h = Harness::new(vec![quantity()]);
        h.say("hi").await.unwrap();
        h.reply("RESULT", "the user gave a number");

        h.say("12").await.unwrap();
        assert_eq!(
            h.goal.objectives()[0].result().value(),
            Some(&FieldValue::Number(12.0))
        );
    }

    #[tokio::test]
    async fn optional_false_skips_main_question() {
        let mut h = Harness::new(vec![engraving(), color()]);
        let first = h.say("hi").await.unwrap();
        assert_eq!(reply_text(&first), "Would you like an engraving?");

        h.reply("false", "");
        let outcome = h.say("no thanks").await.unwrap();

        assert_eq!(h.goal.objectives()[0].result(), &ResultData::Declined);
        assert!(h.goal.objectives()[0].is_completed());
        assert_eq!(reply_text(&outcome), "Which color? Available choices: red, blue.");
    }

    #[tokio::test]
    async fn optional_true_asks_main_question() {
        let mut h = Harness::new(vec![engraving()]);
        h.say("hi").await.unwrap();
        h.reply("TRUE", "");

        let outcome = h.say("yes please").await.unwrap();

        assert_eq!(reply_text(&outcome), "What should we engrave?");
        assert_eq!(h.goal.objectives()[0].desired_by_user(), Some(true));
        assert!(!h.goal.objectives()[0].is_completed());
    }

    #[tokio::test]
    async fn cancel_in_main_hands_off_to_cancel_target() {
        let mut h = Harness::new(vec![color(), quantity()]);
        h.say("hi").await.unwrap();
        h.reply("CANCEL", "Okay, stopping.");

        let outcome = h.say("forget it").await.unwrap();

        match outcome {
            TurnOutcome::Handoff { text, action } => {
                assert_eq!(text, "Okay, stopping.");
                assert_eq!(action.action_name(), "SELECT_CHARACTER_Greeter");
                assert_eq!(action.reason, HandoffReason::Cancelled);
            }
            other => panic!("expected hand-off, got {:?}", other),
        }
        assert_eq!(h.goal.status(), GoalStatus::Failed);
        assert_eq!(h.goal.objectives()[1].last_question(), None);
    }

    #[tokio::test]
    async fn cancel_in_preliminary_hands_off() {
        let mut h = Harness::new(vec![engraving()]);
        h.say("hi").await.unwrap();
        h.reply("Cancel", "");

        let outcome = h.say("stop").await.unwrap();
        assert!(matches!(outcome, TurnOutcome::Handoff { .. }));
        assert_eq!(h.goal.status(), GoalStatus::Failed);
    }

    #[tokio::test]
    async fn unknown_category_re_asks_verbatim() {
        let mut h = Harness::new(vec![color()]);
        h.say("hi").await.unwrap();
        h.reply("PERHAPS", "???");

        let outcome = h.say("hmm").await.unwrap();

        assert_eq!(
            reply_text(&outcome),
            format!("{}\n\nWhich color? Available choices: red, blue.", RETRY_APOLOGY)
        );
        assert!(!h.goal.objectives()[0].is_completed());

        // The apology line still carries the question for the next turn.
        h.reply("RESULT", "blue");
        h.say("blue").await.unwrap();
        assert!(h.goal.objectives()[0].is_completed());
    }

    #[tokio::test]
    async fn help_then_answered_falls_through_in_same_turn() {
        let mut h = Harness::new(vec![color()]);
        h.say("hi").await.unwrap();

        h.reply("HELP", "");
        h.reply("ANSWER", "Red is our classic finish.");
        let outcome = h.say("what's the difference?").await.unwrap();
        assert_eq!(reply_text(&outcome), "Red is our classic finish.");
        assert!(h.goal.objectives()[0].is_in_help_mode());

        h.reply("ANSWERED", "");
        h.reply("RESULT", "red");
        h.say("ok red then").await.unwrap();

        assert!(!h.goal.objectives()[0].is_in_help_mode());
        assert!(h.goal.objectives()[0].is_completed());
        assert_eq!(h.model.call_count(), 4);
    }

    #[tokio::test]
    async fn confused_in_help_mode_gets_another_answer() {
        let mut h = Harness::new(vec![engraving()]);
        h.say("hi").await.unwrap();
        h.reply("HELP", "");
        h.reply("ANSWER", "");
        let outcome = h.say("what is that?").await.unwrap();
        assert_eq!(reply_text(&outcome), "Engravings hold up to 20 characters.");

        h.reply("CONFUSED", "");
        h.reply("ANSWER", "It is text cut into the metal.");
        let outcome = h.say("still not sure").await.unwrap();
        assert_eq!(reply_text(&outcome), "It is text cut into the metal.");
        assert!(h.goal.objectives()[0].is_in_help_mode());
    }

    #[tokio::test]
    async fn cancel_in_help_mode_hands_off_to_cancel_target() {
        let mut h = Harness::new(vec![color(), quantity()]);
        h.say("hi").await.unwrap();
        h.reply("HELP", "");
        h.reply("ANSWER", "Blue is darker.");
        h.say("which is nicer?").await.unwrap();

        h.reply("CANCEL", "");
        let outcome = h.say("never mind, bye").await.unwrap();

        match outcome {
            TurnOutcome::Handoff { text, action } => {
                assert_eq!(text, "No problem, I've stopped here.");
                assert_eq!(action.action_name(), "SELECT_CHARACTER_Greeter");
                assert_eq!(action.reason, HandoffReason::Cancelled);
            }
            other => panic!("expected hand-off, got {:?}", other),
        }
        assert_eq!(h.goal.status(), GoalStatus::Failed);
        assert!(!h.goal.objectives()[0].is_completed());
    }

    #[tokio::test]
    async fn unclassifiable_reply_in_help_mode_stays_in_help_mode() {
        let mut h = Harness::new(vec![color()]);
        h.say("hi").await.unwrap();
        h.reply("HELP", "");
        h.reply("ANSWER", "Red is our classic finish.");
        h.say("what's the difference?").await.unwrap();

        h.reply("MAYBE", "");
        let outcome = h.say("hmm").await.unwrap();

        assert_eq!(
            reply_text(&outcome),
            format!("{}\n\nWhich color? Available choices: red, blue.", RETRY_APOLOGY)
        );
        assert!(h.goal.objectives()[0].is_in_help_mode());
        assert!(!h.goal.objectives()[0].is_completed());
        assert_eq!(h.goal.status(), GoalStatus::InProgress);
    }

    #[tokio::test]
    async fn repeated_help_request_gets_another_answer() {
        let mut h = Harness::new(vec![color()]);
        h.say("hi").await.unwrap();
        h.reply("HELP", "");
        h.reply("ANSWER", "Red is our classic finish.");
        h.say("what's the difference?").await.unwrap();

        h.reply("HELP", "");
        h.reply("ANSWER", "Blue is a matte navy.");
        let outcome = h.say("and blue?").await.unwrap();

        assert_eq!(reply_text(&outcome), "Blue is a matte navy.");
        assert!(h.goal.objectives()[0].is_in_help_mode());
        assert_eq!(h.model.call_count(), 4);
    }

    #[tokio::test]
    async fn change_reopens_previous_objective() {
        let mut h = Harness::new(vec![color(), quantity()]);
        h.say("hi").await.unwrap();
        h.reply("RESULT", "red");
        h.say("red").await.unwrap();

        h.reply("CHANGE", "");
        let outcome = h.say("actually, change the color").await.unwrap();

        assert_eq!(reply_text(&outcome), "Which color? Available choices: red, blue.");
        assert_eq!(h.goal.next_objective_index(), Some(0));
        assert_eq!(h.goal.objectives()[0].result(), &ResultData::NotAsked);
    }

    #[tokio::test]
    async fn last_objective_completes_goal() {
        let mut h = Harness::new(vec![color()]);
        h.say("hi").await.unwrap();
        h.reply("RESULT", "blue");

        let outcome = h.say("blue").await.unwrap();

        match outcome {
            TurnOutcome::Handoff { text, action } => {
                assert!(text.contains("- color: blue"));
                assert_eq!(action.target, "Closer");
                assert_eq!(action.reason, HandoffReason::Completed);
            }
            other => panic!("expected hand-off, got {:?}", other),
        }
        assert_eq!(h.goal.status(), GoalStatus::Done);
    }

    #[tokio::test]
    async fn missing_complete_target_is_configuration_error() {
        let mut h = Harness::new(vec![]);
        h.agent.on_complete = None;

        let err = h.say("hi").await.unwrap_err();
        assert!(matches!(err, TurnError::Configuration(_)));
        assert_eq!(h.goal.status(), GoalStatus::InProgress);
    }

    #[tokio::test]
    async fn malformed_line_item_aborts_turn() {
        let mut h = Harness::new(vec![LineItem::new("qty", FieldType::Number, "How many?")
            .with_bounds(Some(10.0), Some(1.0))]);

        let err = h.say("hi").await.unwrap_err();
        match err {
            TurnError::Dialogue(DialogueError::SchemaViolation(list)) => {
                assert!(list.to_string().contains("minVal"));
            }
            other => panic!("expected schema violation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_question_in_history_is_protocol_violation() {
        let mut h = Harness::new(vec![color()]);
        h.goal.objective_mut(0).unwrap().record_question("Which color?");

        let err = h.say("red").await.unwrap_err();
        assert!(matches!(err, TurnError::Dialogue(DialogueError::ProtocolViolation(_))));
    }

    #[tokio::test]
    async fn model_failure_aborts_turn() {
        let mut h = Harness::new(vec![color()]);
        h.say("hi").await.unwrap();
        let failing = Harness {
            engine: GoalEngine::new(
                Arc::new(MockModelClassifier::new().with_error(AIError::unavailable("down"))),
                h.log.clone(),
                50,
            ),
            ..h
        };
        let mut h = failing;

        let err = h.say("red").await.unwrap_err();
        assert!(matches!(err, TurnError::Model(_)));
        assert!(!h.goal.objectives()[0].is_completed());
    }
}
