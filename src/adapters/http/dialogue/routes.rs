//! HTTP routes for dialogue endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{health, list_agents, post_message, reset_goals, DialogueHandlers};

/// Creates the dialogue router with all endpoints.
pub fn dialogue_routes(handlers: DialogueHandlers) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/agents", get(list_agents))
        .route("/agents/:agent_id/message", post(post_message))
        .route("/agents/:agent_id/goals/reset", post(reset_goals))
        .with_state(handlers)
}
