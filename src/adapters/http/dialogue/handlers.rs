//! HTTP handlers for dialogue endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{
    AgentRegistry, HandleMessageCommand, HandleMessageError, HandleMessageHandler,
    ResetGoalsCommand, ResetGoalsError, ResetGoalsHandler, RouterError, TurnError,
};
use crate::domain::foundation::RoomId;

use super::dto::{
    AgentListResponse, AgentSummaryResponse, ErrorResponse, HealthResponse, MessageRequest,
    MessageResponse, ResetGoalsRequest, ResetGoalsResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct DialogueHandlers {
    message_handler: Arc<HandleMessageHandler>,
    reset_handler: Arc<ResetGoalsHandler>,
    registry: Arc<AgentRegistry>,
    model_provider: String,
}

impl DialogueHandlers {
    pub fn new(
        message_handler: Arc<HandleMessageHandler>,
        reset_handler: Arc<ResetGoalsHandler>,
        registry: Arc<AgentRegistry>,
        model_provider: impl Into<String>,
    ) -> Self {
        Self {
            message_handler,
            reset_handler,
            registry,
            model_provider: model_provider.into(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /agents/:agent_id/message - Run one user turn
pub async fn post_message(
    State(handlers): State<DialogueHandlers>,
    Path(agent_id): Path<String>,
    Json(req): Json<MessageRequest>,
) -> Response {
    let room_id = match RoomId::new(req.room_id) {
        Ok(id) => id,
        Err(e) => return bad_request(e.to_string()),
    };

    let cmd = HandleMessageCommand {
        agent: agent_id,
        room_id,
        platform_user: req.user_id,
        user_name: req.user_name,
        text: req.text,
    };

    match handlers.message_handler.handle(cmd).await {
        Ok(result) => {
            let response = MessageResponse {
                contents: result.contents.into_iter().map(Into::into).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_message_error(e),
    }
}

/// POST /agents/:agent_id/goals/reset - Rebuild the agent's goal for a user
pub async fn reset_goals(
    State(handlers): State<DialogueHandlers>,
    Path(agent_id): Path<String>,
    Json(req): Json<ResetGoalsRequest>,
) -> Response {
    let room_id = match RoomId::new(req.room_id) {
        Ok(id) => id,
        Err(e) => return bad_request(e.to_string()),
    };

    let cmd = ResetGoalsCommand {
        agent: agent_id,
        room_id,
        platform_user: req.user_id,
    };

    match handlers.reset_handler.handle(cmd).await {
        Ok(result) => {
            let response = ResetGoalsResponse::new(&result.goal, result.removed);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_reset_error(e),
    }
}

/// GET /agents - List the loaded roster
pub async fn list_agents(State(handlers): State<DialogueHandlers>) -> Response {
    let response = AgentListResponse {
        agents: handlers
            .registry
            .all()
            .iter()
            .map(|agent| AgentSummaryResponse::from(agent.as_ref()))
            .collect(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /health - Liveness probe
pub async fn health(State(handlers): State<DialogueHandlers>) -> Response {
    let response = HealthResponse {
        status: "ok".to_string(),
        agents: handlers.registry.len(),
        model: handlers.model_provider.clone(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message))).into_response()
}

fn internal(message: String) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::internal(message))).into_response()
}

fn handle_message_error(error: HandleMessageError) -> Response {
    match error {
        HandleMessageError::AgentNotFound(agent) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Agent", &agent)),
        )
            .into_response(),
        HandleMessageError::InvalidInput(msg) => bad_request(msg),
        HandleMessageError::Turn(TurnError::Model(e)) => internal(format!("Model call failed: {}", e)),
        HandleMessageError::Turn(e) => internal(e.to_string()),
        HandleMessageError::Routing(RouterError::UnknownAgent(name)) => {
            internal(format!("Hand-off target is not loaded: {}", name))
        }
        HandleMessageError::Routing(e) => internal(e.to_string()),
        HandleMessageError::Storage(e) => internal(e.to_string()),
    }
}

fn handle_reset_error(error: ResetGoalsError) -> Response {
    match error {
        ResetGoalsError::AgentNotFound(agent) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Agent", &agent)),
        )
            .into_response(),
        ResetGoalsError::InvalidInput(msg) => bad_request(msg),
        ResetGoalsError::Routing(e) => internal(e.to_string()),
        ResetGoalsError::Storage(e) => internal(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::DialogueError;
    use crate::ports::AIError;

    #[test]
    fn unknown_agent_maps_to_404() {
        let response = handle_message_error(HandleMessageError::AgentNotFound("Ghost".into()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_input_maps_to_400() {
        let response = handle_message_error(HandleMessageError::InvalidInput("empty".into()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn turn_failures_map_to_500() {
        for error in [
            TurnError::Dialogue(DialogueError::protocol("question missing")),
            TurnError::Configuration("no target".into()),
            TurnError::Model(AIError::AuthenticationFailed),
        ] {
            let response = handle_message_error(HandleMessageError::Turn(error));
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn reset_of_unknown_agent_maps_to_404() {
        let response = handle_reset_error(ResetGoalsError::AgentNotFound("Ghost".into()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
