//! HTTP adapter for dialogue endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AgentListResponse, AgentSummaryResponse, ContentResponse, ErrorResponse, HealthResponse,
    MessageRequest, MessageResponse, ResetGoalsRequest, ResetGoalsResponse,
};
pub use handlers::DialogueHandlers;
pub use routes::dialogue_routes;
