//! Service wiring shared by the binary and the integration tests.

use std::sync::Arc;

use axum::Router;
use secrecy::ExposeSecret;

use crate::adapters::ai::{MockModelClassifier, OpenAIClassifier, OpenAIConfig};
use crate::adapters::http::{dialogue_routes, DialogueHandlers};
use crate::adapters::storage::{InMemoryMessageLog, InMemoryRelationshipRepository};
use crate::application::{
    AgentRegistry, GoalEngine, HandleMessageHandler, RelationshipRouter, ResetGoalsHandler,
};
use crate::config::{AgentRoster, AiConfig, AiProvider};
use crate::ports::{AIError, MessageLog, ModelClassifier};

/// Fully wired application services.
pub struct Services {
    pub registry: Arc<AgentRegistry>,
    pub router: Arc<RelationshipRouter>,
    pub messages: Arc<dyn MessageLog>,
    pub message_handler: Arc<HandleMessageHandler>,
    pub reset_handler: Arc<ResetGoalsHandler>,
    model: Arc<dyn ModelClassifier>,
}

impl Services {
    /// Wires every agent with in-memory stores around the given classifier.
    pub fn in_memory(roster: &AgentRoster, model: Arc<dyn ModelClassifier>, history_limit: usize) -> Self {
        let registry = Arc::new(AgentRegistry::in_memory(roster));
        let router = Arc::new(RelationshipRouter::new(
            registry.clone(),
            Arc::new(InMemoryRelationshipRepository::new()),
        ));
        let messages: Arc<dyn MessageLog> = Arc::new(InMemoryMessageLog::new());
        let engine = Arc::new(GoalEngine::new(model.clone(), messages.clone(), history_limit));

        Self {
            message_handler: Arc::new(HandleMessageHandler::new(router.clone(), engine, messages.clone())),
            reset_handler: Arc::new(ResetGoalsHandler::new(router.clone(), messages.clone())),
            registry,
            router,
            messages,
            model,
        }
    }

    /// The axum router exposing the dialogue endpoints.
    pub fn http_router(&self) -> Router {
        dialogue_routes(DialogueHandlers::new(
            self.message_handler.clone(),
            self.reset_handler.clone(),
            self.registry.clone(),
            self.model.provider_name(),
        ))
    }
}

/// Builds the classifier selected by configuration.
pub fn classifier_from_config(ai: &AiConfig) -> Result<Arc<dyn ModelClassifier>, AIError> {
    match ai.provider {
        AiProvider::Mock => Ok(Arc::new(MockModelClassifier::new())),
        AiProvider::OpenAI => {
            let api_key = ai
                .api_key
                .as_ref()
                .map(|k| k.expose_secret().clone())
                .ok_or(AIError::AuthenticationFailed)?;
            let config = OpenAIConfig::new(api_key)
                .with_model(ai.model.clone())
                .with_base_url(ai.base_url.clone())
                .with_timeout(ai.timeout())
                .with_temperature(ai.temperature)
                .with_max_retries(ai.max_retries);
            Ok(Arc::new(OpenAIClassifier::new(config)?))
        }
    }
}
