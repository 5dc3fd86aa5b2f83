//! Result classifier: renders a mode's template, calls the model and
//! normalizes the reply onto the mode's category set.

use std::sync::Arc;

use crate::domain::dialogue::templates::{self, PromptContext};
use crate::domain::dialogue::{Category, Classification, ClassificationMode};
use crate::domain::foundation::RoomId;
use crate::ports::{AIError, ClassificationRequest, ModelClassifier};

pub struct ResultClassifier {
    model: Arc<dyn ModelClassifier>,
}

impl ResultClassifier {
    pub fn new(model: Arc<dyn ModelClassifier>) -> Self {
        Self { model }
    }

    /// One classification call in the mode of `C`.
    pub async fn classify<C: Category>(
        &self,
        context: &PromptContext,
        room_id: &RoomId,
        agent_name: &str,
    ) -> Result<Classification<C>, AIError> {
        let raw = self.call(C::MODE, context, room_id, agent_name).await?;
        let classification = Classification::<C>::from_raw(raw.category.as_deref(), raw.text.as_deref());

        if classification.downgraded {
            tracing::warn!(
                mode = %C::MODE,
                raw_category = ?raw.category,
                "unrecognized classification normalized to retry"
            );
        } else {
            tracing::debug!(mode = %C::MODE, category = ?classification.category, "reply classified");
        }
        Ok(classification)
    }

    /// Free-form help answer. The category of the reply is ignored.
    pub async fn help_answer(
        &self,
        context: &PromptContext,
        room_id: &RoomId,
        agent_name: &str,
    ) -> Result<Option<String>, AIError> {
        let raw = self
            .call(ClassificationMode::HelpAnswer, context, room_id, agent_name)
            .await?;
        Ok(raw
            .text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()))
    }

    async fn call(
        &self,
        mode: ClassificationMode,
        context: &PromptContext,
        room_id: &RoomId,
        agent_name: &str,
    ) -> Result<crate::ports::RawClassification, AIError> {
        let context = context
            .clone()
            .with("categories", templates::categories_for(mode));
        let prompt = templates::render(templates::template_for(mode), &context);
        let request = ClassificationRequest::new(mode, prompt, room_id.clone(), agent_name);
        self.model.classify(&request).await
    }
}
