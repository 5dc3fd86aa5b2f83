//! Mock Model Classifier for testing and offline runs.
//!
//! Replies are consumed in order; once the queue is empty the default reply
//! is returned. Every request is recorded for verification.
//!
//! # Example
//!
//! ```ignore
//! let classifier = MockModelClassifier::new()
//!     .with_reply("RESULT", "red")
//!     .with_error(AIError::timeout(30));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{AIError, ClassificationRequest, ModelClassifier, RawClassification};

/// A configured mock outcome.
#[derive(Debug, Clone)]
pub enum MockReply {
    Success(RawClassification),
    Error(AIError),
}

/// Scripted classifier.
#[derive(Debug, Clone)]
pub struct MockModelClassifier {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    default_reply: RawClassification,
    delay: Duration,
    calls: Arc<Mutex<Vec<ClassificationRequest>>>,
}

impl Default for MockModelClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockModelClassifier {
    /// Creates a classifier whose default reply is empty (classified as a retry).
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            default_reply: RawClassification::empty(),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a `{category, text}` reply.
    pub fn with_reply(self, category: impl Into<String>, text: impl Into<String>) -> Self {
        self.with_raw(RawClassification::new(category, text))
    }

    /// Queues a raw reply, which may lack either field.
    pub fn with_raw(self, raw: RawClassification) -> Self {
        lock(&self.replies).push_back(MockReply::Success(raw));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: AIError) -> Self {
        lock(&self.replies).push_back(MockReply::Error(error));
        self
    }

    /// Sets the reply used once the queue is exhausted.
    pub fn with_default_reply(mut self, raw: RawClassification) -> Self {
        self.default_reply = raw;
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queues a reply on an already shared classifier.
    pub fn push_reply(&self, category: impl Into<String>, text: impl Into<String>) {
        lock(&self.replies).push_back(MockReply::Success(RawClassification::new(category, text)));
    }

    /// Queues an error on an already shared classifier.
    pub fn push_error(&self, error: AIError) {
        lock(&self.replies).push_back(MockReply::Error(error));
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn get_calls(&self) -> Vec<ClassificationRequest> {
        lock(&self.calls).clone()
    }

    pub fn pending_replies(&self) -> usize {
        lock(&self.replies).len()
    }

    fn next_reply(&self) -> MockReply {
        lock(&self.replies)
            .pop_front()
            .unwrap_or_else(|| MockReply::Success(self.default_reply.clone()))
    }
}

#[async_trait]
impl ModelClassifier for MockModelClassifier {
    async fn classify(&self, request: &ClassificationRequest) -> Result<RawClassification, AIError> {
        lock(&self.calls).push(request.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_reply() {
            MockReply::Success(raw) => Ok(raw),
            MockReply::Error(err) => Err(err),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::ClassificationMode;
    use crate::domain::foundation::RoomId;

    fn request() -> ClassificationRequest {
        ClassificationRequest::new(
            ClassificationMode::Main,
            "prompt",
            RoomId::new("room").unwrap(),
            "Scout",
        )
    }

    #[tokio::test]
    async fn returns_replies_in_order() {
        let classifier = MockModelClassifier::new()
            .with_reply("HELP", "first")
            .with_reply("RESULT", "second");

        let r1 = classifier.classify(&request()).await.unwrap();
        let r2 = classifier.classify(&request()).await.unwrap();

        assert_eq!(r1.text.as_deref(), Some("first"));
        assert_eq!(r2.category.as_deref(), Some("RESULT"));
    }

    #[tokio::test]
    async fn falls_back_to_default_reply() {
        let classifier = MockModelClassifier::new();
        let reply = classifier.classify(&request()).await.unwrap();
        assert_eq!(reply, RawClassification::empty());
    }

    #[tokio::test]
    async fn returns_queued_error() {
        let classifier = MockModelClassifier::new().with_error(AIError::timeout(5));
        let err = classifier.classify(&request()).await.unwrap_err();
        assert_eq!(err, AIError::timeout(5));
    }

    #[tokio::test]
    async fn records_calls() {
        let classifier = MockModelClassifier::new();
        classifier.classify(&request()).await.unwrap();
        classifier.classify(&request()).await.unwrap();

        assert_eq!(classifier.call_count(), 2);
        assert_eq!(classifier.get_calls()[0].mode, ClassificationMode::Main);
    }

    #[tokio::test]
    async fn clones_share_the_queue() {
        let classifier = MockModelClassifier::new();
        let shared = classifier.clone();
        shared.push_reply("CANCEL", "bye");

        assert_eq!(classifier.pending_replies(), 1);
        let reply = classifier.classify(&request()).await.unwrap();
        assert_eq!(reply.category.as_deref(), Some("CANCEL"));
    }
}
