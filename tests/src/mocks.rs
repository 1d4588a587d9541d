//! Mock implementations for testing.

use std::sync::Arc;

use async_trait::async_trait;
use llm_client::{LanguageModel, LlmError};
use parking_lot::Mutex;

/// Canned reply returned by [`MockModel`] when it is not failing.
pub const MOCK_ANALYSIS: &str = "Mock analysis: performance is steady.";

/// Mock language model that records prompts in memory.
///
/// Implements the same `LanguageModel` trait as `GeminiClient`, so handlers
/// run their production code paths without a network call.
#[derive(Clone)]
pub struct MockModel {
    /// Every prompt sent through this model.
    prompts: Arc<Mutex<Vec<String>>>,
    /// Simulate a timeout if set.
    should_fail: Arc<Mutex<bool>>,
}

impl MockModel {
    pub fn new() -> Self {
        Self {
            prompts: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Get all captured prompts.
    pub fn captured_prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().len()
    }

    /// Set failure mode for testing fallback handling.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().push(prompt.to_string());

        if *self.should_fail.lock() {
            return Err(LlmError::Timeout);
        }
        Ok(MOCK_ANALYSIS.to_string())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_model_captures_prompts() {
        let mock = MockModel::new();

        let text = mock.complete("team summary").await.unwrap();
        assert_eq!(text, MOCK_ANALYSIS);
        assert_eq!(mock.prompt_count(), 1);
        assert_eq!(mock.captured_prompts()[0], "team summary");
    }

    #[tokio::test]
    async fn test_mock_model_failure_mode() {
        let mock = MockModel::new();
        mock.set_should_fail(true);

        let result = mock.complete("team summary").await;
        assert!(matches!(result, Err(LlmError::Timeout)));
        // Failed calls are still recorded
        assert_eq!(mock.prompt_count(), 1);
    }
}
