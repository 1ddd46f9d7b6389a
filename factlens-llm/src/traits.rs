use async_trait::async_trait;
use factlens_common::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub text: String,
    pub model: Option<String>,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run one chat completion for the given system+user prompt pair.
    ///
    /// Callers pin `temperature` themselves; extraction and verification both
    /// run at 0 for deterministic-leaning output.
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<CompletionResponse>;

    /// Check if the completion service is reachable and credentialed.
    async fn health_check(&self) -> Result<bool>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}
