use crate::traits::{CompletionClient, CompletionResponse};
use async_trait::async_trait;
use factlens_common::{credential, CompletionConfig, FactlensError, Result};
use factlens_http::{Auth, HttpClient, HttpError, RequestOpts};
use serde::{Deserialize, Serialize};

/// Client for Groq's OpenAI-compatible chat-completion endpoint.
///
/// One outbound request per call, no caching, no retry. A missing API key is
/// reported per-call as [`FactlensError::MissingCredential`] so that a
/// misconfigured deployment answers requests with an error instead of
/// refusing to start.
pub struct GroqClient {
    http: HttpClient,
    config: CompletionConfig,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    temperature: f32,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl GroqClient {
    /// Create a new client for the configured endpoint and model.
    pub fn new(config: CompletionConfig) -> Result<Self> {
        let http = HttpClient::new(&config.endpoint)
            .map_err(|e| FactlensError::Config(format!("HttpClient init failed: {e}")))?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<CompletionResponse> {
        let key = credential(&self.config.api_key)
            .ok_or(FactlensError::MissingCredential("Groq"))?;

        let req = ChatCompletionRequest {
            model: self.config.model.clone(),
            temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt.to_string(),
                },
            ],
        };

        tracing::debug!(model=%self.config.model, temperature, "groq.complete.start");

        let resp: ChatCompletionResponse = self
            .http
            .post_json(
                "chat/completions",
                &req,
                RequestOpts {
                    auth: Some(Auth::Bearer(key)),
                    ..Default::default()
                },
            )
            .await
            .map_err(http_to_factlens)?;

        let text = resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(FactlensError::UpstreamParse(
                "completion response missing content".into(),
            ));
        }

        Ok(CompletionResponse {
            text,
            model: resp.model,
        })
    }

    async fn health_check(&self) -> Result<bool> {
        let test_prompt = "Respond with just 'OK'";

        match self
            .complete("You are a health probe.", test_prompt, 0.0)
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!("Groq health check failed: {}", e);
                Ok(false)
            }
        }
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

fn http_to_factlens(e: HttpError) -> FactlensError {
    match e {
        HttpError::Api {
            status,
            message,
            body,
        } => FactlensError::UpstreamUnavailable {
            status: status.as_u16(),
            body: if message.is_empty() { body } else { message },
        },
        HttpError::Decode(msg, snippet) => {
            FactlensError::UpstreamParse(format!("{msg}; body: {snippet}"))
        }
        other => FactlensError::UpstreamRequest(other.to_string()),
    }
}
