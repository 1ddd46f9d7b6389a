//! Claim extraction, verification, and document ingestion services.
//!
//! This crate holds the domain model ([`types`]) and the three services built
//! on top of the completion client:
//!
//! - [`extract::ClaimExtractor`] turns free text into `{claim, original_text}`
//!   pairs
//! - [`verify::ClaimVerifier`] judges one claim against candidate sources
//! - [`ingest::IngestService`] validates an uploaded file, extracts and
//!   normalizes its text, and forwards it to the extraction route
//!
//! All upstream calls run at temperature 0 with a single attempt; failures
//! surface as [`factlens_common::FactlensError`] kinds, never as partially
//! valid results.
pub mod extract;
pub mod ingest;
pub mod types;
pub mod verify;

pub use types::{Assessment, Claim, Source, Verdict};

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use factlens_common::{FactlensError, Result};
    use factlens_llm::traits::{CompletionClient, CompletionResponse};
    use std::sync::Mutex;

    /// Canned completion client recording the prompts it was given.
    pub(crate) struct CannedCompletion {
        reply: Option<String>,
        pub seen: Mutex<Vec<(String, String)>>,
    }

    impl CannedCompletion {
        pub fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                reply: None,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for CannedCompletion {
        async fn complete(
            &self,
            system_prompt: &str,
            user_prompt: &str,
            _temperature: f32,
        ) -> Result<CompletionResponse> {
            self.seen
                .lock()
                .unwrap()
                .push((system_prompt.to_string(), user_prompt.to_string()));
            match &self.reply {
                Some(text) => Ok(CompletionResponse {
                    text: text.clone(),
                    model: None,
                }),
                None => Err(FactlensError::UpstreamUnavailable {
                    status: 500,
                    body: "canned failure".into(),
                }),
            }
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }
}
