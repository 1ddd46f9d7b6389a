use crate::types::{coerce_model_json, Claim};
use factlens_common::{FactlensError, Result};
use factlens_llm::traits::CompletionClient;
use std::sync::Arc;

pub const EXTRACTION_SYSTEM_PROMPT: &str = "You are an expert at extracting verifiable factual claims. Always respond with strict JSON that matches the requested schema.";

pub fn build_extraction_prompt(content: &str) -> String {
    format!(
        "Extract every factual, verifiable claim from the provided text. \
         Combine similar statements and avoid duplicates. \
         Return ONLY valid JSON in the following format: \
         [ {{ \"claim\": string, \"original_text\": string }} ].\n\
         Text to analyse:\n{content}"
    )
}

/// Claim extraction service: free text in, ordered `{claim, original_text}`
/// pairs out. One upstream call per invocation, temperature 0.
pub struct ClaimExtractor {
    llm: Arc<dyn CompletionClient>,
}

impl ClaimExtractor {
    pub fn new(llm: Arc<dyn CompletionClient>) -> Self {
        Self { llm }
    }

    /// Extract claims from `content`.
    ///
    /// The model's output is deserialized into [`Claim`]s and rejected when
    /// any entry carries an empty field, so a successful return is never a
    /// malformed payload.
    pub async fn extract_claims(&self, content: &str) -> Result<Vec<Claim>> {
        if content.trim().is_empty() {
            return Err(FactlensError::InvalidInput("Content is required".into()));
        }

        let resp = self
            .llm
            .complete(
                EXTRACTION_SYSTEM_PROMPT,
                &build_extraction_prompt(content),
                0.0,
            )
            .await?;

        let text = resp.text.trim();
        if text.is_empty() {
            return Err(FactlensError::UpstreamParse(
                "completion response was empty".into(),
            ));
        }

        let claims: Vec<Claim> = serde_json::from_str(&coerce_model_json(text))
            .map_err(|e| FactlensError::UpstreamParse(format!("claims array did not parse: {e}")))?;

        for entry in &claims {
            if entry.claim.trim().is_empty() || entry.original_text.trim().is_empty() {
                return Err(FactlensError::UpstreamParse(
                    "claim entries must carry non-empty claim and original_text".into(),
                ));
            }
        }

        tracing::debug!(count = claims.len(), "claims.extracted");
        Ok(claims)
    }
}
