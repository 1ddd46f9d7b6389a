use crate::types::{coerce_model_json, Source, Verdict};
use factlens_common::{FactlensError, Result};
use factlens_llm::traits::CompletionClient;
use std::sync::Arc;

pub const VERIFICATION_SYSTEM_PROMPT: &str =
    "You are an exacting fact-checker. Only output strict JSON that matches the provided schema.";

/// Number the sources into the block the prompt template embeds.
pub fn format_sources(sources: &[Source]) -> String {
    sources
        .iter()
        .enumerate()
        .map(|(index, source)| {
            format!(
                "Source {}:\nText: {}\nURL: {}\n",
                index + 1,
                source.text,
                source.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_verification_prompt(claim: &str, original_text: &str, sources: &[Source]) -> String {
    format!(
        "Given the claim, original text, and supporting sources, provide a fact-checking judgment. \
         Always respond with a JSON object that matches this schema: \
         {{ \"claim\": string, \"assessment\": \"True\" | \"False\" | \"Insufficient Information\", \
         \"summary\": string, \"fixed_original_text\": string, \"confidence_score\": number }}.\n\n\
         Sources:\n{}\nOriginal text: {}\nClaim: {}\n\n\
         Remember: respond with valid JSON only.",
        format_sources(sources),
        original_text,
        claim
    )
}

/// Claim verification service: one claim plus candidate sources in, a
/// validated [`Verdict`] out. Stricter than extraction: output violating the
/// five-field shape aborts with `SchemaViolation`, with no repair attempt.
pub struct ClaimVerifier {
    llm: Arc<dyn CompletionClient>,
}

impl ClaimVerifier {
    pub fn new(llm: Arc<dyn CompletionClient>) -> Self {
        Self { llm }
    }

    /// Judge `claim` against `sources`.
    ///
    /// An empty source list degrades judgment quality but is not an error.
    pub async fn verify_claim(
        &self,
        claim: &str,
        original_text: &str,
        sources: &[Source],
    ) -> Result<Verdict> {
        if claim.trim().is_empty() || original_text.trim().is_empty() {
            return Err(FactlensError::InvalidInput(
                "Claim and sources are required".into(),
            ));
        }

        let resp = self
            .llm
            .complete(
                VERIFICATION_SYSTEM_PROMPT,
                &build_verification_prompt(claim, original_text, sources),
                0.0,
            )
            .await?;

        let text = resp.text.trim();
        if text.is_empty() {
            return Err(FactlensError::UpstreamParse(
                "completion response was empty".into(),
            ));
        }

        // Two stages on purpose: invalid JSON and valid-but-wrong-shape JSON
        // are different failure kinds.
        let value: serde_json::Value = serde_json::from_str(&coerce_model_json(text))
            .map_err(|e| FactlensError::UpstreamParse(format!("verdict did not parse: {e}")))?;
        let verdict: Verdict = serde_json::from_value(value)
            .map_err(|e| FactlensError::SchemaViolation(e.to_string()))?;
        verdict.validate()?;

        tracing::debug!(
            assessment = ?verdict.assessment,
            confidence = verdict.confidence_score,
            "claim.verified"
        );
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CannedCompletion;
    use crate::types::Assessment;

    fn sources() -> Vec<Source> {
        vec![
            Source {
                text: "Apollo 11 landed on July 20, 1969.".into(),
                url: "https://history.example/apollo".into(),
            },
            Source {
                text: "The crew returned on July 24, 1969.".into(),
                url: "https://archive.example/apollo".into(),
            },
        ]
    }

    const GOOD_VERDICT: &str = r#"{
        "claim": "Apollo 11 landed in 1972.",
        "assessment": "False",
        "summary": "The landing happened in 1969, not 1972.",
        "fixed_original_text": "Apollo 11 landed in 1969.",
        "confidence_score": 97
    }"#;

    #[tokio::test]
    async fn valid_verdict_passes_through() {
        let canned = Arc::new(CannedCompletion::replying(GOOD_VERDICT));
        let verifier = ClaimVerifier::new(canned.clone());

        let verdict = verifier
            .verify_claim(
                "Apollo 11 landed in 1972.",
                "The mission landed in 1972.",
                &sources(),
            )
            .await
            .unwrap();

        assert_eq!(verdict.assessment, Assessment::False);
        assert_eq!(verdict.confidence_score, 97.0);

        let seen = canned.seen.lock().unwrap();
        assert!(seen[0].1.contains("Source 1:"));
        assert!(seen[0].1.contains("Source 2:"));
        assert!(seen[0].1.contains("https://history.example/apollo"));
    }

    #[tokio::test]
    async fn empty_sources_are_permitted() {
        let verifier = ClaimVerifier::new(Arc::new(CannedCompletion::replying(GOOD_VERDICT)));

        let verdict = verifier
            .verify_claim("Apollo 11 landed in 1972.", "landed in 1972", &[])
            .await
            .unwrap();
        assert_eq!(verdict.assessment, Assessment::False);
    }

    #[tokio::test]
    async fn missing_inputs_are_invalid() {
        let verifier = ClaimVerifier::new(Arc::new(CannedCompletion::replying(GOOD_VERDICT)));

        let err = verifier.verify_claim("", "text", &[]).await.unwrap_err();
        assert!(matches!(err, FactlensError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn unknown_assessment_is_a_schema_violation() {
        let verifier = ClaimVerifier::new(Arc::new(CannedCompletion::replying(
            r#"{"claim":"c","assessment":"Probably","summary":"s","fixed_original_text":"f","confidence_score":50}"#,
        )));

        let err = verifier
            .verify_claim("c", "o", &sources())
            .await
            .unwrap_err();
        assert!(matches!(err, FactlensError::SchemaViolation(_)));
    }

    #[tokio::test]
    async fn out_of_range_confidence_is_rejected_not_clamped() {
        let verifier = ClaimVerifier::new(Arc::new(CannedCompletion::replying(
            r#"{"claim":"c","assessment":"True","summary":"s","fixed_original_text":"f","confidence_score":140}"#,
        )));

        let err = verifier
            .verify_claim("c", "o", &sources())
            .await
            .unwrap_err();
        assert!(matches!(err, FactlensError::SchemaViolation(_)));
    }

    #[tokio::test]
    async fn missing_field_is_a_schema_violation() {
        let verifier = ClaimVerifier::new(Arc::new(CannedCompletion::replying(
            r#"{"claim":"c","assessment":"True","summary":"s","confidence_score":50}"#,
        )));

        let err = verifier
            .verify_claim("c", "o", &sources())
            .await
            .unwrap_err();
        assert!(matches!(err, FactlensError::SchemaViolation(_)));
    }

    #[tokio::test]
    async fn non_json_output_is_a_parse_error() {
        let verifier = ClaimVerifier::new(Arc::new(CannedCompletion::replying(
            "The claim is false, trust me.",
        )));

        let err = verifier
            .verify_claim("c", "o", &sources())
            .await
            .unwrap_err();
        assert!(matches!(err, FactlensError::UpstreamParse(_)));
    }
}
