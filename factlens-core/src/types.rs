use factlens_common::{FactlensError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A factual assertion extracted from source text.
///
/// Both fields are non-empty after a successful extraction; the extraction
/// prompt asks the model to collapse near-duplicate statements, which is
/// best-effort only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// The normalized factual statement.
    pub claim: String,
    /// Verbatim excerpt the statement was derived from.
    pub original_text: String,
}

/// A candidate piece of evidence for a claim. Produced by the search client,
/// consumed read-only by verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub text: String,
    pub url: String,
}

/// The three admissible fact-check outcomes, serialized exactly as the
/// upstream model is instructed to emit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Assessment {
    True,
    False,
    #[serde(rename = "Insufficient Information")]
    InsufficientInformation,
}

/// The fact-check judgment for one claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Echo of the claim under judgment.
    pub claim: String,
    pub assessment: Assessment,
    pub summary: String,
    pub fixed_original_text: String,
    /// Must lie in [0, 100]. Out-of-range values are rejected, never coerced.
    pub confidence_score: f64,
}

impl Verdict {
    /// Enforce the numeric contract serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if !self.confidence_score.is_finite()
            || !(0.0..=100.0).contains(&self.confidence_score)
        {
            return Err(FactlensError::SchemaViolation(format!(
                "confidence_score {} is outside [0, 100]",
                self.confidence_score
            )));
        }
        Ok(())
    }
}

/// Try to extract a ```json ... ``` fenced block; fall back to the raw text.
///
/// Models at temperature 0 still occasionally wrap their output in markdown
/// fences. Bare non-JSON text is left untouched and fails at parse time.
pub(crate) fn coerce_model_json(text: &str) -> String {
    let fenced = Regex::new(r"(?s)```(?:json)?\s*([\[{].*[\]}])\s*```")
        .ok()
        .and_then(|re| {
            re.captures(text)
                .and_then(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        });
    fenced.unwrap_or_else(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assessment_round_trips_the_three_literals() {
        for (variant, wire) in [
            (Assessment::True, "\"True\""),
            (Assessment::False, "\"False\""),
            (
                Assessment::InsufficientInformation,
                "\"Insufficient Information\"",
            ),
        ] {
            assert_eq!(serde_json::to_string(&variant).unwrap(), wire);
            assert_eq!(
                serde_json::from_str::<Assessment>(wire).unwrap(),
                variant
            );
        }
        assert!(serde_json::from_str::<Assessment>("\"Unclear\"").is_err());
    }

    #[test]
    fn verdict_rejects_out_of_range_confidence() {
        let mut verdict = Verdict {
            claim: "x".into(),
            assessment: Assessment::True,
            summary: "y".into(),
            fixed_original_text: "z".into(),
            confidence_score: 100.0,
        };
        assert!(verdict.validate().is_ok());

        verdict.confidence_score = 100.5;
        assert!(verdict.validate().is_err());
        verdict.confidence_score = -1.0;
        assert!(verdict.validate().is_err());
        verdict.confidence_score = f64::NAN;
        assert!(verdict.validate().is_err());
    }

    #[test]
    fn fenced_json_is_unwrapped() {
        let fenced = "```json\n[{\"claim\": \"a\", \"original_text\": \"b\"}]\n```";
        assert_eq!(
            coerce_model_json(fenced),
            "[{\"claim\": \"a\", \"original_text\": \"b\"}]"
        );
        assert_eq!(coerce_model_json("plain text"), "plain text");
        assert_eq!(coerce_model_json("{\"a\":1}"), "{\"a\":1}");
    }
}
