//! Chat-completion upstream integration for Factlens.
//!
//! This crate exposes a common [`traits::CompletionClient`] interface and the
//! concrete [`groq::GroqClient`] implementation speaking the OpenAI-compatible
//! `chat/completions` wire format.
//!
//! # Examples
//! ```no_run
//! use factlens_common::{CompletionConfig, Result};
//! use factlens_llm::groq::GroqClient;
//! use factlens_llm::traits::CompletionClient;
//!
//! # fn main() -> Result<()> {
//! let client = GroqClient::new(CompletionConfig::default())?;
//! assert!(!client.model_name().is_empty());
//! # Ok(())
//! # }
//! ```
pub mod groq;
pub mod traits;

use factlens_common::{CompletionConfig, Result};
use groq::GroqClient;
use std::sync::Arc;
use traits::CompletionClient;

/// Default model recommendation for claim extraction and verification.
pub const DEFAULT_COMPLETION_MODEL: &str = "llama-3.1-70b-versatile";

/// Build the completion client from typed configuration.
pub fn completion_client_from(
    config: &CompletionConfig,
) -> Result<Arc<dyn CompletionClient + Send + Sync + 'static>> {
    let client = GroqClient::new(config.clone())?;
    Ok(Arc::new(client))
}
