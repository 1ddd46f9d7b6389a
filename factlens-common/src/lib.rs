//! Common types and utilities shared across Factlens crates.
//!
//! This crate defines configuration, observability helpers, and the shared
//! error taxonomy used throughout the Factlens workspace. It is intentionally
//! lightweight and dependency‑minimal so that all crates can depend on it
//! without introducing heavy transitive costs.
//!
//! # Overview
//!
//! - [`FactlensConfig`]: Top‑level runtime configuration
//! - [`CompletionConfig`] / [`SearchConfig`]: Upstream API configuration
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`FactlensError`] and [`Result`]: Shared error handling
//!
//! # Examples
//!
//! Constructing a default configuration:
//!
//! ```rust
//! use factlens_common::FactlensConfig;
//!
//! let cfg = FactlensConfig::default();
//! assert_eq!(cfg.server.listen, "127.0.0.1:3000");
//! assert_eq!(cfg.ingest.max_file_bytes, 5 * 1024 * 1024);
//! ```
use serde::{Deserialize, Serialize};

pub mod observability;

/// Top-level runtime configuration.
///
/// Built once at process start (see the `factlens-config` loader) and passed
/// by value into client and service constructors. Nothing reads the process
/// environment after startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactlensConfig {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

/// HTTP listener and internal routing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the API server binds to.
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Base URL used for route-to-route calls (the upload route reaches the
    /// extraction route over HTTP, not in-process).
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            base_url: default_base_url(),
        }
    }
}

/// Chat-completion upstream configuration.
///
/// The API key is optional on purpose: a missing credential must surface as a
/// per-request error response, not a startup crash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_completion_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_completion_endpoint")]
    pub endpoint: String,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: default_completion_model(),
            api_key: None,
            endpoint: default_completion_endpoint(),
        }
    }
}

/// Web-search upstream configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,
    /// How many candidate sources to request per claim.
    #[serde(default = "default_search_results")]
    pub num_results: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_search_endpoint(),
            num_results: default_search_results(),
        }
    }
}

/// Document ingestion limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Single authoritative upload size cap, enforced at the ingestion
    /// boundary.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1:3000".into()
}
fn default_base_url() -> String {
    "http://localhost:3000".into()
}
fn default_completion_model() -> String {
    "llama-3.1-70b-versatile".into()
}
fn default_completion_endpoint() -> String {
    "https://api.groq.com/openai/v1".into()
}
fn default_search_endpoint() -> String {
    "https://api.exa.ai".into()
}
fn default_search_results() -> u32 {
    5
}
fn default_max_file_bytes() -> u64 {
    5 * 1024 * 1024
}

/// Return a usable credential, treating empty and unexpanded `${VAR}`
/// placeholders as absent.
///
/// ```
/// use factlens_common::credential;
///
/// assert_eq!(credential(&Some("gsk_live".into())), Some("gsk_live"));
/// assert_eq!(credential(&Some("${GROQ_API_KEY}".into())), None);
/// assert_eq!(credential(&None), None);
/// ```
pub fn credential(key: &Option<String>) -> Option<&str> {
    match key.as_deref().map(str::trim) {
        Some("") | None => None,
        Some(k) if k.starts_with("${") => None,
        Some(k) => Some(k),
    }
}

/// Error types used across the Factlens system.
#[derive(thiserror::Error, Debug)]
pub enum FactlensError {
    /// Caller-supplied payload was missing required fields.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Server misconfiguration: no API key for the named upstream.
    #[error("Missing {0} API key")]
    MissingCredential(&'static str),

    /// The upstream endpoint answered with a non-success status.
    #[error("Upstream error {status}: {body}")]
    UpstreamUnavailable { status: u16, body: String },

    /// The upstream endpoint could not be reached at all.
    #[error("Upstream request failed: {0}")]
    UpstreamRequest(String),

    /// The model's output was empty or not parseable as JSON.
    #[error("Upstream output was not valid JSON: {0}")]
    UpstreamParse(String),

    /// The model's output parsed but violated the required shape.
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Uploaded file type is outside the allow-list.
    #[error("Unsupported file type. Please upload PDF, DOCX, or TXT files.")]
    UnsupportedFileType { mime_type: String },

    /// Uploaded file exceeds the ingestion size cap.
    #[error("File too large. Maximum size is {max_bytes} bytes.")]
    FileTooLarge { size: u64, max_bytes: u64 },

    /// Text extraction for this format is a stub, not a capability.
    #[error("Text extraction for {0} is not implemented")]
    ExtractionUnimplemented(&'static str),

    /// The downstream extraction call failed; carries the nested message.
    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenient alias for results that use [`FactlensError`].
pub type Result<T> = std::result::Result<T, FactlensError>;
