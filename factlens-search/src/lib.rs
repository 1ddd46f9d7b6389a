//! Web-search upstream integration for Factlens.
//!
//! Candidate sources for a claim come from an external retrieval API; this
//! crate exposes the [`SearchClient`] seam and the [`exa::ExaClient`]
//! implementation. Verification itself never calls search; sources are
//! fetched ahead of time and passed in read-only.
pub mod exa;

use async_trait::async_trait;
use factlens_common::Result;
use factlens_core::Source;

#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Fetch candidate evidence documents for a claim.
    async fn search_sources(&self, query: &str) -> Result<Vec<Source>>;
}
