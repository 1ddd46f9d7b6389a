use crate::gateway::HttpExtractionGateway;
use factlens_common::{FactlensConfig, Result};
use factlens_core::extract::ClaimExtractor;
use factlens_core::ingest::IngestService;
use factlens_core::verify::ClaimVerifier;
use factlens_llm::completion_client_from;
use factlens_search::exa::ExaClient;
use factlens_search::SearchClient;
use std::sync::Arc;

/// Immutable per-process state shared by all request handlers.
pub struct AppState {
    pub extractor: ClaimExtractor,
    pub verifier: ClaimVerifier,
    pub ingest: IngestService,
    pub search: Arc<dyn SearchClient>,
    pub max_file_bytes: u64,
}

impl AppState {
    /// Wire every service from the typed configuration. Construction never
    /// touches the network; absent credentials fail per-request instead.
    pub fn from_config(config: &FactlensConfig) -> Result<Self> {
        let llm = completion_client_from(&config.completion)?;
        let search = Arc::new(ExaClient::new(config.search.clone())?);
        let gateway = Arc::new(HttpExtractionGateway::new(&config.server.base_url)?);

        Ok(Self {
            extractor: ClaimExtractor::new(llm.clone()),
            verifier: ClaimVerifier::new(llm),
            ingest: IngestService::new(gateway, config.ingest.max_file_bytes),
            search,
            max_file_bytes: config.ingest.max_file_bytes,
        })
    }
}
