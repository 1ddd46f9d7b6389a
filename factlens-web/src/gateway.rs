use async_trait::async_trait;
use factlens_common::{FactlensError, Result};
use factlens_core::ingest::ExtractionGateway;
use factlens_core::Claim;
use factlens_http::{HttpClient, HttpError, RequestOpts};
use serde::{Deserialize, Serialize};

/// The upload route does not call the extraction service in-process: it posts
/// to the sibling `/api/extractclaims` route at the configured internal base
/// URL, exactly one round trip.
pub struct HttpExtractionGateway {
    http: HttpClient,
}

#[derive(Serialize)]
struct ExtractRequest<'a> {
    content: &'a str,
}

#[derive(Deserialize)]
struct ExtractResponse {
    #[serde(default)]
    claims: Vec<Claim>,
}

impl HttpExtractionGateway {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = HttpClient::new(base_url)
            .map_err(|e| FactlensError::Config(format!("HttpClient init failed: {e}")))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl ExtractionGateway for HttpExtractionGateway {
    async fn extract_claims(&self, content: &str) -> Result<Vec<Claim>> {
        let resp: ExtractResponse = self
            .http
            .post_json(
                "api/extractclaims",
                &ExtractRequest { content },
                RequestOpts::default(),
            )
            .await
            .map_err(|e| match e {
                // The sibling route answers errors as {"error": message}; the
                // HTTP client surfaces that message directly.
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
            })?;

        Ok(resp.claims)
    }
}
