use crate::SearchClient;
use async_trait::async_trait;
use factlens_common::{credential, FactlensError, Result, SearchConfig};
use factlens_core::Source;
use factlens_http::{Auth, HttpClient, HttpError, RequestOpts};
use reqwest::header::{HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

/// Minimal client for the Exa search API (web vertical).
///
/// Auth is a subscription header, not a bearer token. Results without text
/// content are dropped: a source the verifier cannot quote is useless.
pub struct ExaClient {
    http: HttpClient,
    config: SearchConfig,
}

#[derive(Serialize)]
struct ExaSearchRequest {
    query: String,
    num_results: u32,
    contents: ExaContentsSpec,
}

#[derive(Serialize)]
struct ExaContentsSpec {
    text: bool,
}

#[derive(Debug, Deserialize)]
struct ExaSearchResponse {
    #[serde(default)]
    results: Vec<ExaResult>,
}

#[derive(Debug, Deserialize)]
struct ExaResult {
    url: String,
    #[serde(default)]
    text: Option<String>,
}

impl ExaClient {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let http = HttpClient::new(&config.endpoint)
            .map_err(|e| FactlensError::Config(format!("HttpClient init failed: {e}")))?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl SearchClient for ExaClient {
    async fn search_sources(&self, query: &str) -> Result<Vec<Source>> {
        let key =
            credential(&self.config.api_key).ok_or(FactlensError::MissingCredential("Exa"))?;

        let mut query_snippet: String = query.chars().take(160).collect();
        if query_snippet.len() < query.len() {
            query_snippet.push('…');
        }
        tracing::debug!(query = %query_snippet, "exa.search.start");

        let req = ExaSearchRequest {
            query: query.to_string(),
            num_results: self.config.num_results,
            contents: ExaContentsSpec { text: true },
        };

        let resp: ExaSearchResponse = self
            .http
            .post_json(
                "search",
                &req,
                RequestOpts {
                    auth: Some(Auth::Header {
                        name: HeaderName::from_static("x-api-key"),
                        value: HeaderValue::from_str(key).map_err(|e| {
                            FactlensError::Config(format!("invalid Exa API key: {e}"))
                        })?,
                    }),
                    ..Default::default()
                },
            )
            .await
            .map_err(http_to_factlens)?;

        let sources: Vec<Source> = resp
            .results
            .into_iter()
            .filter_map(|hit| {
                let text = hit.text?;
                if text.trim().is_empty() {
                    return None;
                }
                Some(Source { text, url: hit.url })
            })
            .collect();

        tracing::debug!(hit_count = sources.len(), "exa.search.done");
        Ok(sources)
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
