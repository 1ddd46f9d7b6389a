use crate::error::ApiError;
use crate::AppState;
use axum::extract::{Multipart, State};
use axum::Json;
use factlens_common::FactlensError;
use factlens_core::ingest::FileUpload;
use factlens_core::Source;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ExtractClaimsRequest {
    #[serde(default)]
    content: Option<String>,
}

pub async fn extract_claims(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExtractClaimsRequest>,
) -> Result<Json<Value>, ApiError> {
    let content = req.content.unwrap_or_default();
    let claims = state.extractor.extract_claims(&content).await?;
    Ok(Json(json!({ "claims": claims })))
}

#[derive(Deserialize)]
pub struct VerifyClaimsRequest {
    #[serde(default)]
    claim: Option<String>,
    #[serde(default)]
    original_text: Option<String>,
    /// Candidate sources; the field name matches the dashboard's wire format.
    #[serde(default)]
    exasources: Option<Vec<Source>>,
}

pub async fn verify_claims(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyClaimsRequest>,
) -> Result<Json<Value>, ApiError> {
    let (Some(claim), Some(original_text), Some(sources)) =
        (req.claim, req.original_text, req.exasources)
    else {
        return Err(FactlensError::InvalidInput("Claim and sources are required".into()).into());
    };

    let verdict = state
        .verifier
        .verify_claim(&claim, &original_text, &sources)
        .await?;
    Ok(Json(json!({ "claims": verdict })))
}

#[derive(Deserialize)]
pub struct SearchSourcesRequest {
    #[serde(default)]
    query: Option<String>,
}

pub async fn search_sources(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchSourcesRequest>,
) -> Result<Json<Value>, ApiError> {
    let query = req.query.unwrap_or_default();
    if query.trim().is_empty() {
        return Err(FactlensError::InvalidInput("Query is required".into()).into());
    }

    let sources = state.search.search_sources(&query).await?;
    Ok(Json(json!({ "exasources": sources })))
}

pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let mut file: Option<FileUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or("upload").to_string();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?.to_vec();
        file = Some(FileUpload {
            name,
            mime_type,
            bytes,
        });
    }

    let upload = file.ok_or(FactlensError::InvalidInput("No file provided".into()))?;
    let report = state.ingest.ingest(upload).await?;

    Ok(Json(json!({
        "success": true,
        "filename": report.filename,
        "fileSize": report.file_size,
        "fileType": report.file_type,
        "extractedText": report.extracted_text,
        "claims": report.claims,
        "claimCount": report.claim_count,
    })))
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> ApiError {
    FactlensError::InvalidInput(format!("malformed multipart body: {e}")).into()
}
