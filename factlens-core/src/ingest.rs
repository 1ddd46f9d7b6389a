use crate::types::Claim;
use async_trait::async_trait;
use factlens_common::{FactlensError, Result};
use serde::Serialize;
use std::sync::Arc;

/// Mime types the upload boundary accepts.
pub const ALLOWED_MIME_TYPES: [&str; 3] = [
    "text/plain",
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// How much of the normalized text the ingest report echoes back.
const PREVIEW_CHARS: usize = 1000;

/// An uploaded file as received at the route boundary.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// What the upload route returns on success.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub filename: String,
    pub file_size: u64,
    pub file_type: String,
    /// First 1000 chars of the normalized text, "..."-terminated if truncated.
    pub extracted_text: String,
    pub claims: Vec<Claim>,
    pub claim_count: usize,
}

/// One extractor per allow-listed format.
///
/// PDF and DOCX are deliberate stubs: they answer with
/// [`FactlensError::ExtractionUnimplemented`] so callers can always tell a
/// real extraction from a missing capability.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, upload: &FileUpload) -> Result<String>;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, upload: &FileUpload) -> Result<String> {
        Ok(String::from_utf8_lossy(&upload.bytes).into_owned())
    }
}

pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    // FIXME(pdf): wire a real extractor (`pdf-extract` or `lopdf`) before
    // PDF uploads can carry content end-to-end.
    fn extract(&self, _upload: &FileUpload) -> Result<String> {
        Err(FactlensError::ExtractionUnimplemented("PDF"))
    }
}

pub struct DocxTextExtractor;

impl TextExtractor for DocxTextExtractor {
    fn extract(&self, _upload: &FileUpload) -> Result<String> {
        Err(FactlensError::ExtractionUnimplemented("DOCX"))
    }
}

fn extractor_for(mime_type: &str) -> Option<&'static dyn TextExtractor> {
    match mime_type {
        "text/plain" => Some(&PlainTextExtractor),
        "application/pdf" => Some(&PdfTextExtractor),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
            Some(&DocxTextExtractor)
        }
        _ => None,
    }
}

/// Seam for the extraction call that crosses the request boundary.
///
/// Ingestion does not call the extraction service in-process; it posts to the
/// sibling `/api/extractclaims` route. The HTTP implementation lives in the
/// web crate, tests stub this trait.
#[async_trait]
pub trait ExtractionGateway: Send + Sync {
    async fn extract_claims(&self, content: &str) -> Result<Vec<Claim>>;
}

/// Document ingestion service: validate, extract text, normalize, forward.
pub struct IngestService {
    gateway: Arc<dyn ExtractionGateway>,
    max_file_bytes: u64,
}

impl IngestService {
    pub fn new(gateway: Arc<dyn ExtractionGateway>, max_file_bytes: u64) -> Self {
        Self {
            gateway,
            max_file_bytes,
        }
    }

    pub async fn ingest(&self, upload: FileUpload) -> Result<IngestReport> {
        if !ALLOWED_MIME_TYPES.contains(&upload.mime_type.as_str()) {
            return Err(FactlensError::UnsupportedFileType {
                mime_type: upload.mime_type,
            });
        }

        let file_size = upload.bytes.len() as u64;
        if file_size > self.max_file_bytes {
            return Err(FactlensError::FileTooLarge {
                size: file_size,
                max_bytes: self.max_file_bytes,
            });
        }

        let extractor = extractor_for(&upload.mime_type).ok_or_else(|| {
            FactlensError::UnsupportedFileType {
                mime_type: upload.mime_type.clone(),
            }
        })?;
        let raw = extractor.extract(&upload)?;
        let normalized = normalize_whitespace(&raw);

        tracing::debug!(
            filename = %upload.name,
            file_size,
            chars = normalized.chars().count(),
            "ingest.text_extracted"
        );

        let claims = self
            .gateway
            .extract_claims(&normalized)
            .await
            .map_err(|e| FactlensError::ExtractionFailed(e.to_string()))?;

        Ok(IngestReport {
            filename: upload.name,
            file_size,
            file_type: upload.mime_type,
            extracted_text: truncate_preview(&normalized, PREVIEW_CHARS),
            claim_count: claims.len(),
            claims,
        })
    }
}

/// Collapse intra-line whitespace runs to single spaces, collapse blank-line
/// runs to exactly one blank line, and trim both ends.
pub fn normalize_whitespace(raw: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut blank_pending = false;
    for line in raw.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            blank_pending = !lines.is_empty();
        } else {
            if blank_pending {
                lines.push(String::new());
                blank_pending = false;
            }
            lines.push(collapsed);
        }
    }
    lines.join("\n")
}

fn truncate_preview(text: &str, limit: usize) -> String {
    let mut preview = String::new();
    let mut truncated = false;
    for (count, ch) in text.chars().enumerate() {
        if count == limit {
            truncated = true;
            break;
        }
        preview.push(ch);
    }
    if truncated {
        preview.push_str("...");
    }
    preview
}
