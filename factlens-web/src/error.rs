use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use factlens_common::FactlensError;
use serde_json::json;

/// Route-level wrapper mapping the shared error taxonomy onto HTTP statuses.
///
/// Responses carry only `{"error": string}`: a human-readable message, no
/// structured code.
pub struct ApiError(pub FactlensError);

impl From<FactlensError> for ApiError {
    fn from(e: FactlensError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            FactlensError::InvalidInput(_)
            | FactlensError::UnsupportedFileType { .. }
            | FactlensError::FileTooLarge { .. } => StatusCode::BAD_REQUEST,
            FactlensError::ExtractionUnimplemented(_) => StatusCode::NOT_IMPLEMENTED,
            FactlensError::MissingCredential(_)
            | FactlensError::UpstreamUnavailable { .. }
            | FactlensError::UpstreamRequest(_)
            | FactlensError::UpstreamParse(_)
            | FactlensError::SchemaViolation(_)
            | FactlensError::ExtractionFailed(_)
            | FactlensError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "api.request_failed");
        } else {
            tracing::debug!(error = %self.0, "api.request_rejected");
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
