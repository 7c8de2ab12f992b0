use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use clinrep_export::error::ExportError;

/// Error type for the report routes.
///
/// Bodies are plain text. Preview failures hide the cause; the export
/// routes pass the message through since their callers are operators.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Preview(ExportError),
    Pdf(ExportError),
    Doc(ExportError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "rejected submission body");
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::Preview(e) => {
                tracing::error!(error = %e, "preview generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error generating preview".to_string(),
                )
            }
            ApiError::Pdf(e) => {
                tracing::error!(error = %e, "pdf generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to generate PDF: {e}"),
                )
            }
            ApiError::Doc(e) => {
                tracing::error!(error = %e, "doc generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to generate DOC: {e}"),
                )
            }
        };

        (status, message).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
