use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};

use clinrep_core::models::submission::Submission;
use clinrep_export::error::ExportError;
use clinrep_export::render::render_report;
use clinrep_export::{doc, pdf};

use crate::error::ApiError;
use crate::extract::SubmissionBody;
use crate::state::AppState;

/// POST /generate-preview
pub async fn generate_preview(
    State(state): State<AppState>,
    SubmissionBody(submission): SubmissionBody,
) -> Result<Html<String>, ApiError> {
    let html = render(&state, &submission).await.map_err(ApiError::Preview)?;
    Ok(Html(html))
}

/// POST /download-preview-pdf
pub async fn download_pdf(
    State(state): State<AppState>,
    SubmissionBody(submission): SubmissionBody,
) -> Result<Response, ApiError> {
    let html = render(&state, &submission).await.map_err(ApiError::Pdf)?;
    let bytes = state
        .pdf
        .render(&html, &state.page_setup)
        .await
        .map_err(ApiError::Pdf)?;
    Ok(attachment(pdf::CONTENT_TYPE, pdf::FILE_NAME, bytes))
}

/// POST /download-preview-doc
pub async fn download_doc(
    State(state): State<AppState>,
    SubmissionBody(submission): SubmissionBody,
) -> Result<Response, ApiError> {
    let html = render(&state, &submission).await.map_err(ApiError::Doc)?;
    let document = doc::wrap_word_document(&html);
    Ok(attachment(doc::CONTENT_TYPE, doc::FILE_NAME, document))
}

async fn render(state: &AppState, submission: &Submission) -> Result<String, ExportError> {
    let template = state.templates.load().await?;
    render_report(&template, submission, state.scores.as_ref())
}

fn attachment(content_type: &str, file_name: &str, body: impl Into<Body>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={file_name}"),
            ),
        ],
        body.into(),
    )
        .into_response()
}
