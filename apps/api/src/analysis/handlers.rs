//! Axum route handlers for the Analysis API.

use std::collections::BTreeMap;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::debug;

use crate::analysis::{analyze_resume, AnalysisResult};
use crate::errors::AppError;
use crate::state::AppState;

/// Multipart field carrying the résumé PDF.
const FILE_FIELD: &str = "file";

/// POST /analyze_resume/
///
/// Accepts a multipart upload with the PDF in the `file` field and returns the
/// matched keywords, ranked role percentages and best role.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let pdf = read_file_field(&mut multipart).await?;

    let catalog = state.catalog.clone();
    let result = tokio::task::spawn_blocking(move || analyze_resume(&pdf, &catalog))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("analysis task failed: {e}")))??;

    Ok(Json(result))
}

/// GET /roles
///
/// Lists the loaded role catalog.
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<BTreeMap<String, Vec<String>>> {
    Json(state.catalog.to_keyword_map())
}

async fn read_file_field(multipart: &mut Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Malformed multipart body", e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("<unnamed>").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read uploaded file", e))?;
        debug!(%filename, bytes = data.len(), "Received resume upload");
        return Ok(data);
    }

    Err(AppError::Validation(format!(
        "Multipart field '{FILE_FIELD}' is required"
    )))
}

/// Body-limit rejections keep their 413; everything else is a client error.
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{context}: upload exceeds the configured size limit"))
    } else {
        AppError::Validation(format!("{context}: {err}"))
    }
}
