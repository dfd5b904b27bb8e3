use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use polyglot_core::PipelineError;

use crate::models::ErrorJson;
use crate::state::AppState;

/// Name the browser saves the download under.
const ATTACHMENT: &str = "attachment; filename=\"translated-document.pdf\"";

/// POST /translate: raw PDF bytes in, translated PDF attachment out.
pub async fn translate(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    match state.pipeline.translate_document(body.to_vec()).await {
        Ok(document) => {
            let headers = [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (header::CONTENT_DISPOSITION, ATTACHMENT.to_string()),
                (header::CONTENT_LENGTH, document.bytes.len().to_string()),
            ];
            (StatusCode::OK, headers, document.bytes).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "translation request failed");
            (status_for(&e), Json(ErrorJson::new(e.to_string()))).into_response()
        }
    }
}

/// User-fixable problems are 400s; operator and provider problems are
/// 500s.
fn status_for(error: &PipelineError) -> StatusCode {
    match error {
        PipelineError::EmptyInput | PipelineError::Extraction(_) => StatusCode::BAD_REQUEST,
        PipelineError::Configuration
        | PipelineError::Translation(_)
        | PipelineError::Emission(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
