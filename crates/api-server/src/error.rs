use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Uploaded file too large (max {}).", format_limit(.max_bytes))]
    PayloadTooLarge { max_bytes: usize },

    #[error("Could not read PDF document: {0}")]
    UnreadableDocument(String),

    #[error("Malformed upload: {}", .0.body_text())]
    Multipart(#[from] MultipartError),

    #[error("Unexpected error processing document.")]
    Internal(#[from] anyhow::Error),
}

fn format_limit(bytes: &usize) -> String {
    const MB: usize = 1024 * 1024;
    if *bytes >= MB && bytes % MB == 0 {
        format!("{} MB", bytes / MB)
    } else {
        format!("{} bytes", bytes)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UnreadableDocument(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Multipart(err) => err.status(),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
