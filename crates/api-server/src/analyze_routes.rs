use std::sync::Arc;

use analysis_core::DocumentText;
use analysis_orchestrator::{normalize_query, DocumentAnalysisOrchestrator, DocumentReport};
use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{error::ApiError, pdf, AppState};

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub status: &'static str,
    pub query: String,
    pub analysis: DocumentReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_processed: Option<String>,
}

/// Pre-extracted text, for callers that decode documents themselves.
#[derive(Deserialize)]
pub struct AnalyzeTextRequest {
    pub text: Option<String>,
    pub pages: Option<Vec<String>>,
    pub query: Option<String>,
}

pub fn analyze_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/analyze", post(analyze_upload))
        .route("/analyze/text", post(analyze_text))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Financial Document Analyzer API is running" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

struct Upload {
    filename: String,
    bytes: Vec<u8>,
}

fn is_pdf_filename(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".pdf")
}

/// `multipart/form-data` with a `file` part (PDF) and an optional `query` part.
async fn analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let max_bytes = state.config.max_upload_bytes;
    let mut upload: Option<Upload> = None;
    let mut query: Option<String> = None;

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                if !is_pdf_filename(&filename) {
                    return Err(ApiError::BadRequest(
                        "Only PDF uploads are supported.".to_string(),
                    ));
                }

                let mut bytes = Vec::new();
                while let Some(chunk) = field.chunk().await? {
                    if bytes.len() + chunk.len() > max_bytes {
                        return Err(ApiError::PayloadTooLarge { max_bytes });
                    }
                    bytes.extend_from_slice(&chunk);
                }
                upload = Some(Upload { filename, bytes });
            }
            Some("query") => query = Some(field.text().await?),
            other => tracing::debug!(field = ?other, "Ignoring unexpected form field"),
        }
    }

    let Upload { filename, bytes } = upload
        .ok_or_else(|| ApiError::BadRequest("Missing 'file' form field.".to_string()))?;
    let query = normalize_query(query.as_deref());

    tracing::info!(file = %filename, bytes = bytes.len(), "Received document upload");
    let document = pdf::load_document(bytes).await?;
    let analysis = run_analysis(state.orchestrator.clone(), query.clone(), document).await?;

    Ok(Json(AnalyzeResponse {
        status: "success",
        query,
        analysis,
        file_processed: Some(filename),
    }))
}

async fn analyze_text(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let document = match (req.pages, req.text) {
        (Some(pages), _) if !pages.is_empty() => DocumentText::from_pages(pages),
        (_, Some(text)) => DocumentText::from_text(text),
        _ => {
            return Err(ApiError::BadRequest(
                "Provide either 'text' or a non-empty 'pages' list.".to_string(),
            ))
        }
    };
    let query = normalize_query(req.query.as_deref());
    let analysis = run_analysis(state.orchestrator.clone(), query.clone(), document).await?;

    Ok(Json(AnalyzeResponse {
        status: "success",
        query,
        analysis,
        file_processed: None,
    }))
}

async fn run_analysis(
    orchestrator: Arc<DocumentAnalysisOrchestrator>,
    query: String,
    document: DocumentText,
) -> Result<DocumentReport, ApiError> {
    let report = tokio::task::spawn_blocking(move || orchestrator.analyze(&query, &document))
        .await
        .context("Analysis task failed")?;
    Ok(report)
}
