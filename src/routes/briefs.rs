use axum::{
    extract::{DefaultBodyLimit, State},
    routing::post,
    Router,
    Json,
    http::Method,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::{
    AppState,
    error::AppError,
    models::{BriefExtraction, Document, Table},
    services::template,
};
use tower_http::cors::{CorsLayer, Any};

pub fn routes(max_body_bytes: usize) -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/briefs/analyze", post(analyze_brief))
        .route("/briefs/fill", post(fill_template))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(cors)
}

#[derive(Debug, Deserialize)]
pub struct FillRequest {
    pub document: Document,
    pub template: Vec<Table>,
}

#[derive(Debug, Serialize)]
pub struct FillResponse {
    pub template: Vec<Table>,
}

pub async fn analyze_brief(
    State(state): State<Arc<AppState>>,
    Json(document): Json<Document>,
) -> Result<Json<BriefExtraction>, AppError> {
    let start = std::time::Instant::now();
    tracing::info!(
        "Analyzing brief: {} tables, {} paragraphs",
        document.tables.len(),
        document.paragraphs.len()
    );

    let extraction = state.extractor.extract(&document).map_err(|e| {
        tracing::error!("Brief extraction failed: {}", e);
        AppError::from(e)
    })?;

    tracing::info!("Brief analyzed in {:?}", start.elapsed());
    Ok(Json(extraction))
}

pub async fn fill_template(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FillRequest>,
) -> Result<Json<FillResponse>, AppError> {
    if request.template.is_empty() {
        return Err(AppError::InvalidInput("Template has no tables".to_string()));
    }

    let extraction = state.extractor.extract(&request.document).map_err(|e| {
        tracing::error!("Brief extraction failed: {}", e);
        AppError::from(e)
    })?;

    let mut filled = request.template;
    template::fill_template(&mut filled, &extraction.metrics, &extraction.grade_a_records);
    tracing::info!("Filled template with {} tables", filled.len());

    Ok(Json(FillResponse { template: filled }))
}
