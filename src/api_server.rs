// Axum API server
//
// Purpose: HTTP routes over the group summary builder and catalog
// Report building is CPU-bound and runs on the blocking pool.

#[cfg(feature = "api")]
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};

#[cfg(feature = "api")]
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use crate::catalog::build_catalog;

#[cfg(feature = "api")]
use crate::data::{DataProvider, FrameDataProvider, GroupFilter};

#[cfg(feature = "api")]
use crate::error::SoilError;

#[cfg(feature = "api")]
use crate::formatters::JsonFormatter;

#[cfg(feature = "api")]
use crate::reference_table::ReferenceTable;

#[cfg(feature = "api")]
use crate::summary::GroupSummaryBuilder;

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn DataProvider>,
    pub reference: &'static ReferenceTable,
}

#[cfg(feature = "api")]
impl AppState {
    /// Open the dataset at `data_path` (CSV or Parquet).
    pub fn new(data_path: &std::path::Path) -> anyhow::Result<Self> {
        tracing::info!("Opening dataset {:?}...", data_path);
        let provider = FrameDataProvider::open(data_path)?;
        Ok(Self::with_provider(Arc::new(provider)))
    }

    pub fn with_provider(provider: Arc<dyn DataProvider>) -> Self {
        Self {
            provider,
            reference: ReferenceTable::standard(),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))

        // Interpretation (medians classified against reference ranges)
        .route("/interpretacion/municipio/:id", get(interpretation_by_id))
        .route("/interpretacion/municipio/nombre/:name", get(interpretation_by_name))

        // Descriptive statistics
        .route("/estadisticas/municipio/:id", get(statistics_by_id))
        .route("/estadisticas/municipio/nombre/:name", get(statistics_by_name))
        .route("/estadisticas/municipios", get(list_municipalities))

        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "mensaje": "Servicio de análisis químicos de suelo"
    }))
}

#[cfg(feature = "api")]
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(feature = "api")]
async fn interpretation_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    interpretation(state, GroupFilter::ById(id)).await
}

#[cfg(feature = "api")]
async fn interpretation_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    interpretation(state, GroupFilter::ByName(name)).await
}

#[cfg(feature = "api")]
async fn statistics_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    statistics(state, GroupFilter::ById(id)).await
}

#[cfg(feature = "api")]
async fn statistics_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    statistics(state, GroupFilter::ByName(name)).await
}

#[cfg(feature = "api")]
async fn interpretation(state: AppState, filter: GroupFilter) -> Result<Json<serde_json::Value>, AppError> {
    tracing::info!("Interpretation report for {}", filter);

    let body = tokio::task::spawn_blocking(move || {
        let builder = GroupSummaryBuilder::new(state.provider.as_ref(), state.reference);
        builder
            .interpretation_report(&filter)
            .map(|report| JsonFormatter::interpretation(&report))
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    Ok(Json(body))
}

#[cfg(feature = "api")]
async fn statistics(state: AppState, filter: GroupFilter) -> Result<Json<serde_json::Value>, AppError> {
    tracing::info!("Statistics report for {}", filter);

    let body = tokio::task::spawn_blocking(move || {
        let builder = GroupSummaryBuilder::new(state.provider.as_ref(), state.reference);
        builder
            .statistics_report(&filter)
            .map(|report| JsonFormatter::statistics(&report))
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    Ok(Json(body))
}

#[cfg(feature = "api")]
async fn list_municipalities(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let body = tokio::task::spawn_blocking(move || {
        build_catalog(state.provider.as_ref()).map(|catalog| JsonFormatter::catalog(&catalog))
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    Ok(Json(body))
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
pub enum AppError {
    DataSource(String),
    Internal(String),
}

#[cfg(feature = "api")]
impl From<SoilError> for AppError {
    fn from(err: SoilError) -> Self {
        if err.is_data_source() {
            AppError::DataSource(err.to_string())
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let message = match self {
            AppError::DataSource(msg) => {
                tracing::error!("Data source failure: {}", msg);
                format!("Database error: {}", msg)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal failure: {}", msg);
                format!("Error: {}", msg)
            }
        };

        let body = Json(serde_json::json!({
            "detail": message
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
