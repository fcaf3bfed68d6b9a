// Axum API server module
//
// Thin HTTP wrapper around CropRecommender. Recommendation work runs on the
// blocking pool; identical requests for the same month are served from cache.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::error::RecommendError;
use crate::model::FarmQuery;
use crate::recommender::{CropRecommender, RecommendOptions};
use crate::season::ScoringContext;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<CropRecommender>,
    pub cache: Cache<String, serde_json::Value>,
}

impl AppState {
    /// Load catalog and district index from `config.data_dir`
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading crop data...");
        let recommender = CropRecommender::load(&config.data_dir)?;
        tracing::info!(
            "Loaded {} crops across {} districts",
            recommender.catalog().len(),
            recommender.districts().len()
        );
        Ok(Self::from_recommender(recommender, config))
    }

    pub fn from_recommender(recommender: CropRecommender, config: &ServerConfig) -> Self {
        tracing::info!("Initializing Moka cache...");
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            recommender: Arc::new(recommender),
            cache,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/recommendations", post(recommend_crops))
        .route("/api/crops", get(list_crops))
        .route("/api/crops/:name", get(get_crop))
        .route("/api/districts/:district/crops", get(district_crops))
        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// POST /recommendations
///
/// Body: farm query fields plus optional `sortBy`, `riskFilter`,
/// `waterFilter`, `weatherOutlook`, `weatherAvailable` and `month`.
/// Returns the ranked list as a JSON array (possibly empty).
async fn recommend_crops(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let ctx = request.scoring_context()?;

    let cache_key = format!(
        "recommend:{}:{}",
        ctx.month,
        serde_json::to_string(&request)
            .map_err(|e| AppError::Internal(format!("JSON serialization error: {}", e)))?
    );

    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for recommendation query");
        return Ok(Json(cached));
    }

    tracing::info!(
        "Recommending crops for district '{}' ({} season)",
        request.query.district,
        ctx.season
    );

    // CPU-bound work: run in blocking thread pool
    let recommender = state.recommender.clone();
    let result = tokio::task::spawn_blocking(move || -> Result<serde_json::Value, AppError> {
        let ranked = recommender.recommend_with(&request.query, &ctx, &request.options)?;
        serde_json::to_value(&ranked)
            .map_err(|e| AppError::Internal(format!("JSON serialization error: {}", e)))
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    state.cache.insert(cache_key, result.clone()).await;

    Ok(Json(result))
}

async fn list_crops(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let crops = state.recommender.catalog().crops();
    let data = serde_json::to_value(crops)
        .map_err(|e| AppError::Internal(format!("JSON serialization error: {}", e)))?;

    Ok(Json(serde_json::json!({
        "rows": crops.len(),
        "data": data,
    })))
}

async fn get_crop(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let crop = state
        .recommender
        .catalog()
        .get(name.trim())
        .ok_or_else(|| AppError::NotFound(format!("Crop {} not found", name)))?;

    serde_json::to_value(crop)
        .map(Json)
        .map_err(|e| AppError::Internal(format!("JSON serialization error: {}", e)))
}

/// Crop names allowed in a district; unknown districts give an empty array
async fn district_crops(
    State(state): State<AppState>,
    Path(district): Path<String>,
) -> Json<Vec<String>> {
    let names = state
        .recommender
        .districts()
        .sorted_crops_for(district.trim())
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(names)
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(flatten)]
    pub query: FarmQuery,

    #[serde(flatten)]
    pub options: RecommendOptions,

    /// Defaults to the server's current local month
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,

    /// Whether the caller has live weather data for the farm
    #[serde(default)]
    pub weather_available: bool,
}

impl RecommendationRequest {
    fn scoring_context(&self) -> Result<ScoringContext, RecommendError> {
        let ctx = match self.month {
            Some(month) => ScoringContext::for_month(month)?,
            None => ScoringContext::current(),
        };
        Ok(ctx.with_weather(self.weather_available))
    }
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<RecommendError> for AppError {
    fn from(err: RecommendError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
