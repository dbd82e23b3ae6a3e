use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Json,
    routing::put,
    Extension, Router,
};
use serde::Serialize;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::api::ApiError;
use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::models::{MetricsSnapshot, RecordMetricsRequest};
use crate::services::MetricsService;

#[derive(Clone)]
pub struct MetricsState {
    pub metrics_service: MetricsService,
}

pub fn metrics_routes(db: PgPool, auth_service: AuthService) -> Router {
    let state = MetricsState {
        metrics_service: MetricsService::new(db),
    };

    Router::new()
        .route("/", put(record_metrics))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub success: bool,
    pub metrics: MetricsSnapshot,
}

/// Record a health metrics snapshot. Omitted counters default to zero.
pub async fn record_metrics(
    State(state): State<MetricsState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<RecordMetricsRequest>,
) -> Result<Json<MetricsResponse>, (StatusCode, Json<ApiError>)> {
    if let Err(e) = request.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details(
                "VALIDATION_ERROR",
                "Invalid metrics data",
                json!({ "errors": e.to_string() }),
            )),
        ));
    }

    let metrics = state
        .metrics_service
        .record(session.user_id, request)
        .await
        .map_err(|e| {
            tracing::error!("Failed to record metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("DATABASE_ERROR", "Failed to record metrics")),
            )
        })?;

    Ok(Json(MetricsResponse {
        success: true,
        metrics,
    }))
}
