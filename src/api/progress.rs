use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use serde_json::Value;
use sqlx::PgPool;

use crate::api::ApiError;
use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::models::Timeframe;
use crate::services::ProgressService;

#[derive(Clone)]
pub struct ProgressState {
    pub progress_service: ProgressService,
}

pub fn progress_routes(db: PgPool, auth_service: AuthService) -> Router {
    let state = ProgressState {
        progress_service: ProgressService::new(db),
    };

    Router::new()
        .route("/", get(get_progress))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    pub timeframe: Option<String>,
}

/// Progress history for a timeframe, keyed by the timeframe name in the
/// response body. Fetch failures degrade to an empty history.
pub async fn get_progress(
    State(state): State<ProgressState>,
    Extension(session): Extension<UserSession>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<Value>, (StatusCode, Json<ApiError>)> {
    let requested = query.timeframe.as_deref().unwrap_or("daily");
    let timeframe = Timeframe::parse(requested).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(
                "VALIDATION_ERROR",
                "Invalid timeframe. Must be daily, monthly, or yearly",
            )),
        )
    })?;

    let entries = match state
        .progress_service
        .for_timeframe(session.user_id, timeframe)
        .await
    {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("Failed to fetch progress data: {}", e);
            Vec::new()
        }
    };

    let entries = serde_json::to_value(entries).map_err(|e| {
        tracing::error!("Failed to serialize progress data: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::new("INTERNAL_ERROR", "Failed to fetch progress data")),
        )
    })?;

    let mut body = serde_json::Map::new();
    body.insert(timeframe.as_str().to_string(), entries);

    Ok(Json(Value::Object(body)))
}
