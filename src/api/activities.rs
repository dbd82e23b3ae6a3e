use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Json,
    routing::post,
    Extension, Router,
};
use serde::Serialize;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::api::ApiError;
use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::models::{Activity, LogActivityRequest, MetricsSnapshot};
use crate::services::ActivityService;

#[derive(Clone)]
pub struct ActivitiesState {
    pub activity_service: ActivityService,
}

pub fn activity_routes(db: PgPool, auth_service: AuthService) -> Router {
    let state = ActivitiesState {
        activity_service: ActivityService::new(db),
    };

    Router::new()
        .route("/", post(log_activity))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct LogActivityResponse {
    pub success: bool,
    pub activity: Activity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsSnapshot>,
}

/// Log an activity, optionally with a metrics snapshot taken at the same time
pub async fn log_activity(
    State(state): State<ActivitiesState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<LogActivityRequest>,
) -> Result<Json<LogActivityResponse>, (StatusCode, Json<ApiError>)> {
    if let Err(e) = request.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details(
                "VALIDATION_ERROR",
                "Missing required fields",
                json!({ "errors": e.to_string() }),
            )),
        ));
    }

    let (activity, metrics) = state
        .activity_service
        .log(session.user_id, &request)
        .await
        .map_err(|e| {
            tracing::error!("Failed to log activity: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("DATABASE_ERROR", "Failed to log activity")),
            )
        })?;

    Ok(Json(LogActivityResponse {
        success: true,
        activity,
        metrics,
    }))
}
