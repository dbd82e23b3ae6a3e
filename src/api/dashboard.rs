use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Json,
    routing::get,
    Extension, Router,
};
use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;

use crate::api::ApiError;
use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::db::DocumentStore;
use crate::models::{Activity, MetricsSnapshot, ProgressEntry, UserProfile};
use crate::services::{
    health_stats, ActivityService, HealthStats, MetricsService, ProfileService, ProgressService,
};

const RECENT_ACTIVITY_COUNT: i64 = 5;
const RECENT_PROGRESS_COUNT: i64 = 7;

#[derive(Clone)]
pub struct DashboardState {
    pub profile_service: ProfileService,
    pub metrics_service: MetricsService,
    pub activity_service: ActivityService,
    pub progress_service: ProgressService,
}

pub fn dashboard_routes(db: PgPool, documents: DocumentStore, auth_service: AuthService) -> Router {
    let state = DashboardState {
        profile_service: ProfileService::new(db.clone(), documents),
        metrics_service: MetricsService::new(db.clone()),
        activity_service: ActivityService::new(db.clone()),
        progress_service: ProgressService::new(db),
    };

    Router::new()
        .route("/", get(get_dashboard))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

/// Everything the dashboard renders in one response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub user_data: Option<UserProfile>,
    pub metrics: Option<MetricsSnapshot>,
    pub recent_activities: Vec<Activity>,
    pub progress_data: Vec<ProgressEntry>,
    pub health_stats: Option<HealthStats>,
}

/// Aggregated dashboard data: profile, latest metrics, recent activities,
/// recent progress entries, and derived health stats
pub async fn get_dashboard(
    State(state): State<DashboardState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<DashboardResponse>, (StatusCode, Json<ApiError>)> {
    let user_id = session.user_id;

    let user_data = state
        .profile_service
        .latest_profile(user_id)
        .await
        .map_err(|e| dashboard_error("Failed to fetch user profile", e))?;

    let metrics = state
        .metrics_service
        .latest(user_id)
        .await
        .map_err(|e| dashboard_error("Failed to fetch metrics", e))?;

    let recent_activities = state
        .activity_service
        .recent(user_id, RECENT_ACTIVITY_COUNT)
        .await
        .map_err(|e| dashboard_error("Failed to fetch activities", e))?;

    let progress_data = state
        .progress_service
        .recent(user_id, RECENT_PROGRESS_COUNT)
        .await
        .map_err(|e| dashboard_error("Failed to fetch progress", e))?;

    let health_stats = user_data
        .as_ref()
        .map(|profile| health_stats(profile, Utc::now().date_naive()));

    Ok(Json(DashboardResponse {
        user_data,
        metrics,
        recent_activities,
        progress_data,
        health_stats,
    }))
}

fn dashboard_error(message: &str, error: anyhow::Error) -> (StatusCode, Json<ApiError>) {
    tracing::error!("{}: {}", message, error);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::new("DATABASE_ERROR", message)),
    )
}
