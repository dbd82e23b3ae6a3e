use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Json,
    routing::post,
    Extension, Router,
};
use serde::Serialize;
use sqlx::PgPool;
use validator::Validate;

use crate::api::ApiError;
use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::db::DocumentStore;
use crate::models::{OnboardingRequest, UserProfile};
use crate::services::ProfileService;

#[derive(Clone)]
pub struct OnboardingState {
    pub profile_service: ProfileService,
}

pub fn onboarding_routes(db: PgPool, documents: DocumentStore, auth_service: AuthService) -> Router {
    let state = OnboardingState {
        profile_service: ProfileService::new(db, documents),
    };

    Router::new()
        .route("/", post(complete_onboarding))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingResponse {
    pub success: bool,
    pub user_data: UserProfile,
}

/// Persist the onboarding wizard payload for the authenticated user
pub async fn complete_onboarding(
    State(state): State<OnboardingState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<OnboardingRequest>,
) -> Result<Json<OnboardingResponse>, (StatusCode, Json<ApiError>)> {
    // Validate request
    request.validate().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details(
                "VALIDATION_ERROR",
                "Invalid onboarding data",
                serde_json::json!({ "errors": e.to_string() }),
            )),
        )
    })?;

    let profile = state
        .profile_service
        .complete_onboarding(session.user_id, request)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save onboarding data: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new(
                    "DATABASE_ERROR",
                    "Failed to save onboarding data",
                )),
            )
        })?;

    Ok(Json(OnboardingResponse {
        success: true,
        user_data: profile,
    }))
}
