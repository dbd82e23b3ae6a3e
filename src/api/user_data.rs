use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Json,
    routing::put,
    Extension, Router,
};
use serde::Serialize;
use sqlx::PgPool;

use crate::api::ApiError;
use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::db::DocumentStore;
use crate::models::{AiRecommendation, UpdateUserDataRequest, UserProfile};
use crate::services::ProfileService;

#[derive(Clone)]
pub struct UserDataState {
    pub profile_service: ProfileService,
}

pub fn user_data_routes(db: PgPool, documents: DocumentStore, auth_service: AuthService) -> Router {
    let state = UserDataState {
        profile_service: ProfileService::new(db, documents),
    };

    Router::new()
        .route("/", put(update_user_data))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDataResponse {
    pub success: bool,
    pub user_data: UserProfile,
    pub ai_recommendation: AiRecommendation,
}

/// Partial profile update. Only whitelisted fields are applied, and every
/// successful update records a fresh recommendation prompt.
pub async fn update_user_data(
    State(state): State<UserDataState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<UpdateUserDataRequest>,
) -> Result<Json<UpdateUserDataResponse>, (StatusCode, Json<ApiError>)> {
    if request.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("VALIDATION_ERROR", "No valid fields to update")),
        ));
    }

    match state
        .profile_service
        .update_profile_fields(session.user_id, request)
        .await
    {
        Ok(Some((user_data, ai_recommendation))) => Ok(Json(UpdateUserDataResponse {
            success: true,
            user_data,
            ai_recommendation,
        })),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError::new("NOT_FOUND", "User profile not found")),
        )),
        Err(e) => {
            tracing::error!("Failed to update user data: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("DATABASE_ERROR", "Failed to update user data")),
            ))
        }
    }
}
