use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Json,
    routing::get,
    Extension, Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::api::ApiError;
use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::db::DocumentStore;
use crate::services::ProfileService;

#[derive(Clone)]
pub struct UsersState {
    pub profile_service: ProfileService,
}

pub fn users_routes(db: PgPool, documents: DocumentStore, auth_service: AuthService) -> Router {
    let state = UsersState {
        profile_service: ProfileService::new(db, documents),
    };

    Router::new()
        .route("/", get(get_profile_document).post(update_profile_document))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

/// The raw profile document for the authenticated user
pub async fn get_profile_document(
    State(state): State<UsersState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<Value>, (StatusCode, Json<ApiError>)> {
    let document = state
        .profile_service
        .profile_document(session.user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user document: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("DATABASE_ERROR", "Failed to fetch user data")),
            )
        })?
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(ApiError::new("NOT_FOUND", "User not found")),
        ))?;

    Ok(Json(json!({ "userData": document })))
}

/// Merge arbitrary fields into the profile document
pub async fn update_profile_document(
    State(state): State<UsersState>,
    Extension(session): Extension<UserSession>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<ApiError>)> {
    if !body.is_object() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(
                "VALIDATION_ERROR",
                "Request body must be a JSON object",
            )),
        ));
    }

    let updated = state
        .profile_service
        .merge_profile_document(session.user_id, body)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update user document: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("DATABASE_ERROR", "Failed to update user data")),
            )
        })?;

    if updated.is_none() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiError::new("NOT_FOUND", "User not found")),
        ));
    }

    Ok(Json(json!({ "success": true })))
}
