use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::ApiError;
use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::db::DocumentStore;
use crate::models::CreateExerciseRequest;
use crate::services::{ExerciseError, ExerciseService};

#[derive(Clone)]
pub struct ExercisesState {
    pub exercise_service: ExerciseService,
}

pub fn exercise_routes(documents: DocumentStore, auth_service: AuthService) -> Router {
    let state = ExercisesState {
        exercise_service: ExerciseService::new(documents),
    };

    Router::new()
        .route("/", get(list_exercises).post(create_exercise))
        .route("/:id", put(update_exercise).delete(delete_exercise))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ListExercisesQuery {
    pub category_id: Option<i32>,
}

pub async fn list_exercises(
    State(state): State<ExercisesState>,
    Extension(session): Extension<UserSession>,
    Query(query): Query<ListExercisesQuery>,
) -> Result<Json<Value>, (StatusCode, Json<ApiError>)> {
    let exercises = state
        .exercise_service
        .list(session.user_id, query.category_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch exercises: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("DATABASE_ERROR", "Failed to fetch exercises")),
            )
        })?;

    Ok(Json(json!({ "exercises": exercises })))
}

/// Create an exercise after checking the category's required fields
pub async fn create_exercise(
    State(state): State<ExercisesState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CreateExerciseRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<ApiError>)> {
    if let Err(message) = request.validate_category_fields() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("VALIDATION_ERROR", &message)),
        ));
    }

    let exercise = state
        .exercise_service
        .create(session.user_id, &request)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create exercise: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("DATABASE_ERROR", "Failed to manage exercise")),
            )
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "exercise": exercise })),
    ))
}

pub async fn update_exercise(
    State(state): State<ExercisesState>,
    Extension(session): Extension<UserSession>,
    Path(id): Path<Uuid>,
    Json(patch): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<ApiError>)> {
    if !patch.is_object() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(
                "VALIDATION_ERROR",
                "Valid exercise data is required",
            )),
        ));
    }

    let exercise = state
        .exercise_service
        .update(session.user_id, id, patch)
        .await
        .map_err(exercise_error)?;

    Ok(Json(json!({ "success": true, "exercise": exercise })))
}

pub async fn delete_exercise(
    State(state): State<ExercisesState>,
    Extension(session): Extension<UserSession>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<ApiError>)> {
    state
        .exercise_service
        .delete(session.user_id, id)
        .await
        .map_err(exercise_error)?;

    Ok(Json(json!({ "success": true })))
}

fn exercise_error(error: ExerciseError) -> (StatusCode, Json<ApiError>) {
    match error {
        ExerciseError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ApiError::new("NOT_FOUND", "Exercise not found")),
        ),
        ExerciseError::Forbidden => (
            StatusCode::FORBIDDEN,
            Json(ApiError::new(
                "FORBIDDEN",
                "Exercise belongs to another user",
            )),
        ),
        ExerciseError::Other(e) => {
            tracing::error!("Failed to manage exercise: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("DATABASE_ERROR", "Failed to manage exercise")),
            )
        }
    }
}
