use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Json,
    routing::post,
    Extension, Router,
};
use sqlx::PgPool;

use crate::api::ApiError;
use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::db::DocumentStore;
use crate::models::NutritionPlan;
use crate::services::{CompletionClient, NutritionError, NutritionService};

#[derive(Clone)]
pub struct NutritionState {
    pub nutrition_service: NutritionService,
}

pub fn nutrition_routes(
    db: PgPool,
    documents: DocumentStore,
    completion: CompletionClient,
    auth_service: AuthService,
) -> Router {
    let state = NutritionState {
        nutrition_service: NutritionService::new(db, documents, completion),
    };

    Router::new()
        .route("/plan", post(generate_plan))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

/// Generate a personalized nutrition plan from the user's profile document
#[tracing::instrument(skip(state))]
pub async fn generate_plan(
    State(state): State<NutritionState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<NutritionPlan>, (StatusCode, Json<ApiError>)> {
    match state.nutrition_service.plan(session.user_id).await {
        Ok(plan) => Ok(Json(plan)),
        Err(NutritionError::ProfileNotFound) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError::new("NOT_FOUND", "User not found")),
        )),
        Err(e @ NutritionError::IncompleteProfile { .. }) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiError::new("INCOMPLETE_PROFILE", &e.to_string())),
        )),
        Err(NutritionError::Other(e)) => {
            tracing::error!("Failed to generate nutrition plan: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new(
                    "RECOMMENDATION_ERROR",
                    "Failed to generate nutrition plan",
                )),
            ))
        }
    }
}
