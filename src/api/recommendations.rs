use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Json,
    routing::post,
    Extension, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::api::ApiError;
use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::db::DocumentStore;
use crate::models::GroupedRecommendations;
use crate::services::{CompletionClient, RecommendationError, RecommendationService};

#[derive(Clone)]
pub struct RecommendationsState {
    pub recommendation_service: RecommendationService,
}

pub fn recommendation_routes(
    db: PgPool,
    documents: DocumentStore,
    completion: CompletionClient,
    auth_service: AuthService,
) -> Router {
    let state = RecommendationsState {
        recommendation_service: RecommendationService::new(db, documents, completion),
    };

    Router::new()
        .route("/", post(generate_tips).get(list_tips))
        .route("/insights", post(generate_insights))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

/// Return the user's stored tips, generating a fresh batch when none exist
#[tracing::instrument(skip(state))]
pub async fn generate_tips(
    State(state): State<RecommendationsState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<Value>, (StatusCode, Json<ApiError>)> {
    match state.recommendation_service.tips(session.user_id).await {
        Ok(recommendations) => Ok(Json(json!({ "recommendations": recommendations }))),
        Err(RecommendationError::ProfileNotFound) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError::new("NOT_FOUND", "User not found")),
        )),
        Err(RecommendationError::Other(e)) => {
            tracing::error!("Failed to generate recommendations: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new(
                    "RECOMMENDATION_ERROR",
                    "Failed to generate recommendations",
                )),
            ))
        }
    }
}

pub async fn list_tips(
    State(state): State<RecommendationsState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<Value>, (StatusCode, Json<ApiError>)> {
    let recommendations = state
        .recommendation_service
        .list_tips(session.user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch recommendations: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new(
                    "DATABASE_ERROR",
                    "Failed to fetch recommendations",
                )),
            )
        })?;

    Ok(Json(json!({ "recommendations": recommendations })))
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub recommendations: GroupedRecommendations,
}

/// Generate coaching insights from the user's profile, metrics, activity,
/// and progress, grouped by focus area
#[tracing::instrument(skip(state))]
pub async fn generate_insights(
    State(state): State<RecommendationsState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<InsightsResponse>, (StatusCode, Json<ApiError>)> {
    match state.recommendation_service.insights(session.user_id).await {
        Ok(recommendations) => Ok(Json(InsightsResponse { recommendations })),
        Err(RecommendationError::ProfileNotFound) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError::new("NOT_FOUND", "User data not found")),
        )),
        Err(RecommendationError::Other(e)) => {
            tracing::error!("Failed to generate insights: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new(
                    "RECOMMENDATION_ERROR",
                    "Failed to generate recommendations",
                )),
            ))
        }
    }
}
