use axum::{routing::get, Router};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::api::activities::activity_routes;
use crate::api::auth::auth_routes;
use crate::api::dashboard::dashboard_routes;
use crate::api::exercises::exercise_routes;
use crate::api::health::health_check;
use crate::api::metrics::metrics_routes;
use crate::api::nutrition::nutrition_routes;
use crate::api::onboarding::onboarding_routes;
use crate::api::progress::progress_routes;
use crate::api::recommendations::recommendation_routes;
use crate::api::user_data::user_data_routes;
use crate::api::users::users_routes;
use crate::auth::{cors_layer, security_headers_layer, AuthService};
use crate::config::AppConfig;
use crate::db::DocumentStore;
use crate::services::CompletionClient;

/// Assemble the full API router. Every feature router owns its services;
/// only the auth service and document store are shared.
pub fn create_routes(db: PgPool, completion: CompletionClient, config: &AppConfig) -> Router {
    let auth_service = AuthService::new(db.clone(), &config.jwt_secret);
    let documents = DocumentStore::new(db.clone());

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes(db.clone(), auth_service.clone()))
        .nest(
            "/api/onboarding",
            onboarding_routes(db.clone(), documents.clone(), auth_service.clone()),
        )
        .nest(
            "/api/users",
            users_routes(db.clone(), documents.clone(), auth_service.clone()),
        )
        .nest(
            "/api/dashboard",
            dashboard_routes(db.clone(), documents.clone(), auth_service.clone()),
        )
        .nest(
            "/api/user-data",
            user_data_routes(db.clone(), documents.clone(), auth_service.clone()),
        )
        .nest(
            "/api/metrics",
            metrics_routes(db.clone(), auth_service.clone()),
        )
        .nest(
            "/api/activities",
            activity_routes(db.clone(), auth_service.clone()),
        )
        .nest(
            "/api/progress",
            progress_routes(db.clone(), auth_service.clone()),
        )
        .nest(
            "/api/exercises",
            exercise_routes(documents.clone(), auth_service.clone()),
        )
        .nest(
            "/api/recommendations",
            recommendation_routes(
                db.clone(),
                documents.clone(),
                completion.clone(),
                auth_service.clone(),
            ),
        )
        .nest(
            "/api/nutrition",
            nutrition_routes(db, documents, completion, auth_service),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security_headers_layer())
                .layer(cors_layer()),
        )
}
