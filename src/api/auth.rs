use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use sqlx::PgPool;
use tracing::{debug, error};

use crate::auth::{
    extract_bearer_token, AuthError, AuthResponse, AuthService, LoginRequest, MessageResponse,
    RefreshTokenRequest, RegisterRequest, TokenResponse,
};
use crate::services::MetricsService;

#[derive(Clone)]
pub struct AuthApiState {
    pub auth_service: AuthService,
    pub metrics_service: MetricsService,
}

/// Authentication routes
pub fn auth_routes(db: PgPool, auth_service: AuthService) -> Router {
    let state = AuthApiState {
        auth_service,
        metrics_service: MetricsService::new(db),
    };

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
        .route("/logout", post(logout))
        .with_state(state)
}

/// Register a new user
#[tracing::instrument(skip(state, request))]
async fn register(
    State(state): State<AuthApiState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthError> {
    let response = state.auth_service.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Login user
#[tracing::instrument(skip(state, request))]
async fn login(
    State(state): State<AuthApiState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let response = state.auth_service.login(request).await?;
    Ok(Json(response))
}

/// Refresh access token
#[tracing::instrument(skip(state, request))]
async fn refresh_token(
    State(state): State<AuthApiState>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    let response = state.auth_service.refresh_token(request).await?;
    Ok(Json(response))
}

/// Logout user. Besides revoking tokens, logout sweeps metrics snapshots
/// older than a day out of the store.
#[tracing::instrument(skip(state, request))]
async fn logout(
    State(state): State<AuthApiState>,
    request: Request,
) -> Result<Json<MessageResponse>, AuthError> {
    // Extract the token from the authorization header
    let auth_header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(AuthError::MissingAuthHeader)?;

    let token = extract_bearer_token(auth_header)?;
    let response = state.auth_service.logout(token).await?;

    let purged = state.metrics_service.purge_stale().await.map_err(|e| {
        error!("Failed to purge stale metrics on logout: {}", e);
        AuthError::Internal(e)
    })?;
    debug!("Purged {} stale metrics snapshots", purged);

    Ok(Json(response))
}
