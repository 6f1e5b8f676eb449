use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::middleware::auth_middleware::{require_role, AuthUser};
use crate::models::user::ROLE_ADMIN;
use crate::services::auth_service::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::JwtConfig;

/// Rutas públicas de autenticación
pub fn public_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Rutas de autenticación que requieren token
pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/me", get(me))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let service = AuthService::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = service.login(request).await?;
    Ok(Json(response))
}

async fn register(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    require_role(&user, ROLE_ADMIN)?;
    let service = AuthService::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = service.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>, AppError> {
    let service = AuthService::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = service.current_user(&user.id).await?;
    Ok(Json(response))
}
