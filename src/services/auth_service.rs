//! Servicio de autenticación
//!
//! Login contra la colección de usuarios con bcrypt y emisión de tokens JWT.

use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::models::id::EntityId;
use crate::models::user::{User, ROLE_STAFF, USER_ROLES};
use crate::repositories::user_repository::UserRepository;
use crate::repositories::UserStore;
use crate::utils::errors::{invalid_field, AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};
use crate::utils::validation::{validate_email, validate_enum};

pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt_config: JwtConfig,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool)),
            jwt_config,
        }
    }

    #[cfg(test)]
    pub fn with_store(users: Arc<dyn UserStore>, jwt_config: JwtConfig) -> Self {
        Self { users, jwt_config }
    }

    /// Autenticar un usuario y emitir un token
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        let user = self
            .users
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        if !valid {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = generate_token(user.id.as_str(), &user.role, &self.jwt_config)?;

        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }

    /// Registrar un nuevo usuario de personal
    pub async fn register(&self, request: RegisterRequest) -> AppResult<UserResponse> {
        request.validate()?;

        let role = request.role.unwrap_or_else(|| ROLE_STAFF.to_string());
        validate_enum(&role, USER_ROLES).map_err(|e| invalid_field("role", e))?;

        validate_email(&request.email).map_err(|e| invalid_field("email", e))?;

        if self
            .users
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "User with username '{}' already exists",
                request.username
            )));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        let user = User {
            id: EntityId::new(),
            username: request.username,
            password_hash,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email.to_lowercase(),
            role,
            created_at: chrono::Utc::now(),
        };

        self.users.insert(&user).await?;

        Ok(user.into())
    }

    /// Obtener el usuario autenticado actual
    pub async fn current_user(&self, user_id: &str) -> AppResult<UserResponse> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }
}
