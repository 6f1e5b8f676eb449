//! Middleware de autenticación
//!
//! Verifica el token bearer y expone la identidad {id, role} como extensión
//! del request; sin credencial válida ninguna lógica de negocio se ejecuta.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtConfig};

/// Identidad verificada del llamante
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub role: String,
}

/// Middleware de autenticación por token bearer
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &JwtConfig::from(&state.config))?;

    request.extensions_mut().insert(AuthUser {
        id: claims.sub,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

/// Verificar que el llamante tenga un rol concreto
pub fn require_role(user: &AuthUser, role: &str) -> Result<(), AppError> {
    if user.role == role {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Requires '{}' role",
            role
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_role() {
        let admin = AuthUser {
            id: "507f1f77bcf86cd799439011".to_string(),
            role: "admin".to_string(),
        };
        assert!(require_role(&admin, "admin").is_ok());
        assert!(matches!(
            require_role(&admin, "staff"),
            Err(AppError::Forbidden(_))
        ));
    }
}
