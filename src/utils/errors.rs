//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Active contact with email '{0}' already exists")]
    DuplicateActiveContact(String),

    #[error("Bus number '{0}' already exists")]
    DuplicateBusNumber(String),

    #[error("Route number '{0}' already exists")]
    DuplicateRouteNumber(String),

    #[error("Invalid {field} ID")]
    InvalidReference { field: &'static str, value: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

lazy_static::lazy_static! {
    // En producción los detalles internos no se exponen al cliente
    static ref EXPOSE_DETAILS: bool =
        std::env::var("ENVIRONMENT").map(|e| e != "production").unwrap_or(true);
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Database Error".to_string(),
                        message: "An error occurred while accessing the database".to_string(),
                        details: EXPOSE_DETAILS.then(|| json!({ "sql_error": e.to_string() })),
                        code: Some("DB_ERROR".to_string()),
                    },
                )
            }

            AppError::Validation(e) => {
                tracing::warn!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::DuplicateActiveContact(email) => {
                tracing::warn!("Duplicate active contact: {}", email);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Duplicate Active Contact".to_string(),
                        message: "Active contact with this email already exists".to_string(),
                        details: None,
                        code: Some("DUPLICATE_ACTIVE_CONTACT".to_string()),
                    },
                )
            }

            AppError::DuplicateBusNumber(number) => {
                tracing::warn!("Duplicate bus number: {}", number);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Duplicate Bus Number".to_string(),
                        message: "Bus number already exists".to_string(),
                        details: None,
                        code: Some("DUPLICATE_BUS_NUMBER".to_string()),
                    },
                )
            }

            AppError::DuplicateRouteNumber(number) => {
                tracing::warn!("Duplicate route number: {}", number);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Duplicate Route Number".to_string(),
                        message: "Route number already exists".to_string(),
                        details: None,
                        code: Some("DUPLICATE_ROUTE_NUMBER".to_string()),
                    },
                )
            }

            AppError::InvalidReference { field, value } => {
                tracing::warn!("Invalid {} reference: {}", field, value);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Invalid Reference".to_string(),
                        message: format!("Invalid {} ID", field),
                        details: None,
                        code: Some("INVALID_REFERENCE".to_string()),
                    },
                )
            }

            AppError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized access: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse {
                        error: "Unauthorized".to_string(),
                        message: msg,
                        details: None,
                        code: Some("UNAUTHORIZED".to_string()),
                    },
                )
            }

            AppError::Forbidden(msg) => {
                tracing::warn!("Forbidden access: {}", msg);
                (
                    StatusCode::FORBIDDEN,
                    ErrorResponse {
                        error: "Forbidden".to_string(),
                        message: msg,
                        details: None,
                        code: Some("FORBIDDEN".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                tracing::warn!("Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: msg,
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Conflict".to_string(),
                        message: msg,
                        details: None,
                        code: Some("CONFLICT".to_string()),
                    },
                )
            }

            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Bad Request".to_string(),
                        message: msg,
                        details: None,
                        code: Some("BAD_REQUEST".to_string()),
                    },
                )
            }

            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        details: EXPOSE_DETAILS.then(|| json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }

            AppError::Jwt(msg) => {
                tracing::warn!("JWT error: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse {
                        error: "JWT Error".to_string(),
                        message: msg,
                        details: None,
                        code: Some("JWT_ERROR".to_string()),
                    },
                )
            }

            AppError::Hash(msg) => {
                tracing::error!("Hash error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Hash Error".to_string(),
                        message: "An error occurred while processing credentials".to_string(),
                        details: EXPOSE_DETAILS.then(|| json!({ "hash_error": msg })),
                        code: Some("HASH_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación con detalle de campo
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.message = Some(message.into());

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para envolver un error de campo del validador
pub fn invalid_field(field: &'static str, error: validator::ValidationError) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);
    AppError::Validation(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_uniqueness_errors_map_to_bad_request() {
        assert_eq!(
            status_of(AppError::DuplicateActiveContact("a@b.com".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::DuplicateBusNumber("BUS-001".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::DuplicateRouteNumber("R-12".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_reference_and_lookup_errors() {
        assert_eq!(
            status_of(AppError::InvalidReference {
                field: "driver",
                value: "cccccccccccccccccccccccc".into()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::NotFound("Bus not found".into())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_auth_errors() {
        assert_eq!(
            status_of(AppError::Unauthorized("no token".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_of(AppError::Jwt("expired".into())), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_validation_error_carries_field() {
        let err = validation_error("email", "Email is required");
        match err {
            AppError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("email"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
