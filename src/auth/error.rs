// Authentication and authorization error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::auth::token::TokenError;

/// Errors raised by the authentication subsystem
///
/// Every token-stage failure collapses to a generic 401 on the wire so that
/// clients cannot distinguish a bad signature from an expired token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("token rejected: {0}")]
    Token(#[from] TokenError),

    #[error("missing authentication token")]
    MissingToken,

    #[error("token subject no longer exists")]
    PrincipalNotFound,

    #[error("email already registered")]
    EmailAlreadyExists,

    #[error("insufficient role for this route")]
    RoleForbidden,

    #[error("password hashing failed")]
    PasswordHashError,

    #[error("token minting failed: {0}")]
    TokenMint(String),

    #[error("database error: {0}")]
    DatabaseError(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Token(_) => StatusCode::UNAUTHORIZED,
            AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::PrincipalNotFound => StatusCode::UNAUTHORIZED,
            AuthError::EmailAlreadyExists => StatusCode::BAD_REQUEST,
            AuthError::RoleForbidden => StatusCode::FORBIDDEN,
            AuthError::PasswordHashError => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::TokenMint(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message; deliberately non-specific for the 401 family
    pub fn client_message(&self) -> String {
        match self {
            AuthError::ValidationError(msg) => msg.clone(),
            AuthError::InvalidCredentials => "Invalid email or password".to_string(),
            AuthError::Token(_) | AuthError::MissingToken | AuthError::PrincipalNotFound => {
                "Invalid or missing authentication token".to_string()
            }
            AuthError::EmailAlreadyExists => "User already exists".to_string(),
            AuthError::RoleForbidden => "Insufficient permissions".to_string(),
            AuthError::PasswordHashError
            | AuthError::TokenMint(_)
            | AuthError::DatabaseError(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::Token(e) => warn!("Token rejected: {}", e),
            AuthError::MissingToken => warn!("Missing token on protected route"),
            AuthError::PrincipalNotFound => warn!("Token subject no longer exists"),
            AuthError::RoleForbidden => warn!("Role check failed"),
            AuthError::DatabaseError(msg) => error!("Database error in auth: {}", msg),
            AuthError::PasswordHashError => error!("Password hashing error"),
            AuthError::TokenMint(msg) => error!("Token minting error: {}", msg),
            _ => {}
        }

        let body = Json(json!({
            "error": self.client_message(),
        }));

        (self.status_code(), body).into_response()
    }
}

/// Lift auth-layer failures into the resource error type where admin
/// handlers mix principal management with resource access
impl From<AuthError> for crate::error::ApiError {
    fn from(error: AuthError) -> Self {
        use crate::error::ApiError;
        match error {
            AuthError::ValidationError(msg) => ApiError::BadRequest(msg),
            AuthError::EmailAlreadyExists => {
                ApiError::BadRequest("User already exists".to_string())
            }
            AuthError::MissingToken | AuthError::InvalidCredentials => ApiError::Unauthorized,
            AuthError::Token(_) | AuthError::PrincipalNotFound => ApiError::Unauthorized,
            AuthError::RoleForbidden => ApiError::OwnershipForbidden,
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_errors_collapse_to_unauthorized() {
        for err in [
            AuthError::Token(TokenError::Malformed),
            AuthError::Token(TokenError::InvalidSignature),
            AuthError::Token(TokenError::Expired),
            AuthError::MissingToken,
            AuthError::PrincipalNotFound,
        ] {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
            // identical message across the family: no forgery oracle
            assert_eq!(err.client_message(), "Invalid or missing authentication token");
        }
        assert_eq!(
            AuthError::InvalidCredentials.client_message(),
            "Invalid email or password"
        );
    }

    #[test]
    fn role_failures_are_forbidden() {
        assert_eq!(AuthError::RoleForbidden.status_code(), StatusCode::FORBIDDEN);
    }
}
