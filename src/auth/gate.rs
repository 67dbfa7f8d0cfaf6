// Authentication gate: a single per-request interceptor that turns a bearer
// token into a request-scoped SecurityContext.
//
// The gate never rejects a request itself. A missing, malformed or invalid
// token leaves the request anonymous; it is the route policy's job to reject
// anonymous requests on protected routes. This keeps public routes (login,
// signup) reachable even when a stale or garbage header is present.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::auth::error::AuthError;
use crate::auth::models::{Role, SecurityContext};
use crate::AppState;

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Per-request authentication middleware
///
/// On success the SecurityContext is attached to the request extensions for
/// the remainder of this request only; it is never persisted or shared.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(context) = resolve_context(&state, request.headers()).await {
        request.extensions_mut().insert(context);
    }
    next.run(request).await
}

/// Resolve a SecurityContext from the request headers, or None for anonymous
///
/// The principal is reloaded from the user store by the token's subject so
/// that deleted accounts are rejected and role changes take effect without
/// waiting for token expiry: the context carries the *stored* role, not the
/// role embedded in the token.
async fn resolve_context(state: &AppState, headers: &HeaderMap) -> Option<SecurityContext> {
    let token = bearer_token(headers)?;

    let claims = match state.token_codec.verify(token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!("Rejected bearer token, proceeding as anonymous: {}", e);
            return None;
        }
    };

    match state.users.find_by_email(&claims.sub).await {
        Ok(Some(user)) => Some(SecurityContext {
            principal_id: user.id,
            email: user.email,
            role: user.role,
        }),
        Ok(None) => {
            warn!("Valid token for nonexistent principal: {}", claims.sub);
            None
        }
        Err(e) => {
            warn!("Principal lookup failed during authentication: {}", e);
            None
        }
    }
}

/// Authenticated principal extractor for handlers
///
/// Reads the SecurityContext placed in the request extensions by the gate.
/// Rejection maps to 401, though on policy-protected routes the policy layer
/// will already have rejected anonymous requests.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub principal_id: i64,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = parts
            .extensions
            .get::<SecurityContext>()
            .cloned()
            .ok_or(AuthError::MissingToken)?;

        Ok(AuthenticatedUser {
            principal_id: context.principal_id,
            email: context.email,
            role: context.role,
        })
    }
}
