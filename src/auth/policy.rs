// Route-level authorization policy
//
// A static, ordered table of path-prefix rules evaluated top to bottom,
// first match wins. The policy is purely role-based and knows nothing about
// individual resource ownership; that finer-grained check happens inside the
// handlers, where the specific record has been loaded.

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::warn;

use crate::auth::error::AuthError;
use crate::auth::models::{Role, SecurityContext};

/// Access requirement for a group of routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Reachable without a SecurityContext
    Public,
    /// Requires a SecurityContext whose role appears in the list
    Roles(&'static [Role]),
    /// Requires a SecurityContext of any role
    Authenticated,
}

const USER_OR_ADMIN: &[Role] = &[Role::User, Role::Admin];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// The route table. Order matters: the first matching prefix wins.
const RULES: &[(&str, Access)] = &[
    ("/api/auth", Access::Public),
    ("/api/admin", Access::Roles(ADMIN_ONLY)),
    ("/api/users", Access::Roles(ADMIN_ONLY)),
    ("/api/transaction", Access::Roles(USER_OR_ADMIN)),
    ("/api/budget", Access::Roles(USER_OR_ADMIN)),
    ("/api/savings", Access::Roles(USER_OR_ADMIN)),
    ("/api/exports", Access::Roles(USER_OR_ADMIN)),
    ("/api/predict", Access::Roles(USER_OR_ADMIN)),
    ("/api/forumposts", Access::Roles(USER_OR_ADMIN)),
    ("/api/comments", Access::Roles(USER_OR_ADMIN)),
];

/// True when `path` equals `pattern` or sits below it as a path segment.
/// `/api/auth` matches `/api/auth/login` but not `/api/authx`.
fn prefix_match(pattern: &str, path: &str) -> bool {
    match path.strip_prefix(pattern) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Look up the access requirement for a request path
pub fn route_access(path: &str) -> Access {
    RULES
        .iter()
        .find(|(pattern, _)| prefix_match(pattern, path))
        .map(|(_, access)| *access)
        .unwrap_or(Access::Authenticated)
}

/// Decide whether a (possibly anonymous) request may pass
///
/// No context on a non-public route is 401; a context with the wrong role
/// is 403.
pub fn check(access: Access, context: Option<&SecurityContext>) -> Result<(), AuthError> {
    match access {
        Access::Public => Ok(()),
        Access::Authenticated => context.map(|_| ()).ok_or(AuthError::MissingToken),
        Access::Roles(allowed) => match context {
            None => Err(AuthError::MissingToken),
            Some(ctx) if allowed.contains(&ctx.role) => Ok(()),
            Some(ctx) => {
                warn!(
                    "Role check failed: principal {} has role {}, route requires {:?}",
                    ctx.principal_id, ctx.role, allowed
                );
                Err(AuthError::RoleForbidden)
            }
        },
    }
}

/// Policy middleware, layered after the authentication gate
pub async fn enforce(request: Request, next: Next) -> Result<Response, AuthError> {
    let path = request.uri().path();
    let access = route_access(path);
    let context = request.extensions().get::<SecurityContext>();

    check(access, context).map_err(|e| {
        warn!("Request to {} rejected by route policy", path);
        e
    })?;

    Ok(next.run(request).await)
}
