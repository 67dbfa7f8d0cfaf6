// Per-resource ownership guard
//
// Route policy decides whether a role may reach a handler at all; this module
// decides whether the authenticated principal may touch the specific record
// the handler loaded. Ownership is assigned at creation from the server-side
// identity and is immutable afterwards; there is no transfer operation.

use tracing::warn;

use crate::auth::gate::AuthenticatedUser;
use crate::error::ApiError;

/// A resource bound to exactly one owning principal
pub trait Owned {
    fn owner_id(&self) -> i64;
}

/// Confirm the principal owns the resource, or holds ADMIN
///
/// Callers resolve existence first: a missing id is 404 before this check
/// runs, a foreign id is 403 here.
pub fn ensure_owner(user: &AuthenticatedUser, resource: &impl Owned) -> Result<(), ApiError> {
    if user.is_admin() || resource.owner_id() == user.principal_id {
        Ok(())
    } else {
        warn!(
            "Principal {} attempted to access a resource owned by {}",
            user.principal_id,
            resource.owner_id()
        );
        Err(ApiError::OwnershipForbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;

    struct Record {
        owner: i64,
    }

    impl Owned for Record {
        fn owner_id(&self) -> i64 {
            self.owner
        }
    }

    fn user(id: i64, role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            principal_id: id,
            email: format!("u{}@x.com", id),
            role,
        }
    }

    #[test]
    fn owner_may_access_own_record() {
        assert!(ensure_owner(&user(1, Role::User), &Record { owner: 1 }).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let result = ensure_owner(&user(2, Role::User), &Record { owner: 1 });
        assert!(matches!(result, Err(ApiError::OwnershipForbidden)));
    }

    #[test]
    fn admin_bypasses_ownership() {
        assert!(ensure_owner(&user(99, Role::Admin), &Record { owner: 1 }).is_ok());
    }
}
