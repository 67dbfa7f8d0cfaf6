// Authentication service - business logic layer

use tracing::{info, warn};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    models::{LoginResponse, Role, SignupRequest, UpdateProfileRequest, UserResponse},
    password::PasswordService,
    repository::UserRepository,
    token::TokenCodec,
};

/// Authentication service coordinating signup, login and profile operations
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    codec: TokenCodec,
}

impl AuthService {
    pub fn new(users: UserRepository, codec: TokenCodec) -> Self {
        Self { users, codec }
    }

    /// Register a new user
    ///
    /// A client-supplied role is discarded: every signup produces a USER
    /// account. Admin accounts are only created through the admin surface.
    pub async fn signup(&self, request: SignupRequest) -> Result<UserResponse, AuthError> {
        if request.name.trim().is_empty() {
            return Err(AuthError::ValidationError("Name is required".to_string()));
        }
        if request.email.trim().is_empty() {
            return Err(AuthError::ValidationError("Email is required".to_string()));
        }
        if request.password.trim().is_empty() {
            return Err(AuthError::ValidationError("Password is required".to_string()));
        }
        if request.validate().is_err() {
            return Err(AuthError::ValidationError(
                "Email must be a valid email address".to_string(),
            ));
        }

        if let Some(requested) = &request.role {
            if !requested.eq_ignore_ascii_case("USER") {
                warn!(
                    "Signup for {} requested role '{}'; ignored",
                    request.email, requested
                );
            }
        }

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = PasswordService::hash_password(&request.password)?;
        let user = self
            .users
            .create_user(&request.name, &request.email, &password_hash, Role::User)
            .await?;

        info!("Registered new user {}", user.id);
        Ok(user.into())
    }

    /// Authenticate a user and mint a token
    ///
    /// Unknown email and wrong password produce the same error so the
    /// response cannot be used to probe which emails are registered.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordService::verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.codec.mint(&user)?;
        info!("User {} logged in", user.id);

        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }

    /// Fetch the profile of the authenticated principal
    pub async fn profile(&self, principal_id: i64) -> Result<UserResponse, AuthError> {
        let user = self
            .users
            .find_by_id(principal_id)
            .await?
            .ok_or(AuthError::PrincipalNotFound)?;

        Ok(user.into())
    }

    /// Update name and/or email of the authenticated principal
    ///
    /// Role and id are not reachable from this path.
    pub async fn update_profile(
        &self,
        principal_id: i64,
        request: UpdateProfileRequest,
    ) -> Result<UserResponse, AuthError> {
        let user = self
            .users
            .update_profile(principal_id, request.name.as_deref(), request.email.as_deref())
            .await?;

        info!("User {} updated profile", principal_id);
        Ok(user.into())
    }
}
