// HTTP handlers for authentication endpoints

use axum::{extract::State, Json};
use serde_json::json;

use crate::auth::{
    error::AuthError,
    gate::AuthenticatedUser,
    models::{LoginRequest, LoginResponse, SignupRequest, UpdateProfileRequest, UserResponse},
};
use crate::AppState;

/// Register a new user
/// POST /api/auth/signup
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "User registered successfully"),
        (status = 400, description = "Missing field or email already registered")
    ),
    tag = "auth"
)]
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<serde_json::Value>, AuthError> {
    state.auth_service.signup(request).await?;
    Ok(Json(json!({ "message": "User registered successfully" })))
}

/// Login a user
/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token minted", body = LoginResponse),
        (status = 401, description = "Invalid email or password")
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let response = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;
    Ok(Json(response))
}

/// Get the authenticated user's profile
/// GET /api/auth/profile
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    responses(
        (status = 200, description = "Current principal", body = UserResponse),
        (status = 401, description = "Invalid or missing token")
    ),
    tag = "auth"
)]
pub async fn get_profile_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<UserResponse>, AuthError> {
    let profile = state.auth_service.profile(user.principal_id).await?;
    Ok(Json(profile))
}

/// Update the authenticated user's profile (name and/or email)
/// PUT /api/auth/profile
#[utoipa::path(
    put,
    path = "/api/auth/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated"),
        (status = 401, description = "Invalid or missing token")
    ),
    tag = "auth"
)]
pub async fn update_profile_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<serde_json::Value>, AuthError> {
    state
        .auth_service
        .update_profile(user.principal_id, request)
        .await?;
    Ok(Json(json!({ "message": "Profile updated successfully" })))
}
