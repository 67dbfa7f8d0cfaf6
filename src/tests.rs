// End-to-end tests for the budget tracker API
// These run against a real Postgres instance (DATABASE_URL) and exercise the
// full middleware pipeline: authentication gate, route policy, ownership.

use super::*;
use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::auth::models::Role;
use crate::auth::password::PasswordService;

// ============================================================================
// Test Helpers
// ============================================================================

/// Connects to the test database and runs migrations
async fn create_test_pool() -> PgPool {
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgresql://budget_user:budget_pass@db:5432/budget_db".to_string());

    let pool = crate::db::create_pool(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Builds a test server over the full production router
async fn create_test_app() -> (TestServer, AppState) {
    let pool = create_test_pool().await;
    let config = AppConfig {
        database_url: String::new(),
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: "test-secret-do-not-use-in-prod".to_string(),
        token_ttl_seconds: 3600,
    };

    let state = AppState::new(pool, &config);
    let server = TestServer::new(create_router(state.clone())).unwrap();
    (server, state)
}

/// Unique email per call so parallel tests never collide on the unique index
fn unique_email(prefix: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}@example.com", prefix, nanos, n)
}

/// Signs up a fresh user and returns (token, user_id, email)
async fn signup_and_login(server: &TestServer, prefix: &str) -> (String, i64, String) {
    let email = unique_email(prefix);

    let signup = server
        .post("/api/auth/signup")
        .json(&json!({
            "name": "Test User",
            "email": email,
            "password": "hunter2!"
        }))
        .await;
    assert_eq!(signup.status_code(), StatusCode::OK);

    let login = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": "hunter2!" }))
        .await;
    assert_eq!(login.status_code(), StatusCode::OK);

    let body: serde_json::Value = login.json();
    let token = body["token"].as_str().expect("token present").to_string();
    let user_id = body["user"]["id"].as_i64().expect("user id present");
    (token, user_id, email)
}

/// Creates an admin directly through the repository (signup never grants ADMIN)
async fn create_admin(server: &TestServer, state: &AppState) -> String {
    let email = unique_email("admin");
    let hash = PasswordService::hash_password("hunter2!").unwrap();
    state
        .users
        .create_user("Test Admin", &email, &hash, Role::Admin)
        .await
        .expect("admin creation");

    let login = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": "hunter2!" }))
        .await;
    assert_eq!(login.status_code(), StatusCode::OK);
    let body: serde_json::Value = login.json();
    body["token"].as_str().unwrap().to_string()
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

fn budget_payload(category: &str) -> serde_json::Value {
    json!({
        "category": category,
        "amount": 300.0,
        "start_date": "2026-01-01",
        "end_date": "2026-01-31"
    })
}

// ============================================================================
// Signup / Login / Profile
// ============================================================================

/// Full happy path: signup, login, fetch own profile with the minted token
#[tokio::test]
async fn test_signup_login_profile_flow() {
    let (server, _state) = create_test_app().await;
    let (token, user_id, email) = signup_and_login(&server, "flow").await;

    let response = server
        .get("/api/auth/profile")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let profile: serde_json::Value = response.json();
    assert_eq!(profile["id"].as_i64().unwrap(), user_id);
    assert_eq!(profile["email"].as_str().unwrap(), email);
    assert_eq!(profile["role"].as_str().unwrap(), "USER");
}

/// Unknown email and wrong password must be indistinguishable on the wire
#[tokio::test]
async fn test_login_failures_are_generic() {
    let (server, _state) = create_test_app().await;
    let (_token, _id, email) = signup_and_login(&server, "generic").await;

    let unknown = server
        .post("/api/auth/login")
        .json(&json!({ "email": unique_email("nobody"), "password": "hunter2!" }))
        .await;
    assert_eq!(unknown.status_code(), StatusCode::UNAUTHORIZED);
    let unknown_body: serde_json::Value = unknown.json();

    let wrong_pw = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": "wrong-password" }))
        .await;
    assert_eq!(wrong_pw.status_code(), StatusCode::UNAUTHORIZED);
    let wrong_pw_body: serde_json::Value = wrong_pw.json();

    // identical message: no account-existence oracle
    assert_eq!(unknown_body["error"], wrong_pw_body["error"]);
    assert_eq!(unknown_body["error"].as_str().unwrap(), "Invalid email or password");
}

/// Duplicate signup on the same email is rejected
#[tokio::test]
async fn test_signup_duplicate_email_rejected() {
    let (server, _state) = create_test_app().await;
    let (_token, _id, email) = signup_and_login(&server, "dup").await;

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "name": "Someone Else",
            "email": email,
            "password": "another-pass"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

/// A client-supplied role at signup is discarded; accounts are always USER
#[tokio::test]
async fn test_signup_role_escalation_ignored() {
    let (server, _state) = create_test_app().await;
    let email = unique_email("escalate");

    let signup = server
        .post("/api/auth/signup")
        .json(&json!({
            "name": "Wannabe Admin",
            "email": email,
            "password": "hunter2!",
            "role": "ADMIN"
        }))
        .await;
    assert_eq!(signup.status_code(), StatusCode::OK);

    let login = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": "hunter2!" }))
        .await;
    let body: serde_json::Value = login.json();
    assert_eq!(body["user"]["role"].as_str().unwrap(), "USER");

    // and the admin surface stays closed
    let token = body["token"].as_str().unwrap();
    let response = server
        .get("/api/users")
        .add_header(AUTHORIZATION, bearer(token))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Authentication gate and route policy
// ============================================================================

/// Protected routes reject anonymous requests with 401
#[tokio::test]
async fn test_unauthenticated_request_is_401() {
    let (server, _state) = create_test_app().await;

    let response = server.get("/api/budget").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["error"].as_str().unwrap(),
        "Invalid or missing authentication token"
    );
}

/// A garbage token degrades to anonymous and yields the same generic 401
#[tokio::test]
async fn test_garbage_token_is_401() {
    let (server, _state) = create_test_app().await;

    let response = server
        .get("/api/budget")
        .add_header(AUTHORIZATION, bearer("not.a.jwt"))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["error"].as_str().unwrap(),
        "Invalid or missing authentication token"
    );
}

/// A valid token whose subject was deleted afterwards no longer authenticates
#[tokio::test]
async fn test_deleted_principal_token_is_401() {
    let (server, state) = create_test_app().await;
    let (token, user_id, _email) = signup_and_login(&server, "deleted").await;

    state.users.delete_user(user_id).await.expect("delete user");

    let response = server
        .get("/api/auth/profile")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

/// Non-admin users get 403 on the admin surface, not 404 or 401
#[tokio::test]
async fn test_user_cannot_access_admin_routes() {
    let (server, _state) = create_test_app().await;
    let (token, _id, _email) = signup_and_login(&server, "notadmin").await;

    for path in ["/api/users", "/api/admin/users", "/api/admin/transactions"] {
        let response = server
            .get(path)
            .add_header(AUTHORIZATION, bearer(&token))
            .await;
        assert_eq!(response.status_code(), StatusCode::FORBIDDEN, "path {}", path);
    }
}

// ============================================================================
// Ownership
// ============================================================================

/// One user cannot read, update or delete another user's budget
#[tokio::test]
async fn test_foreign_budget_access_is_403() {
    let (server, _state) = create_test_app().await;
    let (token_a, _id_a, _) = signup_and_login(&server, "owner-a").await;
    let (token_b, _id_b, _) = signup_and_login(&server, "owner-b").await;

    let created = server
        .post("/api/budget")
        .add_header(AUTHORIZATION, bearer(&token_a))
        .json(&budget_payload("groceries"))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let budget: serde_json::Value = created.json();
    let budget_id = budget["id"].as_i64().unwrap();

    let get = server
        .get(&format!("/api/budget/{}", budget_id))
        .add_header(AUTHORIZATION, bearer(&token_b))
        .await;
    assert_eq!(get.status_code(), StatusCode::FORBIDDEN);

    let update = server
        .put(&format!("/api/budget/{}", budget_id))
        .add_header(AUTHORIZATION, bearer(&token_b))
        .json(&budget_payload("hijacked"))
        .await;
    assert_eq!(update.status_code(), StatusCode::FORBIDDEN);

    let delete = server
        .delete(&format!("/api/budget/{}", budget_id))
        .add_header(AUTHORIZATION, bearer(&token_b))
        .await;
    assert_eq!(delete.status_code(), StatusCode::FORBIDDEN);

    // the owner still sees it untouched
    let still_there = server
        .get(&format!("/api/budget/{}", budget_id))
        .add_header(AUTHORIZATION, bearer(&token_a))
        .await;
    assert_eq!(still_there.status_code(), StatusCode::OK);
    let body: serde_json::Value = still_there.json();
    assert_eq!(body["category"].as_str().unwrap(), "groceries");
}

/// A missing resource is 404 for everyone; existence is checked before ownership
#[tokio::test]
async fn test_missing_resource_is_404() {
    let (server, _state) = create_test_app().await;
    let (token, _id, _email) = signup_and_login(&server, "missing").await;

    let response = server
        .get("/api/budget/999999999")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

/// Listing endpoints only return the caller's own rows
#[tokio::test]
async fn test_listing_is_owner_scoped() {
    let (server, _state) = create_test_app().await;
    let (token_a, id_a, _) = signup_and_login(&server, "list-a").await;
    let (token_b, _id_b, _) = signup_and_login(&server, "list-b").await;

    for category in ["rent", "food"] {
        let response = server
            .post("/api/budget")
            .add_header(AUTHORIZATION, bearer(&token_a))
            .json(&budget_payload(category))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let response = server
        .get("/api/budget")
        .add_header(AUTHORIZATION, bearer(&token_b))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let budgets: Vec<serde_json::Value> = response.json();
    assert!(budgets.is_empty(), "user B must not see user A's budgets");

    let own = server
        .get("/api/budget")
        .add_header(AUTHORIZATION, bearer(&token_a))
        .await;
    let own_budgets: Vec<serde_json::Value> = own.json();
    assert_eq!(own_budgets.len(), 2);
    assert!(own_budgets.iter().all(|b| b["user_id"].as_i64() == Some(id_a)));
}

/// The owner of a created row is always the authenticated principal,
/// regardless of any user_id claimed in the request body
#[tokio::test]
async fn test_create_ignores_claimed_user_id() {
    let (server, _state) = create_test_app().await;
    let (token, user_id, _email) = signup_and_login(&server, "claim").await;

    let response = server
        .post("/api/transaction")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({
            "type": "expense",
            "amount": 42.0,
            "category": "coffee",
            "description": "espresso",
            "date": "2026-02-14",
            "user_id": 999_999_999
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let txn: serde_json::Value = response.json();
    assert_eq!(txn["user_id"].as_i64().unwrap(), user_id);
}

// ============================================================================
// Admin bypass
// ============================================================================

/// Admins may read and delete resources they do not own, and list users
#[tokio::test]
async fn test_admin_bypasses_ownership() {
    let (server, state) = create_test_app().await;
    let (token_user, _id, _email) = signup_and_login(&server, "victim").await;
    let token_admin = create_admin(&server, &state).await;

    let created = server
        .post("/api/budget")
        .add_header(AUTHORIZATION, bearer(&token_user))
        .json(&budget_payload("utilities"))
        .await;
    let budget_id = created.json::<serde_json::Value>()["id"].as_i64().unwrap();

    let get = server
        .get(&format!("/api/budget/{}", budget_id))
        .add_header(AUTHORIZATION, bearer(&token_admin))
        .await;
    assert_eq!(get.status_code(), StatusCode::OK);

    let users = server
        .get("/api/users")
        .add_header(AUTHORIZATION, bearer(&token_admin))
        .await;
    assert_eq!(users.status_code(), StatusCode::OK);

    let delete = server
        .delete(&format!("/api/budget/{}", budget_id))
        .add_header(AUTHORIZATION, bearer(&token_admin))
        .await;
    assert_eq!(delete.status_code(), StatusCode::NO_CONTENT);
}

// ============================================================================
// Validation
// ============================================================================

/// Transaction type outside income/expense is a 400 with a field message
#[tokio::test]
async fn test_invalid_transaction_type_is_400() {
    let (server, _state) = create_test_app().await;
    let (token, _id, _email) = signup_and_login(&server, "badtype").await;

    let response = server
        .post("/api/transaction")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({
            "type": "gift",
            "amount": 10.0,
            "category": "misc",
            "date": "2026-02-14"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

/// Blank signup fields produce the field-specific message
#[tokio::test]
async fn test_signup_blank_name_is_400() {
    let (server, _state) = create_test_app().await;

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "name": "",
            "email": unique_email("blank"),
            "password": "hunter2!"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"].as_str().unwrap(), "Name is required");
}

/// A malformed email is a 400 at signup, but still the generic 401 at login
#[tokio::test]
async fn test_signup_malformed_email_is_400() {
    let (server, _state) = create_test_app().await;

    let signup = server
        .post("/api/auth/signup")
        .json(&json!({
            "name": "Bad Email",
            "email": "not-an-email",
            "password": "hunter2!"
        }))
        .await;
    assert_eq!(signup.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = signup.json();
    assert_eq!(
        body["error"].as_str().unwrap(),
        "Email must be a valid email address"
    );

    let login = server
        .post("/api/auth/login")
        .json(&json!({ "email": "not-an-email", "password": "hunter2!" }))
        .await;
    assert_eq!(login.status_code(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = login.json();
    assert_eq!(body["error"].as_str().unwrap(), "Invalid email or password");
}

// ============================================================================
// Prediction
// ============================================================================

/// A fresh user with no history predicts zero; foreign predictions are 403
#[tokio::test]
async fn test_prediction_scoping() {
    let (server, _state) = create_test_app().await;
    let (token, user_id, _email) = signup_and_login(&server, "predict").await;

    let own = server
        .get("/api/predict")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    assert_eq!(own.status_code(), StatusCode::OK);
    let body: serde_json::Value = own.json();
    assert_eq!(body["user_id"].as_i64().unwrap(), user_id);
    assert_eq!(body["predicted_expense"].as_f64().unwrap(), 0.0);

    let foreign = server
        .get(&format!("/api/predict/{}", user_id + 1))
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    assert_eq!(foreign.status_code(), StatusCode::FORBIDDEN);
}
