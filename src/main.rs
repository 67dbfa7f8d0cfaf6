mod admin;
mod auth;
mod budgets;
mod config;
mod db;
mod error;
mod exports;
mod forum;
mod ownership;
mod predict;
mod savings;
mod transactions;
mod validation;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{repository::UserRepository, service::AuthService, token::TokenCodec};
use budgets::BudgetRepository;
use config::AppConfig;
use exports::ExportsRepository;
use forum::ForumRepository;
use savings::SavingsRepository;
use transactions::TransactionRepository;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::signup_handler,
        auth::handlers::login_handler,
        auth::handlers::get_profile_handler,
        auth::handlers::update_profile_handler,
    ),
    components(
        schemas(
            auth::models::Role,
            auth::models::UserResponse,
            auth::models::SignupRequest,
            auth::models::LoginRequest,
            auth::models::LoginResponse,
            auth::models::UpdateProfileRequest,
            transactions::models::Transaction,
            transactions::models::TransactionRequest,
            budgets::models::Budget,
            budgets::models::BudgetRequest,
            savings::models::SavingsGoal,
            savings::models::SavingsRequest,
            forum::models::ForumPost,
            forum::models::ForumComment,
            forum::models::ForumPostRequest,
            forum::models::ForumCommentRequest,
            exports::Export,
            exports::ExportRequest,
            predict::PredictionResponse,
            admin::CreateUserRequest,
            admin::AdminUpdateUserRequest,
        )
    ),
    tags(
        (name = "auth", description = "Signup, login and profile endpoints")
    ),
    info(
        title = "Budget Tracker API",
        version = "1.0.0",
        description = "Personal finance tracker with JWT authentication and per-user ownership"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
///
/// Everything in here is either an immutable configuration product (the
/// token codec) or a cheap clone over the connection pool; there is no
/// shared mutable state.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub token_codec: TokenCodec,
    pub auth_service: AuthService,
    pub users: UserRepository,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
    pub savings: SavingsRepository,
    pub forum: ForumRepository,
    pub exports: ExportsRepository,
}

impl AppState {
    pub fn new(db: PgPool, config: &AppConfig) -> Self {
        let token_codec = TokenCodec::new(&config.jwt_secret, config.token_ttl_seconds);
        let users = UserRepository::new(db.clone());
        let auth_service = AuthService::new(users.clone(), token_codec.clone());

        Self {
            token_codec,
            auth_service,
            users,
            transactions: TransactionRepository::new(db.clone()),
            budgets: BudgetRepository::new(db.clone()),
            savings: SavingsRepository::new(db.clone()),
            forum: ForumRepository::new(db.clone()),
            exports: ExportsRepository::new(db.clone()),
            db,
        }
    }
}

/// Creates and configures the application router
///
/// Every API route passes through the authentication gate and then the route
/// policy; the Swagger UI is mounted outside that pipeline.
pub fn create_router(state: AppState) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Auth (public per policy)
        .route("/api/auth/signup", post(auth::handlers::signup_handler))
        .route("/api/auth/login", post(auth::handlers::login_handler))
        .route(
            "/api/auth/profile",
            get(auth::handlers::get_profile_handler).put(auth::handlers::update_profile_handler),
        )
        // Transactions
        .route(
            "/api/transaction",
            get(transactions::list_transactions).post(transactions::create_transaction),
        )
        .route(
            "/api/transaction/:id",
            get(transactions::get_transaction)
                .put(transactions::update_transaction)
                .delete(transactions::delete_transaction),
        )
        // Budgets
        .route(
            "/api/budget",
            get(budgets::list_budgets).post(budgets::create_budget),
        )
        .route(
            "/api/budget/:id",
            get(budgets::get_budget)
                .put(budgets::update_budget)
                .delete(budgets::delete_budget),
        )
        // Savings goals
        .route(
            "/api/savings",
            get(savings::list_savings).post(savings::create_savings),
        )
        .route(
            "/api/savings/:id",
            get(savings::get_savings)
                .put(savings::update_savings)
                .delete(savings::delete_savings),
        )
        // Exports
        .route(
            "/api/exports",
            get(exports::list_exports).post(exports::create_export),
        )
        // Expense prediction
        .route("/api/predict", get(predict::get_own_prediction))
        .route("/api/predict/:user_id", get(predict::get_prediction_for))
        // Forum
        .route(
            "/api/forumposts",
            get(forum::list_posts).post(forum::create_post),
        )
        .route(
            "/api/forumposts/:id",
            put(forum::update_post).delete(forum::delete_post),
        )
        .route("/api/comments", post(forum::create_comment))
        .route(
            "/api/comments/:id",
            get(forum::list_comments).delete(forum::delete_comment),
        )
        // Admin surface
        .route("/api/admin/users", get(admin::list_users))
        .route("/api/admin/transactions", get(admin::list_all_transactions))
        .route(
            "/api/admin/transactions/:id",
            delete(admin::admin_delete_transaction),
        )
        .route("/api/users", get(admin::list_users).post(admin::create_user))
        .route(
            "/api/users/:id",
            get(admin::get_user)
                .put(admin::update_user)
                .delete(admin::delete_user),
        )
        // Policy runs after the gate: gate resolves the context, policy
        // decides whether this route admits it
        .layer(middleware::from_fn(auth::policy::enforce))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::gate::authenticate,
        ))
        .layer(cors)
        .with_state(state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Budget Tracker API - Starting...");

    let config = AppConfig::from_env().expect("Failed to load configuration");

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    let state = AppState::new(db_pool, &config);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Budget Tracker API is running on http://{}", addr);

    axum::serve(listener, app).await.expect("Server error");
}

#[cfg(test)]
mod tests;
