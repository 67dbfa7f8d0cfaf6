// Authentication module
// Stateless JWT authentication: password hashing, token codec, per-request
// authentication gate and the route-level authorization policy.

pub mod error;
pub mod gate;
pub mod handlers;
pub mod models;
pub mod password;
pub mod policy;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use gate::AuthenticatedUser;
pub use models::{Role, SecurityContext, User, UserResponse};
pub use repository::UserRepository;
pub use service::AuthService;
pub use token::TokenCodec;
