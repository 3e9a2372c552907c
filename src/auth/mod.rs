// Authentication module
// JWT bearer authentication with registration, login, and role-gated access

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{login_handler, me_handler, register_handler};
pub use middleware::{AdminUser, CurrentUser};
pub use models::{LoginRequest, RegisterRequest, TokenResponse, User, UserResponse};
pub use repository::{UserRepository, UserStore};
pub use service::AuthService;
pub use token::{AuthConfig, TokenService};
