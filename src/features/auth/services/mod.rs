mod auth_service;
mod session_token_service;

pub use auth_service::AuthService;
pub use session_token_service::{IssuedToken, SessionTokenService};
