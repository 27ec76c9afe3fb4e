pub mod auth_service;
pub mod bug_service;

pub use auth_service::AuthService;
pub use bug_service::BugService;
