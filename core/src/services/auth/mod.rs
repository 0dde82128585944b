//! Authentication service module
//!
//! Registration, password login, token refresh and the profile lookup
//! behind `/api/auth/user`.

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::{AuthServiceConfig, MAX_PASSWORD_LENGTH};
pub use password::PasswordHasher;
pub use service::AuthService;
