//! Token service module for JWT management
//!
//! - HS256 access tokens carrying the account email and role
//! - Opaque refresh tokens stored as HMAC-SHA256 hashes
//! - Rotation of refresh tokens with compare-and-swap semantics

mod config;
mod hasher;
mod jwt;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use hasher::RefreshTokenHasher;
pub use jwt::JwtCodec;
pub use service::TokenService;
