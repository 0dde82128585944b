//! Authentication route handlers
//!
//! This module contains all account and session endpoints:
//! - Registration and login with email and password
//! - Token refresh
//! - Current user lookup

pub mod login;
pub mod refresh;
pub mod register;
pub mod user;

pub use login::login;
pub use refresh::refresh_token;
pub use register::register;
pub use user::current_user;
