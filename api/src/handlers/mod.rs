//! Error handling shared by all routes

pub mod error_handler;

pub use error_handler::{authentication_failed, handle_domain_error};
