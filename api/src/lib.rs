//! HTTP layer of the BotGarden backend
//!
//! Exposes the application factory so integration tests can drive the full
//! route table against in-memory repositories.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use app::create_app;
pub use state::AppState;
