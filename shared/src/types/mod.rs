//! Type definitions shared by the HTTP layer and its clients
//!
//! - `response` - API response envelopes

pub mod response;

pub use response::{ApiResponse, ErrorResponse};
