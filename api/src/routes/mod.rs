//! Route handlers grouped by resource

pub mod auth;
pub mod map;
pub mod plants;
pub mod taxonomy;
