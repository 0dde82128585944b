//! Tests for token service

mod jwt_tests;
mod service_tests;
