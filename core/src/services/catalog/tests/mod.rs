//! Tests for catalog service
