//! Tests for the token revocation store

mod service_tests;
