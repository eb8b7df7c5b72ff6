//! Tests for the OTP manager

mod manager_tests;
