//! Unit tests for the cache module

mod redis_store_tests;
