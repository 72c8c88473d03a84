//! Tests for the verification flow service.

mod service_tests;
