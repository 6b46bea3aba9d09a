//! Helpers that read CI-facing environment overrides for test suites.

pub mod property_test_profile;
