//! Unit tests for the identity module.

mod service_tests;
