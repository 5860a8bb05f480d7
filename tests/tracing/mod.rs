//! Tracing feature tests
