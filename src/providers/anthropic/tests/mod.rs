//! Unit tests for the Anthropic provider
//!
//! Tests are organized by concern:
//! - `transport`: request headers and response parsing
