//! Unit tests for the OpenRouter provider
//!
//! - `conversion`: Messages payload to chat completions and back
//! - `transport`: authentication and attribution headers

mod conversion;
mod transport;
