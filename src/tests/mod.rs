// Test modules for prompt-cache-llm crate
//
// Each source module has a matching test file focused on the behavior it
// owns. Provider wire formats are tested next to the providers; HTTP flows
// against a mock server live in the crate's tests/ directory.

// Shared fixtures
pub mod helpers;

pub mod cache_state;
