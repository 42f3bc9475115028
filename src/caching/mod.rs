//! Incremental prompt caching
//!
//! - `state`: which prefix of the conversation the provider already cached
//! - `annotator`: where the cache boundary goes in the outgoing messages

pub mod annotator;
pub mod state;

pub use annotator::{annotate, strip_cache_markers};
pub use state::CacheState;
