//! Dataset loading and caching.

pub mod cache;
pub mod loader;
