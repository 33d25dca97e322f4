//! Caching infrastructure for the service layer.
//!
//! A cache abstraction with Redis and in-process implementations. Values are
//! stored as JSON-encoded [`CacheEnvelope`]s so readers know what they got back.

mod cache_interface;
pub mod cache_keys;
mod envelope;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use envelope::CacheEnvelope;
pub use memory_cache::{Clock, ManualClock, MemoryCacheService, SystemClock};
pub use redis_cache::RedisCacheService;
