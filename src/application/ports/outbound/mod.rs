//! Outbound ports - Interfaces that the application requires from external systems

mod creature_lookup_port;
mod memo_cache_port;

pub use creature_lookup_port::{CreatureLookupError, CreatureLookupPort};
pub use memo_cache_port::MemoCachePort;
