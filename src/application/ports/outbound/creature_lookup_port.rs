//! Creature lookup port - reference source for canonical challenge ratings

use async_trait::async_trait;

use crate::domain::value_objects::CreatureLookup;

#[derive(Debug, thiserror::Error)]
pub enum CreatureLookupError {
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("Creature lookup is unavailable")]
    Unavailable,
}

/// Looks up the canonical rating of a known creature.
///
/// A creature the source does not know is `Ok` with `found: false`; errors are
/// reserved for the source itself failing.
#[async_trait]
pub trait CreatureLookupPort: Send + Sync {
    async fn lookup_creature(&self, name: &str) -> Result<CreatureLookup, CreatureLookupError>;
}
