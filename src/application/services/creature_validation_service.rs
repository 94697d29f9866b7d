//! Creature Validation Service - Advisory cross-check of declared challenge ratings
//!
//! Compares the ratings written in a scenario against a reference source.
//! Lookup failures and timeouts resolve to "not found" and never surface as
//! errors, so validation can run next to an analysis without ever failing it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::application::ports::outbound::{CreatureLookupPort, MemoCachePort};
use crate::domain::entities::MonsterEntry;
use crate::domain::value_objects::{CreatureLookup, CreatureRatingCheck};

/// Creature validation use cases
#[async_trait]
pub trait CreatureValidationService: Send + Sync {
    /// Canonical data for a creature, `found: false` when unknown or unreachable
    async fn lookup(&self, name: &str) -> CreatureLookup;

    /// Check one claimed rating
    async fn validate(&self, name: &str, claimed_cr: f64) -> CreatureRatingCheck;

    /// Check every monster of an analysis
    async fn cross_check(&self, monsters: &[MonsterEntry]) -> Vec<CreatureRatingCheck>;
}

/// Default implementation backed by a [`CreatureLookupPort`]
#[derive(Clone)]
pub struct CreatureValidationServiceImpl {
    lookup_port: Arc<dyn CreatureLookupPort>,
    cache: Arc<dyn MemoCachePort<CreatureLookup>>,
    timeout: Option<Duration>,
}

impl CreatureValidationServiceImpl {
    pub fn new(
        lookup_port: Arc<dyn CreatureLookupPort>,
        cache: Arc<dyn MemoCachePort<CreatureLookup>>,
    ) -> Self {
        Self {
            lookup_port,
            cache,
            timeout: None,
        }
    }

    /// Bound every lookup by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl CreatureValidationService for CreatureValidationServiceImpl {
    #[instrument(skip(self))]
    async fn lookup(&self, name: &str) -> CreatureLookup {
        let key = name.trim().to_lowercase();
        if let Some(cached) = self.cache.get(&key) {
            debug!("Creature lookup cache hit");
            return cached;
        }

        let request = self.lookup_port.lookup_creature(&key);
        let outcome = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, request).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!(timeout_ms = limit.as_millis() as u64, "Creature lookup timed out");
                    return CreatureLookup::not_found(name);
                }
            },
            None => request.await,
        };

        match outcome {
            Ok(lookup) => {
                self.cache.put(key, lookup.clone());
                lookup
            }
            // Source failures are not memoized so a later call can recover
            Err(e) => {
                warn!(error = %e, "Creature lookup failed");
                CreatureLookup::not_found(name)
            }
        }
    }

    #[instrument(skip(self))]
    async fn validate(&self, name: &str, claimed_cr: f64) -> CreatureRatingCheck {
        let lookup = self.lookup(name).await;
        CreatureRatingCheck::evaluate(name, claimed_cr, &lookup)
    }

    #[instrument(skip_all, fields(monsters = monsters.len()))]
    async fn cross_check(&self, monsters: &[MonsterEntry]) -> Vec<CreatureRatingCheck> {
        let mut checks = Vec::with_capacity(monsters.len());
        for monster in monsters {
            checks.push(self.validate(&monster.name, monster.challenge_rating).await);
        }
        debug!(
            valid = checks.iter().filter(|c| c.valid).count(),
            total = checks.len(),
            "Cross-checked creature ratings"
        );
        checks
    }
}
