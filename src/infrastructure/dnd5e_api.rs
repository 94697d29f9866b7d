//! D&D 5e SRD API client for canonical creature ratings

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::application::ports::outbound::{CreatureLookupError, CreatureLookupPort};
use crate::domain::value_objects::CreatureLookup;

/// Client for the public D&D 5e SRD API
pub struct Dnd5eApiClient {
    client: Client,
    base_url: String,
}

impl Dnd5eApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CreatureLookupError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("scenario-forge-engine/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CreatureLookupError::Http(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a monster by name. Unknown monsters are `found: false`.
    pub async fn get_monster(&self, name: &str) -> Result<CreatureLookup, CreatureLookupError> {
        let index = monster_index(name);
        let response = self
            .client
            .get(format!("{}/monsters/{}", self.base_url, index))
            .send()
            .await
            .map_err(|e| CreatureLookupError::Http(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!(index = %index, "Monster not in SRD");
                Ok(CreatureLookup::not_found(name))
            }
            status if status.is_success() => {
                let monster: SrdMonster = response
                    .json()
                    .await
                    .map_err(|e| CreatureLookupError::Decode(e.to_string()))?;
                Ok(monster.into_lookup(name))
            }
            status => Err(CreatureLookupError::Http(format!(
                "SRD API responded with {status}"
            ))),
        }
    }
}

#[async_trait]
impl CreatureLookupPort for Dnd5eApiClient {
    async fn lookup_creature(&self, name: &str) -> Result<CreatureLookup, CreatureLookupError> {
        self.get_monster(name).await
    }
}

/// Lookup used when network access is switched off
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledCreatureLookup;

#[async_trait]
impl CreatureLookupPort for DisabledCreatureLookup {
    async fn lookup_creature(&self, _name: &str) -> Result<CreatureLookup, CreatureLookupError> {
        Err(CreatureLookupError::Unavailable)
    }
}

/// SRD resource index, e.g. "Adult Red Dragon" -> "adult-red-dragon"
fn monster_index(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Debug, Deserialize)]
struct SrdMonster {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    challenge_rating: f64,
    #[serde(default)]
    xp: u32,
}

impl SrdMonster {
    fn into_lookup(self, requested: &str) -> CreatureLookup {
        CreatureLookup {
            name: self.name.unwrap_or_else(|| requested.to_string()),
            challenge_rating: self.challenge_rating,
            xp: self.xp,
            found: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monster_index() {
        assert_eq!(monster_index("Goblin"), "goblin");
        assert_eq!(monster_index("  Adult  Red Dragon "), "adult-red-dragon");
    }

    #[test]
    fn test_decode_srd_monster() {
        let body = r#"{"index":"goblin","name":"Goblin","challenge_rating":0.25,"xp":50,"size":"Small"}"#;
        let monster: SrdMonster = serde_json::from_str(body).unwrap();
        let lookup = monster.into_lookup("goblin");
        assert!(lookup.found);
        assert_eq!(lookup.name, "Goblin");
        assert_eq!(lookup.challenge_rating, 0.25);
        assert_eq!(lookup.xp, 50);
    }

    #[tokio::test]
    async fn test_disabled_lookup_is_unavailable() {
        let result = DisabledCreatureLookup.lookup_creature("goblin").await;
        assert!(matches!(result, Err(CreatureLookupError::Unavailable)));
    }
}
