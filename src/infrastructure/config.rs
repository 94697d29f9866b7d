//! Application configuration

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::services::AnalysisSettings;
use crate::domain::value_objects::{AnalysisWeights, PartyProfile, DEFAULT_PARTY_LEVEL, DEFAULT_PARTY_SIZE};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP bind address
    pub server_host: String,
    /// HTTP server port
    pub server_port: u16,

    /// D&D 5e SRD API base URL
    pub dnd_api_url: String,
    /// Whether creature ratings may be cross-checked over the network
    pub dnd_api_enabled: bool,
    /// Per-lookup timeout for the SRD API
    pub dnd_api_timeout: Duration,

    /// Longest accepted scenario, in characters
    pub max_scenario_length: usize,
    /// Shortest scenario accepted by quick analysis, in characters
    pub quick_analysis_min_length: usize,
    /// Party used when a request leaves level or size out
    pub default_party: PartyProfile,

    pub weights: AnalysisWeights,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            dnd_api_url: "https://www.dnd5eapi.co/api".to_string(),
            dnd_api_enabled: true,
            dnd_api_timeout: Duration::from_secs(5),
            max_scenario_length: 50_000,
            quick_analysis_min_length: 50,
            default_party: PartyProfile::default(),
            weights: AnalysisWeights::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let default_party = PartyProfile::new(
            parse_var("DEFAULT_PARTY_LEVEL", DEFAULT_PARTY_LEVEL)?,
            parse_var("DEFAULT_PARTY_SIZE", DEFAULT_PARTY_SIZE)?,
        )
        .context("DEFAULT_PARTY_SIZE must be at least 1")?;

        let defaults = Self::default();
        Ok(Self {
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            dnd_api_url: env::var("DND_API_URL").unwrap_or(defaults.dnd_api_url),
            dnd_api_enabled: parse_var("DND_API_ENABLED", defaults.dnd_api_enabled)?,
            dnd_api_timeout: Duration::from_secs(parse_var(
                "DND_API_TIMEOUT_SECS",
                defaults.dnd_api_timeout.as_secs(),
            )?),

            max_scenario_length: parse_var("MAX_SCENARIO_LENGTH", defaults.max_scenario_length)?,
            quick_analysis_min_length: parse_var(
                "QUICK_ANALYSIS_MIN_LENGTH",
                defaults.quick_analysis_min_length,
            )?,
            default_party,

            weights: AnalysisWeights::from_env(),
        })
    }

    pub fn analysis_settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            max_text_length: self.max_scenario_length,
            quick_min_length: self.quick_analysis_min_length,
            default_party: self.default_party,
        }
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("{key} has an invalid value: {value}")),
        Err(_) => Ok(default),
    }
}
