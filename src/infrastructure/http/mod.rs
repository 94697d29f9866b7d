//! HTTP REST API routes

mod analysis_routes;
mod encounter_routes;
mod reference_routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

pub use analysis_routes::*;
pub use encounter_routes::*;
pub use reference_routes::*;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Analysis routes
        .route("/api/analysis", post(analysis_routes::analyze_scenario))
        .route("/api/analysis/quick", post(analysis_routes::quick_analysis))
        .route(
            "/api/analysis/section",
            post(analysis_routes::analyze_section),
        )
        // Encounter routes
        .route(
            "/api/encounters/difficulty",
            post(encounter_routes::calculate_difficulty),
        )
        .route(
            "/api/creatures/{name}/validate",
            get(encounter_routes::validate_creature),
        )
        // Reference tables
        .route(
            "/api/reference/xp-thresholds/{level}",
            get(reference_routes::get_xp_thresholds),
        )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::infrastructure::config::AppConfig;
    use crate::infrastructure::dnd5e_api::DisabledCreatureLookup;

    /// Router over default configuration with network lookups switched off
    pub(crate) fn test_router() -> Router {
        let state = AppState::with_lookup(AppConfig::default(), Arc::new(DisabledCreatureLookup));
        create_routes().with_state(Arc::new(state))
    }
}
