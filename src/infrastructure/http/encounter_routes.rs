//! Encounter API routes
//!
//! Difficulty of a caller-supplied creature list and rating checks against
//! the SRD.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{CreatureValidationQuery, EncounterDifficultyRequestDto};
use crate::application::services::CreatureValidationService;
use crate::domain::entities::{EncounterAnalysis, MonsterEntry};
use crate::domain::value_objects::{CreatureRatingCheck, PartyProfile};
use crate::infrastructure::state::AppState;

pub async fn calculate_difficulty(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EncounterDifficultyRequestDto>,
) -> Result<Json<EncounterAnalysis>, (StatusCode, String)> {
    let default_party = state.config.default_party;
    let party = PartyProfile::new(
        req.party_level.unwrap_or(default_party.level()),
        req.party_size.unwrap_or(default_party.size()),
    )
    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let monsters: Vec<MonsterEntry> = req.monsters.into_iter().map(MonsterEntry::from).collect();
    Ok(Json(
        state
            .encounter_calculator
            .calculate_difficulty(&monsters, party),
    ))
}

/// Compare a claimed rating with the canonical one
pub async fn validate_creature(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(query): Query<CreatureValidationQuery>,
) -> Json<CreatureRatingCheck> {
    Json(state.creature_validation.validate(&name, query.cr).await)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::super::tests::test_router;

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = test_router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_encounter_difficulty() {
        let (status, body) = send(post_json(
            "/api/encounters/difficulty",
            json!({
                "monsters": [
                    { "name": "Орк", "challenge_rating": 0.5, "quantity": 2 },
                    { "name": "Огр", "challenge_rating": 2 }
                ],
                "party_level": 3,
                "party_size": 4
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_monsters"], 3);
        // (2 x 100 + 450) x 2.0
        assert_eq!(body["adjusted_xp"], 1300.0);
        assert_eq!(body["difficulty"], "deadly");
    }

    #[tokio::test]
    async fn test_encounter_with_empty_party_is_rejected() {
        let (status, _) = send(post_json(
            "/api/encounters/difficulty",
            json!({ "monsters": [], "party_size": 0 }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_validate_creature_without_lookup() {
        let (status, body) = send(
            Request::get("/api/creatures/goblin/validate?cr=0.25")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], false);
        assert_eq!(body["claimed_cr"], 0.25);
    }
}
