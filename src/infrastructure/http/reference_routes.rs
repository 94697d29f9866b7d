//! Reference table routes

use axum::{extract::Path, Json};

use crate::application::dto::XpThresholdsResponseDto;
use crate::domain::value_objects::xp_tables::{thresholds_for_level, MAX_PARTY_LEVEL, MIN_PARTY_LEVEL};

/// Per-character XP thresholds. Levels outside 1-20 report level 20.
pub async fn get_xp_thresholds(Path(level): Path<u32>) -> Json<XpThresholdsResponseDto> {
    let table_level = if (MIN_PARTY_LEVEL..=MAX_PARTY_LEVEL).contains(&level) {
        level
    } else {
        MAX_PARTY_LEVEL
    };
    Json(XpThresholdsResponseDto {
        level,
        table_level,
        thresholds: thresholds_for_level(level),
    })
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::super::tests::test_router;

    async fn get(uri: &str) -> (StatusCode, Value) {
        let response = test_router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_thresholds_for_level_three() {
        let (status, body) = get("/api/reference/xp-thresholds/3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["table_level"], 3);
        assert_eq!(body["thresholds"]["easy"], 75);
        assert_eq!(body["thresholds"]["deadly"], 400);
    }

    #[tokio::test]
    async fn test_out_of_range_level_clamps() {
        let (_, body) = get("/api/reference/xp-thresholds/25").await;
        assert_eq!(body["level"], 25);
        assert_eq!(body["table_level"], 20);
        assert_eq!(body["thresholds"]["deadly"], 12700);
    }

    #[tokio::test]
    async fn test_non_numeric_level_is_rejected() {
        let (status, _) = get("/api/reference/xp-thresholds/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
