//! `/api/*` 라우트 통합 테스트.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use radar_api::routes::create_api_router;
use radar_api::state::AppState;
use radar_core::{Month, Nation, RawRecord, RecordNormalizer};
use radar_data::{
    Clock, DataError, DataProvider, DataSource, FallbackProvider, InMemoryTtlCache, ManualClock,
    RadarService, ResponseCache, SyntheticProvider,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn app_with_clock(clock: Arc<ManualClock>) -> Router {
    let clock: Arc<dyn Clock> = clock;
    let cache: Arc<dyn ResponseCache> = Arc::new(InMemoryTtlCache::with_default_ttl(clock.clone()));
    let service = RadarService::new(
        FallbackProvider::fallback_only(Box::new(SyntheticProvider::new())),
        RecordNormalizer::default(),
        cache,
        clock,
    );

    create_api_router().with_state(Arc::new(AppState::new(service)))
}

fn app() -> Router {
    // 2025-04-10 12:00 KST
    app_with_clock(Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 4, 10, 3, 0, 0).unwrap(),
    )))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn radar_returns_scored_models() {
    let (status, json) = get_json(app(), "/api/radar?month=2025-03&nation=domestic").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["month"], "2025-03");
    assert_eq!(json["nation"], "domestic");
    assert_eq!(json["totalCount"], 25);

    let models = json["models"].as_array().unwrap();
    assert_eq!(models.len(), 25);

    let first = &models[0];
    for field in [
        "id",
        "month",
        "nation",
        "rank",
        "prevRank",
        "modelName",
        "manufacturer",
        "sales",
        "prevSales",
        "momAbs",
        "momPct",
        "rankChange",
        "score",
        "isNew",
        "danawaUrl",
    ] {
        assert!(first.get(field).is_some(), "missing field {}", field);
    }

    let scores: Vec<f64> = models.iter().map(|m| m["score"].as_f64().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(json["lastUpdated"].as_str().unwrap().starts_with("2025년 4월 10일"));
}

#[tokio::test]
async fn radar_rejects_malformed_month() {
    let (status, json) = get_json(app(), "/api/radar?month=13-1&nation=domestic").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_QUERY");
    assert_eq!(json["message"], "Invalid query parameters");
    assert_eq!(json["details"][0]["field"], "month");
}

#[tokio::test]
async fn radar_rejects_unknown_nation() {
    let (status, json) = get_json(app(), "/api/radar?month=2025-03&nation=export").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["details"][0]["field"], "nation");
}

#[tokio::test]
async fn radar_rejects_missing_parameters() {
    let (status, json) = get_json(app(), "/api/radar").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn repeated_request_is_served_from_cache() {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 4, 10, 3, 0, 0).unwrap(),
    ));
    let app = app_with_clock(clock.clone());
    let uri = "/api/radar?month=2025-02&nation=import";

    let (_, first) = get_json(app.clone(), uri).await;
    clock.advance(chrono::Duration::minutes(10));
    let (_, second) = get_json(app.clone(), uri).await;
    assert_eq!(first["lastUpdated"], second["lastUpdated"]);

    clock.advance(chrono::Duration::minutes(30));
    let (_, third) = get_json(app, uri).await;
    assert_ne!(first["lastUpdated"], third["lastUpdated"]);
    assert_eq!(first["models"], third["models"]);
}

#[tokio::test]
async fn months_lists_twelve_from_last_month() {
    let (status, json) = get_json(app(), "/api/months").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["latestMonth"], "2025-03");
    let months = json["months"].as_array().unwrap();
    assert_eq!(months.len(), 12);
    assert_eq!(months[11], "2024-04");
}

struct BrokenProvider;

#[async_trait]
impl DataProvider for BrokenProvider {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn source(&self) -> DataSource {
        DataSource::Synthetic
    }

    async fn provide(&self, _nation: Nation, _month: &Month) -> radar_data::Result<Vec<RawRecord>> {
        Err(DataError::Parse("unreadable".to_string()))
    }
}

#[tokio::test]
async fn radar_failure_maps_to_internal_error() {
    let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(Utc::now()));
    let cache: Arc<dyn ResponseCache> = Arc::new(InMemoryTtlCache::with_default_ttl(clock.clone()));
    let service = RadarService::new(
        FallbackProvider::fallback_only(Box::new(BrokenProvider)),
        RecordNormalizer::default(),
        cache,
        clock,
    );
    let app = create_api_router().with_state(Arc::new(AppState::new(service)));

    let (status, json) = get_json(app, "/api/radar?month=2025-03&nation=domestic").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["message"], "Failed to fetch radar data");
}
