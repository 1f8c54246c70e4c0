//! 헬스 체크 endpoint.
//!
//! 로드밸런서 liveness/readiness probe용 엔드포인트입니다.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use radar_data::CacheStats;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::state::AppState;

/// 헬스 체크 응답 구조체.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// 전체 서비스 상태 ("healthy")
    pub status: String,

    /// API 버전
    pub version: String,

    /// 서버 업타임(초)
    pub uptime_secs: i64,

    /// 현재 시간 (ISO 8601)
    pub timestamp: String,

    /// 데이터 Provider 상태
    pub provider: ComponentStatus,

    /// 응답 캐시 통계
    #[schema(value_type = Object)]
    pub cache: CacheStats,
}

/// 컴포넌트 상태.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentStatus {
    /// 상태 ("up" | "down")
    pub status: String,

    /// 추가 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentStatus {
    /// 정보 포함 정상 상태.
    pub fn up_with_info(message: impl Into<String>) -> Self {
        Self {
            status: "up".to_string(),
            message: Some(message.into()),
        }
    }
}

/// 간단한 헬스 체크 (liveness probe용).
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "서버 응답 가능", body = String))
)]
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// 상세 헬스 체크 (readiness probe용).
///
/// 외부 의존성이 없으므로 항상 healthy이며, Provider 구성과 캐시 통계를 함께 반환합니다.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses((status = 200, description = "상세 상태", body = HealthResponse))
)]
pub async fn health_ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        provider: ComponentStatus::up_with_info(state.radar.provider_mode()),
        cache: state.radar.cache_stats(),
    };

    (StatusCode::OK, Json(response))
}

/// 헬스 체크 라우터 생성.
pub fn health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health_check))
        .route("/ready", get(health_ready))
}
