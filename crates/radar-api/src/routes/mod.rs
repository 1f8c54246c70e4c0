//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/months` - 선택 가능한 월 목록
//! - `/api/radar` - 상승 모델 레이더

pub mod health;
pub mod months;
pub mod radar;

pub use health::{health_router, ComponentStatus, HealthResponse};
pub use months::months_router;
pub use radar::{radar_router, RadarQuery};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/health", health_router())
        .nest("/api/months", months_router())
        .nest("/api/radar", radar_router())
}
