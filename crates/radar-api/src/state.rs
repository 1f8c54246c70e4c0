//! 애플리케이션 공유 상태.
//!
//! 모든 핸들러가 `Arc<AppState>`로 공유합니다. 서비스(캐시, 시계 포함)는
//! 프로세스 시작 시 한 번 만들어 주입합니다.

use chrono::{DateTime, Utc};
use radar_data::RadarService;
use std::sync::Arc;

/// 애플리케이션 상태.
pub struct AppState {
    /// 레이더 서비스 - Provider, 정규화, 점수 계산, 응답 캐시
    pub radar: Arc<RadarService>,

    /// 서버 시작 시각
    pub started_at: DateTime<Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새 상태 생성.
    pub fn new(radar: RadarService) -> Self {
        Self {
            radar: Arc::new(radar),
            started_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

/// 테스트용 상태 (합성 데이터만 사용).
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    use radar_core::RecordNormalizer;
    use radar_data::{
        Clock, FallbackProvider, InMemoryTtlCache, ResponseCache, SyntheticProvider, SystemClock,
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let cache: Arc<dyn ResponseCache> = Arc::new(InMemoryTtlCache::with_default_ttl(clock.clone()));
    let service = RadarService::new(
        FallbackProvider::fallback_only(Box::new(SyntheticProvider::new())),
        RecordNormalizer::default(),
        cache,
        clock,
    );

    AppState::new(service)
}
