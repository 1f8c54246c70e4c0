//! 판매 데이터 수집 및 레이더 서비스.
//!
//! 이 crate는 다음을 제공합니다:
//! - 다나와 실데이터 크롤러와 합성 데이터 Provider
//! - 실데이터 실패 시 합성 데이터로 대체하는 Provider 체인
//! - 주입 가능한 시계와 메모리 TTL 응답 캐시
//! - API와 CLI가 공유하는 `RadarService`

pub mod cache;
pub mod error;
pub mod provider;
pub mod service;

pub use error::{DataError, Result};
pub use service::*;

// 캐시 재내보내기
pub use cache::{
    cache_key, CacheStats, Clock, InMemoryTtlCache, ManualClock, ResponseCache, SystemClock,
};

// Provider 재내보내기
pub use provider::{
    DanawaFetcher, DataProvider, DataSource, FallbackProvider, ProvidedBatch, SyntheticProvider,
};
