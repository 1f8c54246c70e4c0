//! 캐싱 레이어.
//!
//! - 응답 캐시: (국가, 월) 단위 순위 응답을 TTL 동안 보관
//! - 시계: 캐시 만료와 `lastUpdated` 계산에 쓰는 주입 가능한 현재 시각

pub mod clock;
pub mod memory;

pub use clock::{Clock, ManualClock, SystemClock};
pub use memory::{cache_key, CacheStats, InMemoryTtlCache, ResponseCache, DEFAULT_TTL};
