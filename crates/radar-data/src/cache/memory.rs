//! 메모리 TTL 응답 캐시.
//!
//! 잠금은 `.await` 너머로 잡지 않습니다. 같은 키에 대한 동시 미스는
//! 각자 계산하고 마지막 쓰기가 남습니다.

use radar_core::{Month, Nation, RadarResponse};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use super::Clock;

/// 기본 TTL (30분).
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// 캐시 키 "{nation}-{month}".
pub fn cache_key(nation: Nation, month: &Month) -> String {
    format!("{}-{}", nation, month)
}

/// Cache 통계.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub entries: usize,
}

/// 응답 캐시 trait.
pub trait ResponseCache: Send + Sync {
    /// 유효한 항목 조회. 만료되었으면 제거하고 `None`.
    fn get(&self, key: &str) -> Option<RadarResponse>;

    /// 항목 저장 (덮어쓰기).
    fn set(&self, key: &str, value: RadarResponse);

    /// 항목 제거.
    fn invalidate(&self, key: &str);

    /// 전체 제거.
    fn clear(&self);

    /// 저장된 항목 수 (만료 항목 포함).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 통계.
    fn stats(&self) -> CacheStats;
}

struct Entry {
    inserted_at: chrono::DateTime<chrono::Utc>,
    value: RadarResponse,
}

/// `RwLock<HashMap>` 기반 TTL 캐시.
pub struct InMemoryTtlCache {
    entries: RwLock<HashMap<String, Entry>>,
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl InMemoryTtlCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// 기본 TTL(30분)로 생성
    pub fn with_default_ttl(clock: Arc<dyn Clock>) -> Self {
        Self::new(DEFAULT_TTL, clock)
    }

    fn is_fresh(&self, entry: &Entry) -> bool {
        self.is_fresh_at(entry, self.clock.now())
    }

    fn is_fresh_at(&self, entry: &Entry, now: chrono::DateTime<chrono::Utc>) -> bool {
        now - entry.inserted_at < self.ttl
    }

    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }
}

impl ResponseCache for InMemoryTtlCache {
    fn get(&self, key: &str) -> Option<RadarResponse> {
        {
            let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
            match entries.get(key) {
                Some(entry) if self.is_fresh(entry) => {
                    self.record_hit();
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => {
                    self.record_miss();
                    return None;
                }
            }
        }

        // 만료 항목 제거 (그 사이 새로 쓰였으면 유지)
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = entries.get(key) {
            if self.is_fresh(entry) {
                self.record_hit();
                return Some(entry.value.clone());
            }
            entries.remove(key);
        }
        self.record_miss();
        None
    }

    /// 저장하면서 만료된 항목을 함께 정리합니다.
    fn set(&self, key: &str, value: RadarResponse) {
        let now = self.clock.now();
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());

        entries.retain(|_, entry| self.is_fresh_at(entry, now));
        entries.insert(
            key.to_string(),
            Entry {
                inserted_at: now,
                value,
            },
        );
    }

    fn invalidate(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
    }

    fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        CacheStats {
            hits,
            misses,
            hit_rate: if total > 0 {
                hits as f64 / total as f64
            } else {
                0.0
            },
            entries: self.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use chrono::{TimeZone, Utc};

    fn response(last_updated: &str) -> RadarResponse {
        RadarResponse {
            models: Vec::new(),
            month: Month::parse("2025-03").unwrap(),
            nation: Nation::Domestic,
            last_updated: last_updated.to_string(),
            total_count: 0,
        }
    }

    fn setup() -> (Arc<ManualClock>, InMemoryTtlCache) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 3, 15, 5, 30, 0).unwrap(),
        ));
        let cache = InMemoryTtlCache::with_default_ttl(clock.clone());
        (clock, cache)
    }

    #[test]
    fn test_cache_key() {
        let month = Month::parse("2025-03").unwrap();
        assert_eq!(cache_key(Nation::Import, &month), "import-2025-03");
    }

    #[test]
    fn test_fresh_within_ttl() {
        let (clock, cache) = setup();
        cache.set("domestic-2025-03", response("a"));

        clock.advance(chrono::Duration::minutes(29));
        assert_eq!(cache.get("domestic-2025-03").unwrap().last_updated, "a");
    }

    #[test]
    fn test_expires_at_ttl() {
        let (clock, cache) = setup();
        cache.set("domestic-2025-03", response("a"));

        clock.advance(chrono::Duration::minutes(30));
        assert!(cache.get("domestic-2025-03").is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_overwrite_and_invalidate() {
        let (_clock, cache) = setup();
        cache.set("k", response("a"));
        cache.set("k", response("b"));
        assert_eq!(cache.get("k").unwrap().last_updated, "b");

        cache.invalidate("k");
        assert!(cache.get("k").is_none());

        cache.set("x", response("a"));
        cache.set("y", response("a"));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_sweeps_expired_keys() {
        let (clock, cache) = setup();

        for month in 1..=12 {
            cache.set(&format!("domestic-2024-{:02}", month), response("a"));
            clock.advance(chrono::Duration::minutes(31));
        }

        // 이전 키는 모두 만료되어 마지막 항목만 남음
        assert_eq!(cache.len(), 1);
        clock.advance(chrono::Duration::minutes(-31));
        assert!(cache.get("domestic-2024-12").is_some());
        assert!(cache.get("domestic-2024-01").is_none());
    }

    #[test]
    fn test_set_keeps_fresh_keys() {
        let (clock, cache) = setup();
        cache.set("domestic-2025-01", response("a"));
        clock.advance(chrono::Duration::minutes(10));
        cache.set("import-2025-01", response("b"));

        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_stats() {
        let (_clock, cache) = setup();
        assert!(cache.get("k").is_none());
        cache.set("k", response("a"));
        assert!(cache.get("k").is_some());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert!((stats.hit_rate - 0.5).abs() < 1e-12);
    }
}
