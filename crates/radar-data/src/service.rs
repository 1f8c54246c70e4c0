//! 레이더 서비스 구현.
//!
//! Provider → 정규화 → 점수 계산 → 응답 조립 흐름을 담당하고,
//! (국가, 월) 단위 응답을 TTL 캐시에 보관합니다.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use chrono_tz::Asia::Seoul;
use metrics::counter;
use radar_core::{
    available_months, latest_month, AppConfig, AvailableMonths, MomentumScorer, Month, Nation,
    RadarResponse, RecordNormalizer,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::cache::{cache_key, CacheStats, Clock, InMemoryTtlCache, ResponseCache, SystemClock};
use crate::error::Result;
use crate::provider::{DanawaFetcher, DataSource, FallbackProvider, SyntheticProvider};

/// 응답과 그 출처.
#[derive(Debug, Clone)]
pub struct RadarReport {
    pub response: RadarResponse,
    /// 새로 계산한 경우의 데이터 출처. 캐시 적중이면 `None`.
    pub source: Option<DataSource>,
}

impl RadarReport {
    pub fn is_cached(&self) -> bool {
        self.source.is_none()
    }
}

/// 상승 모델 레이더 서비스.
pub struct RadarService {
    provider: FallbackProvider,
    normalizer: RecordNormalizer,
    scorer: MomentumScorer,
    cache: Arc<dyn ResponseCache>,
    clock: Arc<dyn Clock>,
}

impl RadarService {
    /// 구성 요소를 지정해 생성합니다.
    pub fn new(
        provider: FallbackProvider,
        normalizer: RecordNormalizer,
        cache: Arc<dyn ResponseCache>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            provider,
            normalizer,
            scorer: MomentumScorer::new(),
            cache,
            clock,
        }
    }

    /// 설정으로 생성합니다.
    ///
    /// `danawa.enabled`가 false면 합성 데이터만 사용합니다.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let cache: Arc<dyn ResponseCache> =
            Arc::new(InMemoryTtlCache::new(config.cache.ttl(), clock.clone()));

        let provider = if config.danawa.enabled {
            FallbackProvider::new(
                Box::new(DanawaFetcher::new(&config.danawa)?),
                Box::new(SyntheticProvider::new()),
            )
        } else {
            FallbackProvider::fallback_only(Box::new(SyntheticProvider::new()))
        };

        info!(
            mode = %provider.mode(),
            ttl_secs = config.cache.ttl_secs,
            "RadarService initialized"
        );

        Ok(Self::new(
            provider,
            RecordNormalizer::new(config.danawa.base_url.clone()),
            cache,
            clock,
        ))
    }

    /// (국가, 월) 순위 응답.
    pub async fn radar(&self, nation: Nation, month: &Month) -> Result<RadarResponse> {
        Ok(self.radar_report(nation, month).await?.response)
    }

    /// (국가, 월) 순위 응답과 출처.
    ///
    /// TTL 안의 반복 요청은 같은 응답(같은 `lastUpdated`)을 돌려줍니다.
    #[instrument(skip_all, fields(nation = %nation, month = %month))]
    pub async fn radar_report(&self, nation: Nation, month: &Month) -> Result<RadarReport> {
        let key = cache_key(nation, month);

        if let Some(response) = self.cache.get(&key) {
            counter!("radar_cache_hits_total").increment(1);
            debug!(key = %key, "캐시 적중");
            return Ok(RadarReport {
                response,
                source: None,
            });
        }
        counter!("radar_cache_misses_total").increment(1);

        let batch = self.provider.provide_batch(nation, month).await?;
        counter!("radar_batches_total", "source" => batch.source.as_str()).increment(1);

        let records = self.normalizer.normalize_batch(nation, month, batch.records);
        let models = self.scorer.score(records);

        let response = RadarResponse {
            total_count: models.len(),
            models,
            month: month.clone(),
            nation,
            last_updated: format_last_updated(self.clock.now()),
        };

        self.cache.set(&key, response.clone());
        info!(
            source = %batch.source,
            count = response.total_count,
            "레이더 응답 생성"
        );

        Ok(RadarReport {
            response,
            source: Some(batch.source),
        })
    }

    /// 선택 가능한 월 목록.
    pub fn months(&self) -> AvailableMonths {
        let today = self.today();
        AvailableMonths {
            months: available_months(today),
            latest_month: latest_month(today),
        }
    }

    /// 서울 기준 오늘 날짜.
    pub fn today(&self) -> NaiveDate {
        self.clock.now().with_timezone(&Seoul).date_naive()
    }

    /// 캐시 통계.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// 캐시 전체 비우기.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Provider 구성 설명.
    pub fn provider_mode(&self) -> String {
        self.provider.mode()
    }
}

/// 서울 시각 기준 한국어 표기.
///
/// 예: "2025년 3월 15일 오후 02:30"
pub fn format_last_updated(now: DateTime<Utc>) -> String {
    let local = now.with_timezone(&Seoul);
    let (is_pm, hour) = local.hour12();

    format!(
        "{}년 {}월 {}일 {} {:02}:{:02}",
        local.year(),
        local.month(),
        local.day(),
        if is_pm { "오후" } else { "오전" },
        hour,
        local.minute()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_last_updated() {
        // 05:30 UTC = 14:30 KST
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 5, 30, 0).unwrap();
        assert_eq!(format_last_updated(now), "2025년 3월 15일 오후 02:30");
    }

    #[test]
    fn test_format_midnight_and_date_rollover() {
        // 15:05 UTC = 다음날 00:05 KST
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 15, 5, 0).unwrap();
        assert_eq!(format_last_updated(now), "2025년 1월 1일 오전 12:05");

        let noon = Utc.with_ymd_and_hms(2025, 6, 1, 3, 0, 0).unwrap();
        assert_eq!(format_last_updated(noon), "2025년 6월 1일 오후 12:00");
    }
}
