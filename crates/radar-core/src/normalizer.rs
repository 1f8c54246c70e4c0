//! 원시 행 → 정규 [`SalesRecord`] 변환.
//!
//! 스크래핑 행은 판매량과 증감만 알려주므로 전월 판매량을 역산하고,
//! 합성 행은 전월 판매량/순위를 그대로 사용합니다. 어느 경우든 결과는
//! `momentum_absolute == current_sales - previous_sales`를 만족합니다.

use tracing::warn;

use crate::domain::{
    source_url, Month, Nation, RawRecord, SalesRecord, ScrapedRow, SyntheticRow,
    DEFAULT_SOURCE_BASE, MAX_MOMENTUM_PERCENT,
};

/// 제조사를 알 수 없을 때 사용하는 값.
pub const UNKNOWN_MANUFACTURER: &str = "Unknown";

/// 원시 행 정규화기.
#[derive(Debug, Clone)]
pub struct RecordNormalizer {
    source_base: String,
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_BASE)
    }
}

/// 전월 대비 증가율. 신규 진입(전월 0)이면 상한값.
fn momentum_percent(momentum_absolute: i64, previous_sales: u64) -> f64 {
    if previous_sales == 0 {
        MAX_MOMENTUM_PERCENT
    } else {
        (momentum_absolute as f64 / previous_sales as f64).min(MAX_MOMENTUM_PERCENT)
    }
}

impl RecordNormalizer {
    /// 원본 URL 기준 주소를 지정해 생성합니다.
    pub fn new(source_base: impl Into<String>) -> Self {
        Self {
            source_base: source_base.into(),
        }
    }

    /// 원시 행 하나를 정규화합니다.
    ///
    /// 모델명이 비었거나 순위가 0이면 `None`을 반환합니다.
    pub fn normalize(&self, nation: Nation, month: &Month, raw: RawRecord) -> Option<SalesRecord> {
        if raw.rank() == 0 || raw.model_name().trim().is_empty() {
            warn!(
                nation = %nation,
                month = %month,
                rank = raw.rank(),
                model = raw.model_name(),
                "Dropping malformed row"
            );
            return None;
        }

        let rank = raw.rank();
        let model = raw.model_name().to_string();
        let measures = match raw {
            RawRecord::Scraped(row) => Measures::from_scraped(row),
            RawRecord::Synthetic(row) => Measures::from_synthetic(row),
        };
        let Some((measures, momentum_absolute)) =
            measures.and_then(|m| m.momentum_absolute().map(|abs| (m, abs)))
        else {
            warn!(
                nation = %nation,
                month = %month,
                rank,
                model = %model,
                "Dropping row with out-of-range sales"
            );
            return None;
        };

        Some(SalesRecord {
            id: format!("{}-{}-{}", nation, month, rank),
            rank,
            previous_rank: measures.previous_rank,
            model_name: measures.model_name,
            manufacturer: measures.manufacturer,
            current_sales: measures.current_sales,
            previous_sales: measures.previous_sales,
            momentum_absolute,
            momentum_percent: momentum_percent(momentum_absolute, measures.previous_sales),
            rank_delta: measures.rank_delta,
            score: 0.0,
            is_new_entry: measures.previous_sales == 0,
            nation,
            month: month.clone(),
            source_url: source_url(&self.source_base, nation, month),
        })
    }

    /// 배치를 정규화합니다. 입력 순서를 유지하며 잘못된 행만 제외합니다.
    pub fn normalize_batch(
        &self,
        nation: Nation,
        month: &Month,
        raws: Vec<RawRecord>,
    ) -> Vec<SalesRecord> {
        raws.into_iter()
            .filter_map(|raw| self.normalize(nation, month, raw))
            .collect()
    }
}

/// 경로별로 계산한 판매/순위 값.
struct Measures {
    model_name: String,
    manufacturer: String,
    current_sales: u64,
    previous_sales: u64,
    previous_rank: Option<u32>,
    rank_delta: i64,
}

fn manufacturer_or_unknown(manufacturer: Option<String>) -> String {
    manufacturer
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_MANUFACTURER.to_string())
}

impl Measures {
    /// 전월 판매량 = max(0, 판매량 - 증감). 순위 정보는 없습니다.
    ///
    /// 판매량이나 증감이 i64 범위를 벗어나면 `None`.
    fn from_scraped(row: ScrapedRow) -> Option<Self> {
        let current_sales = row.sales.unwrap_or(0);
        let delta = row.momentum_absolute.unwrap_or(0);
        let previous = i64::try_from(current_sales).ok()?.checked_sub(delta)?;

        Some(Self {
            model_name: row.model_name,
            manufacturer: manufacturer_or_unknown(row.manufacturer),
            current_sales,
            previous_sales: previous.max(0).unsigned_abs(),
            previous_rank: None,
            rank_delta: 0,
        })
    }

    /// 이번 달 - 전월 판매량. 범위를 벗어나면 `None`.
    fn momentum_absolute(&self) -> Option<i64> {
        let current = i64::try_from(self.current_sales).ok()?;
        let previous = i64::try_from(self.previous_sales).ok()?;
        current.checked_sub(previous)
    }

    /// 신규 진입이면 전월 판매량/순위를 버립니다.
    fn from_synthetic(row: SyntheticRow) -> Option<Self> {
        let is_new_entry = row.is_new_entry || row.previous_sales == 0;

        let (previous_sales, previous_rank, rank_delta) = if is_new_entry {
            (0, None, 0)
        } else {
            (
                row.previous_sales,
                Some(row.previous_rank),
                i64::from(row.previous_rank) - i64::from(row.rank),
            )
        };

        Some(Self {
            model_name: row.model_name,
            manufacturer: manufacturer_or_unknown(Some(row.manufacturer)),
            current_sales: row.current_sales,
            previous_sales,
            previous_rank,
            rank_delta,
        })
    }
}
