//! 판매 기록 타입.
//!
//! 공급자가 넘겨주는 원시 행([`RawRecord`])과 정규화/점수 계산을 거친
//! 정규 레코드([`SalesRecord`])를 정의합니다.

use serde::{Deserialize, Serialize};

use super::{Month, Nation};

/// 신규 진입 모델 및 상한으로 쓰는 전월 대비 증가율 (500%).
pub const MAX_MOMENTUM_PERCENT: f64 = 5.0;

/// 정규화된 월간 판매 기록.
///
/// 불변 조건:
/// - `momentum_absolute == current_sales - previous_sales`
/// - `is_new_entry`이면 `previous_sales == 0`, `rank_delta == 0`,
///   `momentum_percent == 5.0`, `previous_rank == None`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct SalesRecord {
    /// "{nation}-{month}-{rank}"
    pub id: String,
    /// 이번 달 순위 (1부터)
    pub rank: u32,
    /// 전월 순위
    #[serde(rename = "prevRank")]
    pub previous_rank: Option<u32>,
    /// 모델명
    #[serde(rename = "modelName")]
    pub model_name: String,
    /// 제조사
    pub manufacturer: String,
    /// 이번 달 판매량
    #[serde(rename = "sales")]
    pub current_sales: u64,
    /// 전월 판매량
    #[serde(rename = "prevSales")]
    pub previous_sales: u64,
    /// 판매량 증감 (대수)
    #[serde(rename = "momAbs")]
    pub momentum_absolute: i64,
    /// 판매량 증감률 (비율, 0.25 = 25%)
    #[serde(rename = "momPct")]
    pub momentum_percent: f64,
    /// 순위 변동 (양수면 상승)
    #[serde(rename = "rankChange")]
    pub rank_delta: i64,
    /// 상승 점수
    pub score: f64,
    /// 신규 진입 여부
    #[serde(rename = "isNew")]
    pub is_new_entry: bool,
    /// 국산/수입 구분
    pub nation: Nation,
    /// 집계 월
    #[cfg_attr(feature = "utoipa-support", schema(value_type = String, example = "2025-03"))]
    pub month: Month,
    /// 원본 페이지 URL
    #[serde(rename = "danawaUrl")]
    pub source_url: String,
}

impl SalesRecord {
    /// 상승 후보 여부 (판매량 증가).
    pub fn is_rising(&self) -> bool {
        self.momentum_absolute > 0
    }
}

/// 스크래핑으로 얻은 행.
///
/// 전월 판매량은 없고 증감만 있습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedRow {
    pub rank: u32,
    pub model_name: String,
    pub manufacturer: Option<String>,
    pub sales: Option<u64>,
    pub momentum_absolute: Option<i64>,
}

/// 합성 데이터 생성기가 만든 행.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticRow {
    pub rank: u32,
    pub model_name: String,
    pub manufacturer: String,
    pub current_sales: u64,
    pub previous_sales: u64,
    pub is_new_entry: bool,
    pub previous_rank: u32,
}

/// 공급자 출력.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRecord {
    Scraped(ScrapedRow),
    Synthetic(SyntheticRow),
}

impl RawRecord {
    /// 행의 순위.
    pub fn rank(&self) -> u32 {
        match self {
            RawRecord::Scraped(row) => row.rank,
            RawRecord::Synthetic(row) => row.rank,
        }
    }

    /// 행의 모델명.
    pub fn model_name(&self) -> &str {
        match self {
            RawRecord::Scraped(row) => &row.model_name,
            RawRecord::Synthetic(row) => &row.model_name,
        }
    }
}
