//! 응답 타입.

use serde::{Deserialize, Serialize};

use super::{Month, Nation, SalesRecord};

/// 국가/월 단위의 순위 응답.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RadarResponse {
    /// 점수 순으로 정렬된 모델 목록
    pub models: Vec<SalesRecord>,
    /// 집계 월
    #[cfg_attr(feature = "utoipa-support", schema(value_type = String, example = "2025-03"))]
    pub month: Month,
    /// 국산/수입 구분
    pub nation: Nation,
    /// 생성 시각 (예: "2025년 3월 15일 오후 02:30")
    pub last_updated: String,
    /// 모델 수
    pub total_count: usize,
}

/// 선택 가능한 월 목록.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AvailableMonths {
    /// 최근 12개월 (가까운 월부터)
    #[cfg_attr(feature = "utoipa-support", schema(value_type = Vec<String>))]
    pub months: Vec<Month>,
    /// 최신 월
    #[cfg_attr(feature = "utoipa-support", schema(value_type = String))]
    pub latest_month: Month,
}
