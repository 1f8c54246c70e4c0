//! 화면 표시용 필터.

use serde::{Deserialize, Serialize};

use crate::config::FilterConfig;
use crate::domain::SalesRecord;

/// 순위 목록 표시 필터.
///
/// 정렬 순서와 점수는 건드리지 않고 행을 걸러낸 뒤 개수를 제한합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFilter {
    /// 이 값보다 판매량이 적으면 제외
    pub min_sales: u64,
    /// 신규 진입 모델 제외 여부
    pub exclude_new_entries: bool,
    /// 최대 표시 개수
    pub limit: usize,
}

impl Default for DisplayFilter {
    fn default() -> Self {
        Self {
            min_sales: 300,
            exclude_new_entries: false,
            limit: 20,
        }
    }
}

impl From<&FilterConfig> for DisplayFilter {
    fn from(config: &FilterConfig) -> Self {
        Self {
            min_sales: config.min_sales,
            exclude_new_entries: config.exclude_new_entries,
            limit: config.limit,
        }
    }
}

impl DisplayFilter {
    /// 레코드가 필터를 통과하는지 확인합니다.
    pub fn accepts(&self, record: &SalesRecord) -> bool {
        record.current_sales >= self.min_sales && !(self.exclude_new_entries && record.is_new_entry)
    }

    /// 필터를 적용합니다.
    pub fn apply(&self, records: &[SalesRecord]) -> Vec<SalesRecord> {
        records
            .iter()
            .filter(|r| self.accepts(r))
            .take(self.limit)
            .cloned()
            .collect()
    }
}
