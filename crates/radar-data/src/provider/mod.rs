//! 판매 데이터 Provider 모듈.
//!
//! ## 다나와 자동차
//! - `DanawaFetcher`: 월간 모델별 판매 실적 페이지 크롤러
//! - 순위, 모델명, 제조사, 판매량, 전월 대비 증감
//!
//! ## 합성 데이터
//! - `SyntheticProvider`: (국가, 월)로 결정되는 재현 가능한 25개 모델 데이터
//!
//! ## 대체 체인
//! - `FallbackProvider`: 실데이터 실패/빈 결과 시 합성 데이터로 대체

pub mod danawa;
pub mod fallback;
pub mod synthetic;

pub use danawa::{parse_model_rows, DanawaFetcher, MAX_MODEL_ROWS};
pub use fallback::FallbackProvider;
pub use synthetic::{SyntheticProvider, DOMESTIC_CATALOG, IMPORT_CATALOG};

use async_trait::async_trait;
use radar_core::{Month, Nation, RawRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// 데이터 출처.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// 다나와 실데이터
    Live,
    /// 합성 데이터
    Synthetic,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Live => "live",
            DataSource::Synthetic => "synthetic",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 출처가 표시된 원시 행 묶음.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvidedBatch {
    pub source: DataSource,
    pub records: Vec<RawRecord>,
}

/// 판매 데이터 Provider trait.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Provider 이름.
    fn name(&self) -> &'static str;

    /// 이 Provider가 만드는 데이터의 출처.
    fn source(&self) -> DataSource;

    /// (국가, 월)의 원시 행 조회.
    async fn provide(&self, nation: Nation, month: &Month) -> Result<Vec<RawRecord>>;
}
