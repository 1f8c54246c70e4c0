//! 실데이터 → 합성 데이터 대체 체인.

use metrics::counter;
use radar_core::{Month, Nation};
use tracing::{info, warn};

use super::{DataProvider, DataSource, ProvidedBatch};
use crate::error::Result;

/// 주 Provider가 실패하거나 빈 결과를 내면 대체 Provider를 사용합니다.
///
/// 재시도나 백오프는 하지 않습니다.
pub struct FallbackProvider {
    primary: Option<Box<dyn DataProvider>>,
    fallback: Box<dyn DataProvider>,
}

impl FallbackProvider {
    /// 주 Provider와 대체 Provider로 생성
    pub fn new(primary: Box<dyn DataProvider>, fallback: Box<dyn DataProvider>) -> Self {
        Self {
            primary: Some(primary),
            fallback,
        }
    }

    /// 대체 Provider만 사용 (실데이터 수집 비활성화)
    pub fn fallback_only(fallback: Box<dyn DataProvider>) -> Self {
        Self {
            primary: None,
            fallback,
        }
    }

    /// 구성 설명 (예: "danawa+synthetic")
    pub fn mode(&self) -> String {
        match &self.primary {
            Some(primary) => format!("{}+{}", primary.name(), self.fallback.name()),
            None => self.fallback.name().to_string(),
        }
    }

    /// (국가, 월)의 원시 행 묶음을 가져옵니다.
    pub async fn provide_batch(&self, nation: Nation, month: &Month) -> Result<ProvidedBatch> {
        if let Some(primary) = &self.primary {
            match primary.provide(nation, month).await {
                Ok(records) if !records.is_empty() => {
                    return Ok(ProvidedBatch {
                        source: primary.source(),
                        records,
                    });
                }
                Ok(_) => {
                    warn!(
                        provider = primary.name(),
                        nation = %nation,
                        month = %month,
                        "빈 결과, 대체 데이터 사용"
                    );
                }
                Err(e) => {
                    warn!(
                        provider = primary.name(),
                        nation = %nation,
                        month = %month,
                        error = %e,
                        "데이터 수집 실패, 대체 데이터 사용"
                    );
                }
            }
            counter!("radar_provider_fallback_total", "nation" => nation.as_str()).increment(1);
        }

        let records = self.fallback.provide(nation, month).await?;
        info!(
            provider = self.fallback.name(),
            nation = %nation,
            month = %month,
            count = records.len(),
            "대체 데이터 생성"
        );

        Ok(ProvidedBatch {
            source: self.fallback.source(),
            records,
        })
    }
}

impl std::fmt::Debug for FallbackProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackProvider")
            .field("mode", &self.mode())
            .finish()
    }
}
