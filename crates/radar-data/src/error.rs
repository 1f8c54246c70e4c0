//! 데이터 모듈 오류 타입.

use radar_core::{Month, Nation};
use thiserror::Error;

/// 데이터 수집 관련 오류.
///
/// 공급자 오류는 [`RadarService`](crate::RadarService) 밖으로 나가지 않고
/// 합성 데이터로 대체됩니다.
#[derive(Debug, Error)]
pub enum DataError {
    /// HTTP 요청 실패 (연결, 타임아웃 등)
    #[error("HTTP 요청 실패: {0}")]
    Http(#[from] reqwest::Error),

    /// 2xx 이외의 응답
    #[error("HTTP {status} 응답: {url}")]
    Status { status: u16, url: String },

    /// HTML 파싱 실패
    #[error("HTML 파싱 실패: {0}")]
    Parse(String),

    /// 파싱된 행이 없음
    #[error("데이터 없음: {nation} {month}")]
    NoData { nation: Nation, month: Month },

    /// 설정 오류
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DataError>;
