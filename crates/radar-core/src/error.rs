//! 레이더 시스템의 에러 타입.
//!
//! 도메인 값 검증과 설정 로드에서 발생하는 에러를 정의합니다.

use thiserror::Error;

/// 핵심 도메인 에러.
#[derive(Debug, Error)]
pub enum RadarError {
    /// 월 형식 오류 ("YYYY-MM" 이외)
    #[error("잘못된 월 형식: {0} (YYYY-MM 필요)")]
    InvalidMonth(String),

    /// 지원하지 않는 국가 구분
    #[error("잘못된 국가 구분: {0} (domestic | import)")]
    InvalidNation(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 레이더 작업을 위한 Result 타입.
pub type RadarResult<T> = Result<T, RadarError>;

impl RadarError {
    /// 호출자 입력이 원인인 에러인지 확인합니다.
    pub fn is_validation(&self) -> bool {
        matches!(self, RadarError::InvalidMonth(_) | RadarError::InvalidNation(_))
    }
}

impl From<config::ConfigError> for RadarError {
    fn from(err: config::ConfigError) -> Self {
        RadarError::Config(err.to_string())
    }
}
