//! # Radar Core
//!
//! 월간 신차 판매 "상승 모델" 레이더의 핵심 도메인 모델과 알고리즘을 제공합니다.
//!
//! - 국가/월/판매 기록 도메인 타입
//! - 원시 행 정규화 ([`RecordNormalizer`])
//! - z-score 기반 상승 점수 계산 ([`MomentumScorer`])
//! - 화면 표시 필터 ([`DisplayFilter`])
//! - 설정 관리와 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod logging;
pub mod normalizer;
pub mod scorer;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use filter::*;
pub use logging::*;
pub use normalizer::*;
pub use scorer::*;
