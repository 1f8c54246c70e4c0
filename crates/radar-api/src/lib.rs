//! 상승 모델 레이더 REST API 서버.
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`error`]: 통합 에러 응답
//! - [`metrics`]: Prometheus 메트릭 수집
//! - [`middleware`]: HTTP 미들웨어
//! - [`openapi`]: OpenAPI 문서

pub mod error;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::{ApiErrorResponse, ApiResult, FieldError};
pub use metrics::setup_metrics_recorder;
pub use middleware::metrics_layer;
pub use openapi::{openapi_router, ApiDoc};
pub use routes::*;
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
