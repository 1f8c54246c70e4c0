//! OpenAPI 문서화 설정.
//!
//! utoipa로 REST API의 OpenAPI 3.0 스펙을 생성하고 `/api-docs/openapi.json`으로 제공합니다.
//!
//! 새 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::{routing::get, Json, Router};
use radar_core::{AvailableMonths, Nation, RadarResponse, SalesRecord};
use utoipa::OpenApi;

use crate::error::{ApiErrorResponse, FieldError};
use crate::routes::{ComponentStatus, HealthResponse};

/// Rising Radar API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rising Radar API",
        version = "0.1.0",
        description = r#"
# 상승 모델 레이더 REST API

다나와 월간 자동차 판매 순위에서 전월 대비 판매가 급증한 모델을 점수 순으로 제공합니다.

- 점수 = 0.55·z(증가량) + 0.35·z(증가율) + 0.10·z(순위 변동)
- 판매가 늘지 않은 모델은 -999점으로 목록 끝에 위치합니다.
- 실데이터 수집에 실패하면 월/국가별로 결정적인 합성 데이터를 반환합니다.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "radar", description = "레이더 - 월 목록 및 상승 모델 순위")
    ),
    components(
        schemas(
            HealthResponse,
            ComponentStatus,
            ApiErrorResponse,
            FieldError,
            RadarResponse,
            SalesRecord,
            Nation,
            AvailableMonths,
        )
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::health::health_ready,
        crate::routes::months::list_months,
        crate::routes::radar::get_radar,
    )
)]
pub struct ApiDoc;

/// OpenAPI JSON 라우터 생성.
///
/// `/api-docs/openapi.json` 경로에 스펙을 마운트합니다.
pub fn openapi_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_valid() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&spec).unwrap();

        assert!(json.contains("Rising Radar API"));
        assert!(json.contains("/health/ready"));
        assert!(json.contains("/api/months"));
        assert!(json.contains("/api/radar"));
    }

    #[test]
    fn test_openapi_contains_schemas() {
        let json = serde_json::to_string(&ApiDoc::openapi()).unwrap();

        assert!(json.contains("RadarResponse"));
        assert!(json.contains("SalesRecord"));
        assert!(json.contains("ApiErrorResponse"));
    }

    #[test]
    fn test_openapi_router_creates() {
        let _router: Router<()> = openapi_router();
    }
}
