//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.

use axum::http::{Method, StatusCode, Uri};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// 쿼리 검증 실패 코드.
pub const INVALID_QUERY: &str = "INVALID_QUERY";
/// 내부 오류 코드.
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "INVALID_QUERY",
///   "message": "Invalid query parameters",
///   "details": [{ "field": "month", "message": "Invalid month format (YYYY-MM)" }],
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "INVALID_QUERY", "INTERNAL_ERROR")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// HTTP 메서드 (GET 등)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// 요청 경로
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// 필드 단위 검증 오류.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// 쿼리 파라미터 이름
    pub field: String,
    /// 오류 설명
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: Some(chrono::Utc::now().timestamp()),
            method: None,
            path: None,
        }
    }

    /// 상세 정보 포함 에러 생성.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            details: Some(details),
            ..Self::new(code, message)
        }
    }

    /// 타임스탬프 없는 간단한 에러.
    pub fn simple(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: None,
            method: None,
            path: None,
        }
    }

    /// 요청 정보(메서드, 경로)를 추가합니다.
    #[must_use]
    pub fn with_request_info(mut self, method: &Method, uri: &Uri) -> Self {
        self.method = Some(method.to_string());
        self.path = Some(uri.path().to_string());
        self
    }

    /// 에러 코드 반환.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// 에러 메시지 반환.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 400 쿼리 검증 실패 응답.
pub fn invalid_query(details: &[FieldError]) -> (StatusCode, Json<ApiErrorResponse>) {
    let details = serde_json::to_value(details).unwrap_or(Value::Null);
    (
        StatusCode::BAD_REQUEST,
        Json(ApiErrorResponse::with_details(
            INVALID_QUERY,
            "Invalid query parameters",
            details,
        )),
    )
}

/// 500 내부 오류 응답. 원인은 서버 로그에만 남깁니다.
pub fn internal_error(message: impl Into<String>) -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiErrorResponse::new(INTERNAL_ERROR, message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_response_new() {
        let error = ApiErrorResponse::new("TEST_ERROR", "Test message");
        assert_eq!(error.code(), "TEST_ERROR");
        assert_eq!(error.message(), "Test message");
        assert!(error.timestamp.is_some());
        assert!(error.details.is_none());
    }

    #[test]
    fn test_json_serialization_simple() {
        let error = ApiErrorResponse::simple("NOT_FOUND", "Resource not found");
        let json = serde_json::to_string(&error).unwrap();

        assert!(!json.contains("timestamp"));
        assert!(!json.contains("details"));
        assert!(!json.contains("method"));
        assert!(json.contains(r#""code":"NOT_FOUND""#));
    }

    #[test]
    fn test_invalid_query_details() {
        let (status, Json(body)) = invalid_query(&[FieldError::new("month", "Required")]);

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, INVALID_QUERY);
        assert_eq!(body.message, "Invalid query parameters");
        let details = body.details.unwrap();
        assert_eq!(details[0]["field"], "month");
        assert_eq!(details[0]["message"], "Required");
    }

    #[test]
    fn test_internal_error() {
        let (status, Json(body)) = internal_error("Failed to fetch radar data");
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, INTERNAL_ERROR);
    }

    #[test]
    fn test_with_request_info() {
        let uri: Uri = "/api/radar?month=13-1".parse().unwrap();
        let error = ApiErrorResponse::new(INVALID_QUERY, "Invalid query parameters")
            .with_request_info(&Method::GET, &uri);

        assert_eq!(error.method, Some("GET".to_string()));
        assert_eq!(error.path, Some("/api/radar".to_string()));
    }
}
